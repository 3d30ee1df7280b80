// Water Variants: build-time stripping of water shader variants
// Only the variants a configured quality preset can reach are built

pub mod utils;
pub mod config;
pub mod rendering;

// Re-export commonly used types for convenience
pub use config::{
    SettingsContext, WaterProjectSettings, WaterQualitySettings,
    TomlAssetStore, DetachedStore, SettingsPersistence,
};
pub use rendering::shaders::{
    WaterShaderStripper, StripReport, FeatureMask, ShaderVariantKeywords, PreprocessorChain,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
