pub mod settings;
pub mod persistence;
pub mod context;
pub mod resources;

// Re-export commonly used types
pub use settings::{
    WaterProjectSettings, WaterQualitySettings,
    ReflectionSettings, CausticSettings, LightingSettings,
    ReflectionType, SsrSteps, CausticMode, LightingMode, VolumeSamples,
};
pub use persistence::{
    SettingsPersistence, SettingsError, SettingsResult, TomlAssetStore, DetachedStore,
    ASSET_FOLDER, BUILD_FOLDER, SETTINGS_ASSET,
};
pub use context::SettingsContext;
pub use resources::WaterResources;
