// Build-time stripping of water shader variants
pub mod keywords;
pub mod feature_mask;
pub mod stripper;
pub mod preprocessor;

pub use keywords::{TrackedKeyword, TRACKED_KEYWORDS, ShaderVariantKeywords, CompiledVariant, ShaderStage};
pub use feature_mask::FeatureMask;
pub use stripper::{
    WaterShaderStripper, IncludedVariants, VariantDecision, StripReport,
    classify_variant, WATER_SHADER_PREFIX,
};
pub use preprocessor::{ShaderPreprocessor, PreprocessorChain};
