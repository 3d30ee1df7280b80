pub mod shaders;

// Re-export the stripper as the main interface
pub use shaders::{WaterShaderStripper, StripReport, PreprocessorChain};
