use std::sync::OnceLock;
use serde::{Serialize, Deserialize};

use super::resources::WaterResources;

// =============================================================================
// Water Quality Presets
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReflectionType {
    None,
    Cubemap,
    ReflectionProbe,
    PlanarReflection,
    ScreenSpaceReflection,
    /// Value written by a newer or hand-edited settings file
    #[serde(other)]
    Unknown,
}

impl Default for ReflectionType {
    fn default() -> Self {
        Self::PlanarReflection
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SsrSteps {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl Default for SsrSteps {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CausticMode {
    Off,
    Simple,
    Advanced,
    #[serde(other)]
    Unknown,
}

impl Default for CausticMode {
    fn default() -> Self {
        Self::Simple
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightingMode {
    Off,
    Basic,
    Volume,
    #[serde(other)]
    Unknown,
}

impl Default for LightingMode {
    fn default() -> Self {
        Self::Basic
    }
}

/// Sample count used when raymarching volumetric light under the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeSamples {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl Default for VolumeSamples {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectionSettings {
    pub reflection_type: ReflectionType,
    /// Only read when `reflection_type` is `ScreenSpaceReflection`
    pub ssr_steps: SsrSteps,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CausticSettings {
    pub mode: CausticMode,
    /// Only read when `mode` is `Simple`
    pub dispersion: bool,
}

impl Default for CausticSettings {
    fn default() -> Self {
        Self {
            mode: CausticMode::Simple,
            dispersion: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingSettings {
    pub mode: LightingMode,
    /// Only read when `mode` is `Volume`
    pub volume_samples: VolumeSamples,
}

/// One water quality preset, usually bound to a single engine quality level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterQualitySettings {
    pub name: String,
    pub reflection: ReflectionSettings,
    pub caustics: CausticSettings,
    pub lighting: LightingSettings,
}

impl Default for WaterQualitySettings {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            reflection: ReflectionSettings::default(),
            caustics: CausticSettings::default(),
            lighting: LightingSettings::default(),
        }
    }
}

impl WaterQualitySettings {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_reflection(mut self, reflection_type: ReflectionType) -> Self {
        self.reflection.reflection_type = reflection_type;
        self
    }

    pub fn with_ssr_steps(mut self, steps: SsrSteps) -> Self {
        self.reflection.ssr_steps = steps;
        self
    }

    pub fn with_caustics(mut self, mode: CausticMode, dispersion: bool) -> Self {
        self.caustics = CausticSettings { mode, dispersion };
        self
    }

    pub fn with_lighting(mut self, mode: LightingMode) -> Self {
        self.lighting.mode = mode;
        self
    }

    pub fn with_volume_samples(mut self, samples: VolumeSamples) -> Self {
        self.lighting.volume_samples = samples;
        self
    }

    /// Dispersion is only compiled into the simple caustics path
    pub fn dispersion_enabled(&self) -> bool {
        self.caustics.mode == CausticMode::Simple && self.caustics.dispersion
    }
}

// =============================================================================
// Project Settings
// =============================================================================

/// Project-wide water settings: the default preset, one preset per quality
/// level and the lazily resolved resource bundle.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterProjectSettings {
    pub default_quality_settings: WaterQualitySettings,
    pub quality_settings: Vec<WaterQualitySettings>,
    #[serde(skip)]
    resources: OnceLock<WaterResources>,
}

impl Clone for WaterProjectSettings {
    fn clone(&self) -> Self {
        // The resource bundle is rebuilt on demand by the clone
        Self {
            default_quality_settings: self.default_quality_settings.clone(),
            quality_settings: self.quality_settings.clone(),
            resources: OnceLock::new(),
        }
    }
}

impl PartialEq for WaterProjectSettings {
    fn eq(&self, other: &Self) -> bool {
        self.default_quality_settings == other.default_quality_settings
            && self.quality_settings == other.quality_settings
    }
}

impl WaterProjectSettings {
    pub fn new(default_quality_settings: WaterQualitySettings, quality_settings: Vec<WaterQualitySettings>) -> Self {
        Self {
            default_quality_settings,
            quality_settings,
            resources: OnceLock::new(),
        }
    }

    pub fn default_preset(&self) -> &WaterQualitySettings {
        &self.default_quality_settings
    }

    /// Per-level presets in quality level order
    pub fn presets_by_quality_level(&self) -> impl Iterator<Item = &WaterQualitySettings> + '_ {
        self.quality_settings.iter()
    }

    /// The default preset followed by every per-level preset
    pub fn all_presets(&self) -> impl Iterator<Item = &WaterQualitySettings> + '_ {
        std::iter::once(&self.default_quality_settings).chain(self.presets_by_quality_level())
    }

    /// Preset for an engine quality level, falling back to the default preset
    /// when no preset is configured for that level.
    pub fn preset_for_quality_level(&self, level: usize) -> &WaterQualitySettings {
        self.quality_settings
            .get(level)
            .unwrap_or(&self.default_quality_settings)
    }

    pub fn resources(&self) -> &WaterResources {
        self.resources.get_or_init(|| {
            tracing::debug!("Resolving water resources");
            WaterResources::init()
        })
    }

    pub fn resources_resolved(&self) -> bool {
        self.resources.get().is_some()
    }
}
