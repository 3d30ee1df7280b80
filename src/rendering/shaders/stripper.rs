use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::config::{
    DetachedStore, ReflectionType, SettingsContext, SettingsPersistence, WaterProjectSettings,
    WaterQualitySettings,
};

use super::feature_mask::FeatureMask;
use super::keywords::ShaderVariantKeywords;
use super::preprocessor::ShaderPreprocessor;

/// Only shaders whose name starts with this (ignoring ASCII case) are stripped
pub const WATER_SHADER_PREFIX: &str = "Boat Attack/Water";

/// Feature combinations reachable from at least one configured preset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludedVariants {
    masks: HashSet<FeatureMask>,
}

impl IncludedVariants {
    pub fn from_presets<'a, I>(presets: I) -> Self
    where
        I: IntoIterator<Item = &'a WaterQualitySettings>,
    {
        let mut included = Self::default();
        for preset in presets {
            included.include(preset);
        }
        included
    }

    pub fn from_settings(settings: &WaterProjectSettings) -> Self {
        Self::from_presets(settings.all_presets())
    }

    pub fn include(&mut self, preset: &WaterQualitySettings) -> bool {
        self.masks.insert(FeatureMask::from_preset(preset))
    }

    pub fn contains(&self, mask: FeatureMask) -> bool {
        self.masks.contains(&mask)
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn masks(&self) -> impl Iterator<Item = FeatureMask> + '_ {
        self.masks.iter().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantDecision {
    /// Feature combination matches a configured preset
    Included,
    /// No reflection keyword, most likely a vertex stage variant
    NoReflection,
    /// SSR sample keyword above the lowest tier on a non-SSR reflection path
    UnusedSsrSamples,
    /// No configured preset reaches this feature combination
    Unreachable,
}

impl VariantDecision {
    pub fn is_kept(self) -> bool {
        matches!(self, Self::Included | Self::NoReflection)
    }
}

pub fn classify_variant<K>(keywords: &K, included: &IncludedVariants) -> VariantDecision
where
    K: ShaderVariantKeywords + ?Sized,
{
    let mask = FeatureMask::from_keywords(keywords);

    // Cubemap, planar and probe reflections are only compiled with one SSR setting
    if mask.reflection() != ReflectionType::ScreenSpaceReflection
        && mask.intersects(FeatureMask::SSR_SAMPLES_MEDIUM | FeatureMask::SSR_SAMPLES_HIGH)
    {
        return VariantDecision::UnusedSsrSamples;
    }

    if !mask.has_reflection() {
        return VariantDecision::NoReflection;
    }

    if included.contains(mask.without_unused_ssr_samples()) {
        VariantDecision::Included
    } else {
        VariantDecision::Unreachable
    }
}

/// Outcome of stripping one shader
#[derive(Debug, Clone, PartialEq)]
pub struct StripReport {
    pub shader_name: String,
    pub total_variants: usize,
    /// Enabled keywords of every removed variant, in original order
    pub stripped: Vec<Vec<String>>,
    pub elapsed: Duration,
}

impl StripReport {
    pub fn stripped_count(&self) -> usize {
        self.stripped.len()
    }

    pub fn kept_count(&self) -> usize {
        self.total_variants - self.stripped.len()
    }

    pub fn stripped_listing(&self) -> String {
        self.stripped
            .iter()
            .map(|keywords| keywords.join(","))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Removes water shader variants no configured quality preset can reach.
pub struct WaterShaderStripper<'a, P: SettingsPersistence = DetachedStore> {
    settings: &'a SettingsContext<P>,
    prefix: String,
}

impl<'a, P: SettingsPersistence> WaterShaderStripper<'a, P> {
    /// Runs before every other preprocessor
    pub const CALLBACK_ORDER: i32 = 0;

    pub fn new(settings: &'a SettingsContext<P>) -> Self {
        Self::with_prefix(settings, WATER_SHADER_PREFIX)
    }

    pub fn with_prefix(settings: &'a SettingsContext<P>, prefix: impl Into<String>) -> Self {
        Self {
            settings,
            prefix: prefix.into(),
        }
    }

    pub fn handles(&self, shader_name: &str) -> bool {
        shader_name
            .get(..self.prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(&self.prefix))
    }

    pub fn included_variants(&self) -> IncludedVariants {
        IncludedVariants::from_settings(self.settings.instance())
    }

    /// Strip `variants` in place. Returns `None` and leaves the list untouched
    /// for shaders outside the water prefix.
    pub fn process_shader<V>(&self, shader_name: &str, variants: &mut Vec<V>) -> Option<StripReport>
    where
        V: ShaderVariantKeywords,
    {
        if !self.handles(shader_name) {
            return None;
        }

        let start = Instant::now();
        let included = self.included_variants();
        let total_variants = variants.len();
        let mut stripped = Vec::new();

        variants.retain(|variant| {
            let decision = classify_variant(variant, &included);
            if !decision.is_kept() {
                tracing::trace!("Stripping {:?} variant of {}", decision, shader_name);
                stripped.push(variant.enabled_keywords());
            }
            decision.is_kept()
        });

        let report = StripReport {
            shader_name: shader_name.to_string(),
            total_variants,
            stripped,
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "Water shaders - stripped {} of {} variants of {} in {:.1}s",
            report.stripped_count(),
            report.total_variants,
            report.shader_name,
            report.elapsed.as_secs_f64()
        );
        if report.stripped_count() > 0 {
            tracing::debug!("Stripped variants:\n{}", report.stripped_listing());
        }

        Some(report)
    }
}

impl<'a, P, V> ShaderPreprocessor<V> for WaterShaderStripper<'a, P>
where
    P: SettingsPersistence,
    V: ShaderVariantKeywords,
{
    fn callback_order(&self) -> i32 {
        Self::CALLBACK_ORDER
    }

    fn on_process_shader(&self, shader_name: &str, variants: &mut Vec<V>) {
        self.process_shader(shader_name, variants);
    }
}
