use crate::config::{LightingMode, ReflectionType, SsrSteps, VolumeSamples, WaterQualitySettings};

use super::keywords::{ShaderVariantKeywords, TrackedKeyword, TRACKED_KEYWORDS};

bitflags::bitflags! {
    /// Tracked keywords packed into one integer. Bit `i` is `TRACKED_KEYWORDS[i]`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct FeatureMask: u32 {
        const REFLECTION_CUBEMAP = TrackedKeyword::ReflectionCubemap.bit();
        const REFLECTION_PROBES = TrackedKeyword::ReflectionProbes.bit();
        const REFLECTION_PLANAR = TrackedKeyword::ReflectionPlanar.bit();
        const REFLECTION_SSR = TrackedKeyword::ReflectionSsr.bit();
        const SSR_SAMPLES_LOW = TrackedKeyword::SsrSamplesLow.bit();
        const SSR_SAMPLES_MEDIUM = TrackedKeyword::SsrSamplesMedium.bit();
        const SSR_SAMPLES_HIGH = TrackedKeyword::SsrSamplesHigh.bit();
        const VOLUME_SAMPLES_LOW = TrackedKeyword::VolumeSamplesLow.bit();
        const VOLUME_SAMPLES_MEDIUM = TrackedKeyword::VolumeSamplesMedium.bit();
        const VOLUME_SAMPLES_HIGH = TrackedKeyword::VolumeSamplesHigh.bit();
        const DISPERSION = TrackedKeyword::Dispersion.bit();

        const REFLECTION = Self::REFLECTION_CUBEMAP.bits()
            | Self::REFLECTION_PROBES.bits()
            | Self::REFLECTION_PLANAR.bits()
            | Self::REFLECTION_SSR.bits();
        const SSR_SAMPLES = Self::SSR_SAMPLES_LOW.bits()
            | Self::SSR_SAMPLES_MEDIUM.bits()
            | Self::SSR_SAMPLES_HIGH.bits();
        const VOLUME_SAMPLES = Self::VOLUME_SAMPLES_LOW.bits()
            | Self::VOLUME_SAMPLES_MEDIUM.bits()
            | Self::VOLUME_SAMPLES_HIGH.bits();
    }
}

impl FeatureMask {
    pub const fn of(keyword: TrackedKeyword) -> Self {
        Self::from_bits_retain(keyword.bit())
    }

    /// Mask of the keywords a preset compiles with. Axes a preset disables,
    /// or sets to an unknown value, contribute no bits.
    pub fn from_preset(preset: &WaterQualitySettings) -> Self {
        let mut mask = match preset.reflection.reflection_type {
            ReflectionType::Cubemap => Self::REFLECTION_CUBEMAP,
            ReflectionType::ReflectionProbe => Self::REFLECTION_PROBES,
            ReflectionType::PlanarReflection => Self::REFLECTION_PLANAR,
            ReflectionType::ScreenSpaceReflection => {
                Self::REFLECTION_SSR | Self::from_ssr_steps(preset.reflection.ssr_steps)
            }
            ReflectionType::None | ReflectionType::Unknown => Self::empty(),
        };

        if preset.dispersion_enabled() {
            mask |= Self::DISPERSION;
        }

        if preset.lighting.mode == LightingMode::Volume {
            mask |= Self::from_volume_samples(preset.lighting.volume_samples);
        }

        mask
    }

    /// Raw mask of every tracked keyword enabled on a variant
    pub fn from_keywords<K: ShaderVariantKeywords + ?Sized>(keywords: &K) -> Self {
        TRACKED_KEYWORDS
            .iter()
            .filter(|keyword| keywords.is_tracked_enabled(**keyword))
            .fold(Self::empty(), |mask, keyword| mask | Self::of(*keyword))
    }

    fn from_ssr_steps(steps: SsrSteps) -> Self {
        match steps {
            SsrSteps::Low => Self::SSR_SAMPLES_LOW,
            SsrSteps::Medium => Self::SSR_SAMPLES_MEDIUM,
            SsrSteps::High => Self::SSR_SAMPLES_HIGH,
            SsrSteps::Unknown => Self::empty(),
        }
    }

    fn from_volume_samples(samples: VolumeSamples) -> Self {
        match samples {
            VolumeSamples::Low => Self::VOLUME_SAMPLES_LOW,
            VolumeSamples::Medium => Self::VOLUME_SAMPLES_MEDIUM,
            VolumeSamples::High => Self::VOLUME_SAMPLES_HIGH,
            VolumeSamples::Unknown => Self::empty(),
        }
    }

    /// Reflection path selected by this mask. Cubemap wins over planar, planar
    /// over probes and probes over screen space when several bits are set.
    pub fn reflection(self) -> ReflectionType {
        if self.contains(Self::REFLECTION_CUBEMAP) {
            ReflectionType::Cubemap
        } else if self.contains(Self::REFLECTION_PLANAR) {
            ReflectionType::PlanarReflection
        } else if self.contains(Self::REFLECTION_PROBES) {
            ReflectionType::ReflectionProbe
        } else if self.contains(Self::REFLECTION_SSR) {
            ReflectionType::ScreenSpaceReflection
        } else {
            ReflectionType::None
        }
    }

    pub fn has_reflection(self) -> bool {
        self.intersects(Self::REFLECTION)
    }

    /// Drop SSR sample bits unless the reflection path is screen space, the
    /// only path that reads them.
    pub fn without_unused_ssr_samples(self) -> Self {
        if self.reflection() == ReflectionType::ScreenSpaceReflection {
            self
        } else {
            self - Self::SSR_SAMPLES
        }
    }

    pub fn keywords(self) -> impl Iterator<Item = TrackedKeyword> {
        TRACKED_KEYWORDS
            .into_iter()
            .filter(move |keyword| self.contains(Self::of(*keyword)))
    }

    pub fn keyword_names(self) -> Vec<&'static str> {
        self.keywords().map(TrackedKeyword::name).collect()
    }
}
