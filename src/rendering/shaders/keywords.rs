use std::collections::{BTreeSet, HashSet};

/// Build-time keywords the water stripper understands.
///
/// The discriminant is the bit position in [`FeatureMask`](super::FeatureMask);
/// `TRACKED_KEYWORDS` lists them in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TrackedKeyword {
    ReflectionCubemap = 0,
    ReflectionProbes = 1,
    ReflectionPlanar = 2,
    ReflectionSsr = 3,
    SsrSamplesLow = 4,
    SsrSamplesMedium = 5,
    SsrSamplesHigh = 6,
    VolumeSamplesLow = 7,
    VolumeSamplesMedium = 8,
    VolumeSamplesHigh = 9,
    Dispersion = 10,
}

pub const TRACKED_KEYWORDS: [TrackedKeyword; 11] = [
    TrackedKeyword::ReflectionCubemap,
    TrackedKeyword::ReflectionProbes,
    TrackedKeyword::ReflectionPlanar,
    TrackedKeyword::ReflectionSsr,
    TrackedKeyword::SsrSamplesLow,
    TrackedKeyword::SsrSamplesMedium,
    TrackedKeyword::SsrSamplesHigh,
    TrackedKeyword::VolumeSamplesLow,
    TrackedKeyword::VolumeSamplesMedium,
    TrackedKeyword::VolumeSamplesHigh,
    TrackedKeyword::Dispersion,
];

impl TrackedKeyword {
    /// Keyword as it appears in shader source and compiled variant records
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReflectionCubemap => "_REFLECTION_CUBEMAP",
            Self::ReflectionProbes => "_REFLECTION_PROBES",
            Self::ReflectionPlanar => "_REFLECTION_PLANARREFLECTION",
            Self::ReflectionSsr => "_REFLECTION_SSR",
            Self::SsrSamplesLow => "_SSR_SAMPLES_LOW",
            Self::SsrSamplesMedium => "_SSR_SAMPLES_MEDIUM",
            Self::SsrSamplesHigh => "_SSR_SAMPLES_HIGH",
            // Volumetric light samples reuse the shadow sample keywords
            Self::VolumeSamplesLow => "_SHADOW_SAMPLES_LOW",
            Self::VolumeSamplesMedium => "_SHADOW_SAMPLES_MEDIUM",
            Self::VolumeSamplesHigh => "_SHADOW_SAMPLES_HIGH",
            Self::Dispersion => "_DISPERSION",
        }
    }

    pub const fn index(self) -> u32 {
        self as u32
    }

    pub const fn bit(self) -> u32 {
        1 << self.index()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        TRACKED_KEYWORDS.iter().copied().find(|k| k.name() == name)
    }
}

/// Read access to the keywords a compiled variant was built with.
///
/// This is the only thing the stripper needs from the host's variant records.
pub trait ShaderVariantKeywords {
    fn is_enabled(&self, keyword: &str) -> bool;

    /// All enabled keywords, used for diagnostics
    fn enabled_keywords(&self) -> Vec<String>;

    fn is_tracked_enabled(&self, keyword: TrackedKeyword) -> bool {
        self.is_enabled(keyword.name())
    }
}

impl ShaderVariantKeywords for HashSet<String> {
    fn is_enabled(&self, keyword: &str) -> bool {
        self.contains(keyword)
    }

    fn enabled_keywords(&self) -> Vec<String> {
        let mut keywords: Vec<String> = self.iter().cloned().collect();
        keywords.sort();
        keywords
    }
}

impl ShaderVariantKeywords for BTreeSet<String> {
    fn is_enabled(&self, keyword: &str) -> bool {
        self.contains(keyword)
    }

    fn enabled_keywords(&self) -> Vec<String> {
        self.iter().cloned().collect()
    }
}

impl ShaderVariantKeywords for Vec<String> {
    fn is_enabled(&self, keyword: &str) -> bool {
        self.iter().any(|k| k == keyword)
    }

    fn enabled_keywords(&self) -> Vec<String> {
        self.clone()
    }
}

impl<'a> ShaderVariantKeywords for [&'a str] {
    fn is_enabled(&self, keyword: &str) -> bool {
        self.iter().any(|k| *k == keyword)
    }

    fn enabled_keywords(&self) -> Vec<String> {
        self.iter().map(|k| k.to_string()).collect()
    }
}

impl<'a> ShaderVariantKeywords for Vec<&'a str> {
    fn is_enabled(&self, keyword: &str) -> bool {
        self.as_slice().is_enabled(keyword)
    }

    fn enabled_keywords(&self) -> Vec<String> {
        self.as_slice().enabled_keywords()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// A compiled variant record: one stage and the keywords it was built with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledVariant {
    pub stage: ShaderStage,
    pub keywords: BTreeSet<String>,
}

impl CompiledVariant {
    pub fn new<I, S>(stage: ShaderStage, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stage,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fragment<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ShaderStage::Fragment, keywords)
    }

    pub fn vertex<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ShaderStage::Vertex, keywords)
    }
}

impl ShaderVariantKeywords for CompiledVariant {
    fn is_enabled(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    fn enabled_keywords(&self) -> Vec<String> {
        self.keywords.enabled_keywords()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_bits() {
        for (index, keyword) in TRACKED_KEYWORDS.iter().enumerate() {
            assert_eq!(keyword.index() as usize, index);
            assert_eq!(keyword.bit(), 1 << index);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(TrackedKeyword::from_name("_REFLECTION_SSR"), Some(TrackedKeyword::ReflectionSsr));
        assert_eq!(TrackedKeyword::from_name("_SHADOW_SAMPLES_HIGH"), Some(TrackedKeyword::VolumeSamplesHigh));
        assert_eq!(TrackedKeyword::from_name("_reflection_ssr"), None);
        assert_eq!(TrackedKeyword::from_name("_FOAM"), None);
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = TRACKED_KEYWORDS.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), TRACKED_KEYWORDS.len());
    }

    #[test]
    fn test_keyword_containers() {
        let slice: &[&str] = &["_DISPERSION", "_FOAM"];
        assert!(slice.is_tracked_enabled(TrackedKeyword::Dispersion));
        assert!(!slice.is_tracked_enabled(TrackedKeyword::ReflectionSsr));

        let set: HashSet<String> = ["_FOAM", "_DISPERSION"].iter().map(|s| s.to_string()).collect();
        assert_eq!(set.enabled_keywords(), vec!["_DISPERSION".to_string(), "_FOAM".to_string()]);

        let variant = CompiledVariant::vertex(["_REFLECTION_CUBEMAP"]);
        assert_eq!(variant.stage, ShaderStage::Vertex);
        assert!(variant.is_tracked_enabled(TrackedKeyword::ReflectionCubemap));
    }
}
