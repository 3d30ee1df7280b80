use std::sync::OnceLock;

use super::persistence::{DetachedStore, SettingsPersistence, SETTINGS_ASSET};
use super::resources::WaterResources;
use super::settings::{WaterProjectSettings, WaterQualitySettings};

/// Owns the project settings for one build and resolves them on first access.
///
/// The first call to [`SettingsContext::instance`] loads the settings asset
/// from the persistence backend, or creates and saves a default one when none
/// exists. Initialization runs once even with concurrent first access.
pub struct SettingsContext<P: SettingsPersistence = DetachedStore> {
    persistence: P,
    identifier: String,
    settings: OnceLock<WaterProjectSettings>,
}

impl<P: SettingsPersistence> SettingsContext<P> {
    pub fn new(persistence: P) -> Self {
        Self::with_identifier(persistence, SETTINGS_ASSET)
    }

    pub fn with_identifier(persistence: P, identifier: impl Into<String>) -> Self {
        Self {
            persistence,
            identifier: identifier.into(),
            settings: OnceLock::new(),
        }
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn instance(&self) -> &WaterProjectSettings {
        self.settings.get_or_init(|| self.load_or_create())
    }

    pub fn is_initialized(&self) -> bool {
        self.settings.get().is_some()
    }

    pub fn default_preset(&self) -> &WaterQualitySettings {
        self.instance().default_preset()
    }

    pub fn presets_by_quality_level(&self) -> impl Iterator<Item = &WaterQualitySettings> + '_ {
        self.instance().presets_by_quality_level()
    }

    pub fn resolved_resources(&self) -> &WaterResources {
        self.instance().resources()
    }

    fn load_or_create(&self) -> WaterProjectSettings {
        match self.persistence.load(&self.identifier) {
            Ok(Some(settings)) => {
                tracing::debug!(
                    "Using water settings '{}' with {} quality levels",
                    self.identifier,
                    settings.quality_settings.len()
                );
                settings
            }
            Ok(None) => {
                tracing::info!("Making new water settings asset '{}'", self.identifier);
                let settings = WaterProjectSettings::default();
                if let Err(e) = self.persistence.save(&self.identifier, &settings) {
                    tracing::warn!("Failed to save water settings: {}", e);
                }
                settings
            }
            Err(e) => {
                // Keep the unreadable asset on disk for the user to fix
                tracing::warn!(
                    "Failed to load water settings '{}', using defaults: {}",
                    self.identifier,
                    e
                );
                WaterProjectSettings::default()
            }
        }
    }
}

impl SettingsContext<DetachedStore> {
    /// Context that already holds its settings and never touches storage
    pub fn with_settings(settings: WaterProjectSettings) -> Self {
        let context = Self::new(DetachedStore);
        // Fresh cell, cannot already be set
        let _ = context.settings.set(settings);
        context
    }
}

impl Default for SettingsContext<DetachedStore> {
    fn default() -> Self {
        Self::new(DetachedStore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::persistence::{SettingsError, SettingsResult, TomlAssetStore};
    use crate::config::settings::ReflectionType;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingStore {
        existing: Option<WaterProjectSettings>,
        loads: AtomicUsize,
        saves: AtomicUsize,
        fail_load: bool,
    }

    impl SettingsPersistence for CountingStore {
        fn load(&self, _identifier: &str) -> SettingsResult<Option<WaterProjectSettings>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail_load {
                return Err(SettingsError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "denied",
                )));
            }
            Ok(self.existing.clone())
        }

        fn save(&self, _identifier: &str, _settings: &WaterProjectSettings) -> SettingsResult<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_missing_settings_created_and_saved_once() {
        let context = SettingsContext::new(CountingStore::default());
        assert!(!context.is_initialized());

        let first = context.instance() as *const WaterProjectSettings;
        let second = context.instance() as *const WaterProjectSettings;

        assert_eq!(first, second);
        assert_eq!(context.persistence().loads.load(Ordering::SeqCst), 1);
        assert_eq!(context.persistence().saves.load(Ordering::SeqCst), 1);
        assert_eq!(context.presets_by_quality_level().count(), 0);
    }

    #[test]
    fn test_existing_settings_not_resaved() {
        let existing = WaterProjectSettings::new(
            WaterQualitySettings::default().with_reflection(ReflectionType::Cubemap),
            vec![WaterQualitySettings::named("Low")],
        );
        let context = SettingsContext::new(CountingStore {
            existing: Some(existing),
            ..Default::default()
        });

        assert_eq!(
            context.default_preset().reflection.reflection_type,
            ReflectionType::Cubemap
        );
        assert_eq!(context.presets_by_quality_level().count(), 1);
        assert_eq!(context.persistence().saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_load_failure_falls_back_without_save() {
        let context = SettingsContext::new(CountingStore {
            fail_load: true,
            ..Default::default()
        });
        assert_eq!(context.instance(), &WaterProjectSettings::default());
        assert_eq!(context.persistence().saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_detached_context_still_usable() {
        let context: SettingsContext = SettingsContext::default();
        assert_eq!(context.default_preset(), &WaterQualitySettings::default());
    }

    #[test]
    fn test_with_settings_skips_storage() {
        let settings = WaterProjectSettings::new(
            WaterQualitySettings::named("Custom"),
            Vec::new(),
        );
        let context: SettingsContext = SettingsContext::with_settings(settings);
        assert!(context.is_initialized());
        assert_eq!(context.default_preset().name, "Custom");
    }

    #[test]
    fn test_concurrent_first_access_saves_once() {
        let context = Arc::new(SettingsContext::new(CountingStore::default()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let context = Arc::clone(&context);
                std::thread::spawn(move || {
                    context.instance();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(context.persistence().saves.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_toml_store_round_trip_through_context() {
        let dir = tempfile::tempdir().unwrap();

        let context = SettingsContext::new(TomlAssetStore::new(dir.path()));
        context.instance();
        let path = context.persistence().asset_path(SETTINGS_ASSET).unwrap();
        assert!(path.is_file());

        let reopened = SettingsContext::new(TomlAssetStore::new(dir.path()));
        assert_eq!(reopened.instance(), context.instance());
    }

    #[test]
    fn test_invalid_identifier_falls_back_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let context = SettingsContext::with_identifier(TomlAssetStore::new(dir.path()), "../Water");

        assert_eq!(context.instance(), &WaterProjectSettings::default());
        assert!(!dir.path().join("Assets").exists());
    }

    #[test]
    fn test_resolved_resources_cached() {
        let context: SettingsContext = SettingsContext::default();
        let first = context.resolved_resources() as *const WaterResources;
        let second = context.resolved_resources() as *const WaterResources;
        assert_eq!(first, second);
    }
}
