use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use thiserror::Error;

use super::settings::WaterProjectSettings;

pub const ASSET_FOLDER: &str = "Assets";
pub const BUILD_FOLDER: &str = "Resources";
pub const SETTINGS_ASSET: &str = "WaterSystemSettings";
const SETTINGS_EXTENSION: &str = "toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Settings file is malformed: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Settings could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Settings cannot be saved outside an editing context")]
    NoEditingContext,

    #[error("Invalid settings identifier: {0:?}")]
    InvalidIdentifier(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Storage backend for the project settings asset
pub trait SettingsPersistence {
    /// Load a settings asset by identifier. `Ok(None)` means no asset exists yet.
    fn load(&self, identifier: &str) -> SettingsResult<Option<WaterProjectSettings>>;

    /// Create or overwrite the settings asset, creating folders as needed
    fn save(&self, identifier: &str, settings: &WaterProjectSettings) -> SettingsResult<()>;
}

/// Stores settings as TOML under `<root>/Assets/Resources/`
#[derive(Debug, Clone)]
pub struct TomlAssetStore {
    root: PathBuf,
}

impl TomlAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted in the per-user configuration directory
    pub fn user_config() -> Option<Self> {
        ProjectDirs::from("com", "water", "water-variants")
            .map(|proj| Self::new(proj.config_dir()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn build_folder(&self) -> PathBuf {
        self.root.join(ASSET_FOLDER).join(BUILD_FOLDER)
    }

    /// File backing `identifier`. The extension is appended, so dotted
    /// identifiers keep their full name. Identifiers must name a single file
    /// inside the build folder.
    pub fn asset_path(&self, identifier: &str) -> SettingsResult<PathBuf> {
        if identifier.is_empty()
            || identifier == "."
            || identifier == ".."
            || identifier.contains(['/', '\\'])
        {
            return Err(SettingsError::InvalidIdentifier(identifier.to_string()));
        }
        Ok(self
            .build_folder()
            .join(format!("{identifier}.{SETTINGS_EXTENSION}")))
    }
}

impl SettingsPersistence for TomlAssetStore {
    fn load(&self, identifier: &str) -> SettingsResult<Option<WaterProjectSettings>> {
        let path = self.asset_path(identifier)?;
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let settings = toml::from_str::<WaterProjectSettings>(&data)?;
        tracing::debug!("Loaded water settings from {}", path.display());
        Ok(Some(settings))
    }

    fn save(&self, identifier: &str, settings: &WaterProjectSettings) -> SettingsResult<()> {
        let path = self.asset_path(identifier)?;
        let folder = self.build_folder();
        if !folder.is_dir() {
            fs::create_dir_all(&folder)?;
        }
        let toml = toml::to_string_pretty(settings)?;
        fs::write(&path, toml)?;
        tracing::info!("Saved water settings to {}", path.display());
        Ok(())
    }
}

/// Backend used outside an editing context: nothing is stored, nothing can be saved
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedStore;

impl SettingsPersistence for DetachedStore {
    fn load(&self, _identifier: &str) -> SettingsResult<Option<WaterProjectSettings>> {
        Ok(None)
    }

    fn save(&self, _identifier: &str, _settings: &WaterProjectSettings) -> SettingsResult<()> {
        Err(SettingsError::NoEditingContext)
    }
}
