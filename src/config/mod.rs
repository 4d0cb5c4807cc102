pub mod models;

pub use models::{
    AppConfig, ConfigError, HostConfig, PluginSettings, UserFixture,
    UserPreferences, DEFAULT_HOST_VERSION,
};

use crate::host::HostVersion;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const HOST_CONFIG_FILE: &str = "host.yaml";
pub const SETTINGS_FILE: &str = "plugin-settings.yaml";
pub const TRANSLATIONS_FILE: &str = "translations.yaml";
pub const USERS_FILE: &str = "users.yaml";

impl AppConfig {
    /// Loads every file under `dir`; missing files fall back to their defaults.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();

        let host: HostConfig = Self::load_optional(&dir.join(HOST_CONFIG_FILE))?.unwrap_or_default();
        let settings: PluginSettings = Self::load_optional(&dir.join(SETTINGS_FILE))?.unwrap_or_default();
        let translations: IndexMap<String, String> =
            Self::load_optional(&dir.join(TRANSLATIONS_FILE))?.unwrap_or_default();
        let users: Vec<UserFixture> = Self::load_optional(&dir.join(USERS_FILE))?.unwrap_or_default();

        Ok(AppConfig {
            host_version: HostVersion::parse(&host.version)?,
            settings,
            translations,
            users,
        })
    }

    fn load_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
        if !path.exists() {
            debug!("{} not found, using defaults", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        // An empty YAML document deserializes as unit, not as an empty map.
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_yaml::from_str(&content)?))
    }

    pub fn save_settings(&self, dir: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(&self.settings)?;
        fs::write(dir.as_ref().join(SETTINGS_FILE), content)?;
        Ok(())
    }

    /// Records the restriction flag and writes it to the settings file in `dir`.
    pub fn store_restriction(&mut self, dir: impl AsRef<Path>, enabled: bool) -> Result<(), ConfigError> {
        self.settings.profiles = Some(enabled);
        self.save_settings(dir)
    }
}
