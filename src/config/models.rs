use crate::host::HostVersion;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_HOST_VERSION: &str = "2.16.0";

/// Contents of `host.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_host_version")]
    pub version: String,
}

fn default_host_version() -> String {
    DEFAULT_HOST_VERSION.to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            version: default_host_version(),
        }
    }
}

/// Contents of `plugin-settings.yaml`. `None` means the setting was never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    #[serde(default)]
    pub profiles: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(rename = "defaultReportDate", default, skip_serializing_if = "Option::is_none")]
    pub default_report_date: Option<String>,
    #[serde(rename = "defaultReport", default, skip_serializing_if = "Option::is_none")]
    pub default_report: Option<String>,
}

/// One entry of `users.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFixture {
    pub login: String,
    #[serde(default)]
    pub superuser_access: bool,
    #[serde(default)]
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host_version: HostVersion,
    pub settings: PluginSettings,
    pub translations: IndexMap<String, String>,
    pub users: Vec<UserFixture>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid host version '{0}', expected MAJOR.MINOR.PATCH[-PRERELEASE]")]
    InvalidVersion(String),
}
