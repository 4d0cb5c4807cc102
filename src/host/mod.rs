//! Capabilities the analytics host provides to the plugin.
//!
//! Every read or write the plugin performs against the host goes through one of
//! these traits, so the policy itself never touches host storage directly.

pub mod api;
pub mod hooks;
pub mod memory;
mod version;

pub use api::PluginApi;
pub use hooks::{HookError, PluginHooks, ReportFlow, ReportView};
pub use memory::InMemoryHost;
pub use version::{HostVersion, Stage, SETTINGS_MIN_VERSION};

use crate::policy::{Notice, Redirect};
use serde::{Deserialize, Serialize};

/// Login the host reports for unauthenticated visitors.
pub const ANONYMOUS_LOGIN: &str = "anonymous";
pub const PREFERENCE_DEFAULT_REPORT_DATE: &str = "defaultReportDate";
pub const PREFERENCE_DEFAULT_REPORT: &str = "defaultReport";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub login: String,
    #[serde(default)]
    pub superuser_access: bool,
}

pub trait RoleLookup {
    fn get_user(&self, login: &str) -> Option<UserRecord>;
}

pub trait PreferenceStore {
    fn get_user_preference(&self, login: &str, key: &str) -> Option<String>;
    fn set_user_preference(&self, login: &str, key: &str, value: &str);
}

pub trait SettingsReader {
    fn read_feature_setting(&self, plugin_id: &str, setting_key: &str) -> Option<bool>;
}

pub trait Translator {
    fn translate(&self, message_id: &str) -> Option<String>;
}

pub trait Notifier {
    /// Queues a notice for the next response. A later notice with the same id replaces it.
    fn notify(&self, notice: &Notice, message: &str);
}

pub trait Redirector {
    fn redirect_to(&self, redirect: &Redirect);
}

/// Everything a hook needs from the host.
pub trait Host: RoleLookup + PreferenceStore + Translator + Notifier + Redirector {
    /// The settings subsystem, absent on hosts that predate it.
    fn settings(&self) -> Option<&dyn SettingsReader>;

    fn version(&self) -> &HostVersion;
}

/// The parts of an in-flight request the plugin reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub login: Option<String>,
    pub period: Option<String>,
}

impl Request {
    pub fn new(login: Option<String>, period: Option<String>) -> Self {
        Self { login, period }
    }

    pub fn for_user(login: impl Into<String>) -> Self {
        Self {
            login: Some(login.into()),
            period: None,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    /// The authenticated login, or `None` for anonymous visitors.
    pub fn authenticated_login(&self) -> Option<&str> {
        self.login
            .as_deref()
            .filter(|login| !login.is_empty() && *login != ANONYMOUS_LOGIN)
    }
}
