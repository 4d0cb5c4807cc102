use crate::config::AppConfig;
use crate::host::{
    Host, HostVersion, Notifier, PreferenceStore, Redirector, RoleLookup, SettingsReader,
    Translator, UserRecord, PREFERENCE_DEFAULT_REPORT, PREFERENCE_DEFAULT_REPORT_DATE,
};
use crate::policy::{DateRangeCatalog, Notice, Redirect, PLUGIN_ID, PROFILES_SETTING};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;

/// Date options the host offers when no plugin narrows them.
pub const HOST_DEFAULT_DATES: [(&str, &str); 9] = [
    ("today", "Today"),
    ("yesterday", "Yesterday"),
    ("previous7", "Previous 7 days (not including today)"),
    ("previous30", "Previous 30 days (not including today)"),
    ("last7", "Last 7 days (including today)"),
    ("last30", "Last 30 days (including today)"),
    ("week", "Current week"),
    ("month", "Current month"),
    ("year", "Current year"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueuedNotice {
    pub notice: Notice,
    pub message: String,
}

/// Host backed by in-process maps, loaded from YAML configuration.
pub struct InMemoryHost {
    version: HostVersion,
    settings: DashMap<(String, String), bool>,
    users: DashMap<String, UserRecord>,
    preferences: DashMap<(String, String), String>,
    translations: DashMap<String, String>,
    notifications: DashMap<String, QueuedNotice>,
    redirects: Mutex<Vec<Redirect>>,
}

impl InMemoryHost {
    pub fn new(version: HostVersion) -> Self {
        Self {
            version,
            settings: DashMap::new(),
            users: DashMap::new(),
            preferences: DashMap::new(),
            translations: DashMap::new(),
            notifications: DashMap::new(),
            redirects: Mutex::new(Vec::new()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let host = Self::new(config.host_version.clone());

        if let Some(profiles) = config.settings.profiles {
            host.store_setting(PLUGIN_ID, PROFILES_SETTING, profiles);
        }

        for (message_id, label) in &config.translations {
            host.add_translation(message_id, label);
        }

        for user in &config.users {
            host.add_user(UserRecord {
                login: user.login.clone(),
                superuser_access: user.superuser_access,
            });
            if let Some(date) = &user.preferences.default_report_date {
                host.set_user_preference(&user.login, PREFERENCE_DEFAULT_REPORT_DATE, date);
            }
            if let Some(report) = &user.preferences.default_report {
                host.set_user_preference(&user.login, PREFERENCE_DEFAULT_REPORT, report);
            }
        }

        host
    }

    pub fn default_dates(&self) -> DateRangeCatalog {
        HOST_DEFAULT_DATES.iter().copied().collect()
    }

    pub fn add_user(&self, user: UserRecord) {
        self.users.insert(user.login.clone(), user);
    }

    pub fn store_setting(&self, plugin_id: &str, setting_key: &str, value: bool) {
        self.settings
            .insert((plugin_id.to_string(), setting_key.to_string()), value);
    }

    pub fn add_translation(&self, message_id: &str, label: &str) {
        self.translations
            .insert(message_id.to_string(), label.to_string());
    }

    /// Pending notices ordered by message id.
    pub fn notifications(&self) -> Vec<QueuedNotice> {
        let mut queued: Vec<QueuedNotice> = self
            .notifications
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        queued.sort_by(|a, b| a.notice.message_id.cmp(&b.notice.message_id));
        queued
    }

    pub fn clear_notifications(&self) {
        self.notifications.clear();
    }

    pub fn redirects(&self) -> Vec<Redirect> {
        self.redirects.lock().clone()
    }
}

impl RoleLookup for InMemoryHost {
    fn get_user(&self, login: &str) -> Option<UserRecord> {
        self.users.get(login).map(|entry| entry.value().clone())
    }
}

impl PreferenceStore for InMemoryHost {
    fn get_user_preference(&self, login: &str, key: &str) -> Option<String> {
        self.preferences
            .get(&(login.to_string(), key.to_string()))
            .map(|entry| entry.value().clone())
    }

    fn set_user_preference(&self, login: &str, key: &str, value: &str) {
        self.preferences
            .insert((login.to_string(), key.to_string()), value.to_string());
    }
}

impl SettingsReader for InMemoryHost {
    fn read_feature_setting(&self, plugin_id: &str, setting_key: &str) -> Option<bool> {
        self.settings
            .get(&(plugin_id.to_string(), setting_key.to_string()))
            .map(|entry| *entry.value())
    }
}

impl Translator for InMemoryHost {
    fn translate(&self, message_id: &str) -> Option<String> {
        self.translations
            .get(message_id)
            .map(|entry| entry.value().clone())
    }
}

impl Notifier for InMemoryHost {
    fn notify(&self, notice: &Notice, message: &str) {
        self.notifications.insert(
            notice.message_id.clone(),
            QueuedNotice {
                notice: notice.clone(),
                message: message.to_string(),
            },
        );
    }
}

impl Redirector for InMemoryHost {
    fn redirect_to(&self, redirect: &Redirect) {
        self.redirects.lock().push(redirect.clone());
    }
}

impl Host for InMemoryHost {
    fn settings(&self) -> Option<&dyn SettingsReader> {
        if self.version.supports_settings() {
            Some(self)
        } else {
            None
        }
    }

    fn version(&self) -> &HostVersion {
        &self.version
    }
}
