use crate::host::{SettingsReader, Translator, UserRecord};
use crate::policy::dates::{is_relative_date_token, DateRangeCatalog, CORRECTED_DATE};
use crate::policy::decision::{
    Notice, PreferenceRewrite, ReconciliationDecision, Redirect, StoredPreference,
    DEFAULT_DATE_MESSAGE,
};
use tracing::{debug, info, warn};

pub const PLUGIN_ID: &str = "RerUserDates";
/// Setting key holding the restriction flag.
pub const PROFILES_SETTING: &str = "profiles";
/// Used when the host has no settings subsystem or the flag was never stored.
pub const DEFAULT_RESTRICTION_ENABLED: bool = true;

const RANGE_PERIOD: &str = "range";
const REDIRECT_PERIOD: &str = "day";
const REDIRECT_ACTION: &str = "index";

/// Identity and role of the user behind one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub login: String,
    pub is_superuser: bool,
}

impl UserContext {
    pub fn new(login: impl Into<String>, is_superuser: bool) -> Self {
        Self {
            login: login.into(),
            is_superuser,
        }
    }

    /// Builds the context from a role lookup result. A missing record is never a superuser.
    pub fn from_lookup(login: &str, record: Option<UserRecord>) -> Self {
        match record {
            Some(record) => Self::new(login, record.superuser_access),
            None => {
                warn!("Role lookup found no record for '{}', applying restriction", login);
                Self::new(login, false)
            }
        }
    }
}

/// Decides which date ranges a user may pick and how to correct stored ones.
///
/// Holds no per-request state: every input is passed to each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyEngine;

impl PolicyEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve_enabled(&self, settings: Option<&dyn SettingsReader>) -> bool {
        let Some(settings) = settings else {
            debug!("Settings subsystem unavailable, restriction defaults to {}", DEFAULT_RESTRICTION_ENABLED);
            return DEFAULT_RESTRICTION_ENABLED;
        };

        match settings.read_feature_setting(PLUGIN_ID, PROFILES_SETTING) {
            Some(enabled) => enabled,
            None => {
                debug!("Setting '{}' not stored, restriction defaults to {}", PROFILES_SETTING, DEFAULT_RESTRICTION_ENABLED);
                DEFAULT_RESTRICTION_ENABLED
            }
        }
    }

    pub fn is_exempt(&self, user: &UserContext) -> bool {
        user.is_superuser
    }

    /// Returns the catalog to render: `unrestricted` untouched, or the five-key catalog.
    pub fn catalog_for(
        &self,
        enabled: bool,
        exempt: bool,
        unrestricted: DateRangeCatalog,
        translator: &dyn Translator,
    ) -> DateRangeCatalog {
        if !enabled || exempt {
            debug!("Date catalog unrestricted (enabled={}, exempt={})", enabled, exempt);
            return unrestricted;
        }

        debug!("Date catalog restricted to fixed periods");
        DateRangeCatalog::restricted(|message_id| translator.translate(message_id))
    }

    pub fn should_notify_admin(&self, enabled: bool, exempt: bool) -> bool {
        enabled && exempt
    }

    pub fn reconcile_stored_preference(
        &self,
        enabled: bool,
        exempt: bool,
        stored: &StoredPreference,
    ) -> ReconciliationDecision {
        if !enabled || exempt {
            return ReconciliationDecision::no_action();
        }

        if !is_relative_date_token(&stored.default_report_date) {
            debug!("Stored date '{}' is compliant", stored.default_report_date);
            return ReconciliationDecision::no_action();
        }

        info!(
            "Stored date '{}' is a relative range, resetting to '{}'",
            stored.default_report_date, CORRECTED_DATE
        );

        let rewrite = PreferenceRewrite {
            new_date: CORRECTED_DATE.to_string(),
            notice: Notice::warning(DEFAULT_DATE_MESSAGE),
        };

        let redirect = (stored.requested_period == RANGE_PERIOD).then(|| Redirect {
            module: stored.default_report.clone(),
            action: REDIRECT_ACTION.to_string(),
            period: REDIRECT_PERIOD.to_string(),
            date: CORRECTED_DATE.to_string(),
        });

        ReconciliationDecision {
            rewrite: Some(rewrite),
            redirect,
        }
    }
}
