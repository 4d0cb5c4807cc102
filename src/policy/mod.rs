pub mod dates;
mod decision;
mod engine;

pub use dates::{is_relative_date_token, DateRangeCatalog, CORRECTED_DATE, RESTRICTED_OPTIONS};
pub use decision::{
    Notice, NoticeLevel, PreferenceRewrite, ReconciliationDecision, Redirect, StoredPreference,
    DEFAULT_DATE_MESSAGE, SUPERUSER_MESSAGE,
};
pub use engine::{
    PolicyEngine, UserContext, DEFAULT_RESTRICTION_ENABLED, PLUGIN_ID, PROFILES_SETTING,
};
