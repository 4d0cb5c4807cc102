use serde::{Deserialize, Serialize};
use std::fmt;

/// Message shown to administrators on the user settings screen.
pub const SUPERUSER_MESSAGE: &str = "RerUserDates_SuperuserMessage";
/// Message shown to a user whose stored default date was corrected.
pub const DEFAULT_DATE_MESSAGE: &str = "RerUserDates_DefaultDateMessage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Info => write!(f, "info"),
            NoticeLevel::Warning => write!(f, "warning"),
        }
    }
}

/// A notification to be rendered on the user's next response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message_id: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn warning(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            level: NoticeLevel::Warning,
        }
    }
}

/// Stored report preferences of one user together with the in-flight period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPreference {
    pub default_report_date: String,
    pub default_report: String,
    pub requested_period: String,
}

impl StoredPreference {
    pub fn new(
        default_report_date: impl Into<String>,
        default_report: impl Into<String>,
        requested_period: impl Into<String>,
    ) -> Self {
        Self {
            default_report_date: default_report_date.into(),
            default_report: default_report.into(),
            requested_period: requested_period.into(),
        }
    }
}

/// Instruction to overwrite the stored default report date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRewrite {
    pub new_date: String,
    pub notice: Notice,
}

/// Instruction to abandon the current request and load another report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub module: String,
    pub action: String,
    pub period: String,
    pub date: String,
}

impl Redirect {
    /// Query parameters carried by the redirect, in URL order.
    pub fn params(&self) -> [(&'static str, &str); 2] {
        [("period", self.period.as_str()), ("date", self.date.as_str())]
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "module={}&action={}&period={}&date={}",
            self.module, self.action, self.period, self.date
        )
    }
}

/// Outcome of checking a stored preference against the restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationDecision {
    pub rewrite: Option<PreferenceRewrite>,
    pub redirect: Option<Redirect>,
}

impl ReconciliationDecision {
    pub fn no_action() -> Self {
        Self::default()
    }

    pub fn requires_rewrite(&self) -> bool {
        self.rewrite.is_some()
    }

    pub fn requires_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    pub fn new_date(&self) -> Option<&str> {
        self.rewrite.as_ref().map(|r| r.new_date.as_str())
    }
}
