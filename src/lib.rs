//! Restricts the reporting date ranges non-administrator users may select and
//! corrects stored default dates that fall outside the allowed set.

pub mod config;
pub mod host;
pub mod logger;
pub mod metrics;
pub mod policy;

pub use config::{AppConfig, ConfigError};
pub use host::{
    Host, HookError, HostVersion, InMemoryHost, PluginApi, PluginHooks, ReportFlow, ReportView,
    Request,
};
pub use logger::{LogConfig, Logger, LoggerError};
pub use metrics::{ExporterType, MetricsExporter, PolicyMetrics};
pub use policy::{
    is_relative_date_token, DateRangeCatalog, Notice, NoticeLevel, PolicyEngine,
    ReconciliationDecision, Redirect, StoredPreference, UserContext,
};
