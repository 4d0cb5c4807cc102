use chrono::Local;
use std::fs::OpenOptions;
use std::io;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    filter::ParseError,
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer, Registry,
};

struct LogTimestamp;

impl FormatTime for LogTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    #[error("cannot open log file: {0}")]
    File(#[from] io::Error),
    #[error("logger already initialized: {0}")]
    Init(#[from] TryInitError),
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub enable_console: bool,
    pub enable_file: bool,
    pub file_path: String,
    pub enable_json: bool,
    pub enable_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            enable_console: true,
            enable_file: false,
            file_path: "rer-user-dates.log".to_string(),
            enable_json: false,
            enable_ansi: true,
        }
    }
}

impl LogConfig {
    /// Sets the level from its name; unknown names keep the current level.
    pub fn with_level_name(mut self, name: &str) -> Self {
        self.level = match name.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => self.level,
        };
        self
    }
}

pub struct Logger;

impl Logger {
    /// Installs the global subscriber. Console output goes to stderr so stdout
    /// stays free for command results.
    pub fn init(config: LogConfig) -> Result<(), LoggerError> {
        let env_filter = EnvFilter::from_default_env()
            .add_directive(format!("rer_user_dates={}", config.level).parse()?);

        let mut layers = Vec::new();

        if config.enable_console {
            let console = fmt::layer()
                .with_writer(io::stderr)
                .with_timer(LogTimestamp)
                .with_ansi(config.enable_ansi)
                .with_target(false);

            layers.push(if config.enable_json {
                console.json().boxed()
            } else {
                console.boxed()
            });
        }

        if config.enable_file {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.file_path)?;

            let file_layer = fmt::layer()
                .with_writer(file)
                .with_timer(LogTimestamp)
                .with_ansi(false)
                .with_target(true);

            layers.push(if config.enable_json {
                file_layer.json().with_current_span(false).with_span_list(false).boxed()
            } else {
                file_layer.boxed()
            });
        }

        Registry::default()
            .with(env_filter)
            .with(layers)
            .try_init()?;

        Ok(())
    }

    pub fn init_with_defaults() -> Result<(), LoggerError> {
        Self::init(LogConfig::default())
    }
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "rer_user_dates", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "rer_user_dates", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "rer_user_dates", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "rer_user_dates", $($arg)*)
    };
}
