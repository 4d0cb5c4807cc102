use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use rer_user_dates::config::{AppConfig, ConfigError};
use rer_user_dates::host::{
    InMemoryHost, PluginApi, PluginHooks, PreferenceStore, ReportView, Request,
    PREFERENCE_DEFAULT_REPORT_DATE,
};
use rer_user_dates::logger::{LogConfig, Logger};
use rer_user_dates::metrics::{ExporterType, MetricsExporter, PolicyMetrics};
use rer_user_dates::{log_error, log_info, log_warn};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "rer-user-dates",
    version,
    about = "Evaluate the date-range restriction against a configured analytics host"
)]
struct Cli {
    #[arg(long, global = true, default_value = "config", help = "Directory holding the YAML configuration")]
    config_dir: PathBuf,
    #[arg(long, global = true, default_value = "warn", help = "Log level: error, warn, info, debug, trace")]
    log_level: String,
    #[arg(long, global = true, help = "Also write logs to a file")]
    log_file: bool,
    #[arg(long, global = true, default_value = "rer-user-dates.log")]
    log_file_path: String,
    #[arg(long, global = true, help = "Emit logs as JSON")]
    log_json: bool,
    #[arg(long, global = true, help = "Disable ANSI colors in console logs")]
    no_color: bool,
    #[arg(long, global = true, help = "Print policy metrics after the command")]
    metrics: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Date options offered to a user on the settings screen
    Dates {
        #[arg(long)]
        login: String,
    },
    /// Render the user settings screen and list queued notices
    UserSettings {
        #[arg(long)]
        login: String,
    },
    /// Open a report view and apply stored-date reconciliation
    Report {
        #[arg(long)]
        login: String,
        #[arg(long, help = "Period parameter of the request, e.g. day or range")]
        period: Option<String>,
        #[arg(long, value_enum, default_value_t = ViewArg::CoreHome)]
        view: ViewArg,
    },
    /// Whether calendars are restricted for the requesting user
    Calendars {
        #[arg(long)]
        login: Option<String>,
    },
    /// Store the restriction setting in the config directory
    Configure {
        #[arg(long, action = ArgAction::Set)]
        enabled: bool,
    },
    /// Host and plugin versions
    Version,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ViewArg {
    CoreHome,
    MultiSites,
}

impl From<ViewArg> for ReportView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::CoreHome => ReportView::CoreHome,
            ViewArg::MultiSites => ReportView::MultiSites,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_config = LogConfig {
        enable_file: cli.log_file,
        file_path: cli.log_file_path.clone(),
        enable_json: cli.log_json,
        enable_ansi: !cli.no_color,
        ..LogConfig::default()
    }
    .with_level_name(&cli.log_level);
    Logger::init(log_config)?;

    let mut config = match AppConfig::load(&cli.config_dir) {
        Ok(config) => config,
        Err(ConfigError::InvalidVersion(version)) => {
            log_error!("host.yaml declares an unparseable version '{}'", version);
            return Err(ConfigError::InvalidVersion(version).into());
        }
        Err(e) => {
            log_error!("Failed to load configuration from {}: {}", cli.config_dir.display(), e);
            return Err(e.into());
        }
    };

    log_info!(
        host_version = %config.host_version,
        users = config.users.len(),
        translations = config.translations.len(),
        "Loaded configuration from {}",
        cli.config_dir.display()
    );
    if !config.host_version.supports_settings() {
        log_warn!(
            "Host {} has no settings subsystem, restriction is always on",
            config.host_version
        );
    }

    let host = Arc::new(InMemoryHost::from_config(&config));
    let metrics = Arc::new(PolicyMetrics::new());
    let hooks = PluginHooks::new(Arc::clone(&host), Arc::clone(&metrics));
    let api = PluginApi::new(Arc::clone(&host));

    let output = match cli.command {
        Commands::Dates { login } => {
            let mut dates = host.default_dates();
            hooks.default_dates(&Request::for_user(login), &mut dates)?;
            json!({ "dates": dates })
        }
        Commands::UserSettings { login } => {
            let notified = hooks.user_settings(&Request::for_user(login))?;
            json!({ "admin_notice": notified, "notifications": host.notifications() })
        }
        Commands::Report { login, period, view } => {
            let request = Request::new(Some(login.clone()), period);
            let flow = hooks.report_view(&request, view.into())?;
            json!({
                "view": ReportView::from(view).hook_name(),
                "result": flow,
                "default_report_date": host.get_user_preference(&login, PREFERENCE_DEFAULT_REPORT_DATE),
                "notifications": host.notifications(),
            })
        }
        Commands::Calendars { login } => {
            let request = Request::new(login, None);
            json!({ "restricted": api.settings_calendars(&request) })
        }
        Commands::Configure { enabled } => {
            config.store_restriction(&cli.config_dir, enabled)?;
            log_info!("Stored restriction setting: {}", enabled);
            json!({ "profiles": enabled })
        }
        Commands::Version => json!({
            "host": api.host_version(),
            "plugin": env!("CARGO_PKG_VERSION"),
        }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    if cli.metrics {
        let exporter = MetricsExporter::new(metrics, ExporterType::Prometheus);
        print!("{}", exporter.export_metrics()?);
    }

    Ok(())
}
