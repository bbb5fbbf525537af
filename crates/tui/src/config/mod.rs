use clap::Parser;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/agenda.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON file holding the expenses.
    pub data_file: String,
    /// Directory the PDF/CSV exports are written to.
    pub export_dir: String,
    /// Log destination; the terminal is busy drawing the UI.
    pub log_file: String,
    pub level: String,
    pub timezone: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: "data/gastos.json".to_string(),
            export_dir: ".".to_string(),
            log_file: "agenda_tui.log".to_string(),
            level: "info".to_string(),
            timezone: "Europe/Madrid".to_string(),
        }
    }
}

impl AppConfig {
    pub fn timezone(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse()
            .map_err(|_| AppError::Setting(format!("unknown timezone: {}", self.timezone)))
    }
}

#[derive(Debug, Parser)]
#[command(name = "agenda_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the expenses file.
    #[arg(long)]
    data_file: Option<String>,
    /// Override the export directory.
    #[arg(long)]
    export_dir: Option<String>,
    /// Override the log file.
    #[arg(long)]
    log_file: Option<String>,
    /// Override the log level (e.g. debug).
    #[arg(long)]
    level: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("AGENDA_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_file) = args.data_file {
        settings.data_file = data_file;
    }
    if let Some(export_dir) = args.export_dir {
        settings.export_dir = export_dir;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }

    Ok(settings)
}
