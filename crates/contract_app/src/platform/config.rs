//! Application settings read from `contract_studio.ron`.

use std::fs;
use std::path::{Path, PathBuf};

use contract_engine::DEFAULT_FILENAME_PREFIX;
use serde::{Deserialize, Serialize};
use studio_logging::{LogDestination, DEFAULT_LOG_FILE};

use crate::cli::Args;

pub const CONFIG_FILENAME: &str = "contract_studio.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogSetting {
    File,
    #[default]
    Terminal,
    Both,
    Off,
}

impl LogSetting {
    pub fn destination(self) -> Option<LogDestination> {
        match self {
            LogSetting::File => Some(LogDestination::File),
            LogSetting::Terminal => Some(LogDestination::Terminal),
            LogSetting::Both => Some(LogDestination::Both),
            LogSetting::Off => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub filename_prefix: String,
    pub company_name: String,
    pub log: LogSetting,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("contracts"),
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            company_name: "GlowLink".to_string(),
            log: LogSetting::Terminal,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Command-line flags win over file values.
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(prefix) = &args.prefix {
            self.filename_prefix = prefix.clone();
        }
        if let Some(log) = args.log {
            self.log = log;
        }
    }
}

/// Loads the config file, falling back to defaults.
///
/// Runs before the logger exists, so problems are returned as warnings for the
/// caller to log once logging is up. A missing default file is not a problem;
/// a missing explicitly named file is.
pub fn load_config(explicit: Option<&Path>) -> (AppConfig, Vec<String>) {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            return (AppConfig::default(), Vec::new());
        }
        Err(err) => {
            return (
                AppConfig::default(),
                vec![format!("Failed to read config from {:?}: {}", path, err)],
            );
        }
    };

    match ron::from_str::<AppConfig>(&content) {
        Ok(config) => (config, Vec::new()),
        Err(err) => (
            AppConfig::default(),
            vec![format!("Failed to parse config from {:?}: {}", path, err)],
        ),
    }
}
