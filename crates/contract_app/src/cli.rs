use std::path::PathBuf;

use clap::Parser;
use contract_core::{Field, FormSnapshot};

use crate::platform::config::LogSetting;

/// Fill in the service contract form and export it as a PDF.
#[derive(Parser, Debug, Default)]
#[command(name = "contract_studio", version)]
pub struct Args {
    /// Client name (required).
    #[arg(long)]
    pub name: Option<String>,

    /// Client email address (required).
    #[arg(long)]
    pub email: Option<String>,

    /// Client contact number (required).
    #[arg(long)]
    pub contact: Option<String>,

    /// Once-off setup cost.
    #[arg(long)]
    pub setup_cost: Option<String>,

    /// Monthly cost.
    #[arg(long)]
    pub monthly_cost: Option<String>,

    /// Directory the PDF is written to; overrides the config file.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Filename prefix; overrides the config file.
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// RON config file. Defaults to ./contract_studio.ron when present.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where log output goes; overrides the config file.
    #[arg(long, value_enum)]
    pub log: Option<LogSetting>,
}

impl Args {
    /// Field values as typed on the command line; absent flags are empty inputs.
    pub fn form_inputs(&self) -> FormSnapshot {
        let mut snapshot = FormSnapshot::default();
        for (field, value) in [
            (Field::ClientName, &self.name),
            (Field::ClientEmail, &self.email),
            (Field::ClientContact, &self.contact),
            (Field::SetupCost, &self.setup_cost),
            (Field::MonthlyCost, &self.monthly_cost),
        ] {
            snapshot.set(field, value.clone().unwrap_or_default());
        }
        snapshot
    }
}
