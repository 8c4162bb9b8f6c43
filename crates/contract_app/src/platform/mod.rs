//! Terminal platform shell: config, logging, effect execution and rendering.

pub mod app;
pub mod config;
mod content;
pub mod effects;
pub mod ui;

use std::process::ExitCode;

use anyhow::Context;
use log::LevelFilter;
use studio_logging::{studio_info, studio_warn};

use crate::cli::Args;
use app::Session;
use effects::{EffectRunner, ExportSettings};

pub fn run_app(args: Args) -> anyhow::Result<ExitCode> {
    let (mut config, warnings) = config::load_config(args.config.as_deref());
    config.apply_overrides(&args);

    if let Some(destination) = config.log.destination() {
        studio_logging::initialize(destination, LevelFilter::Info, &config.log_file);
    }
    for warning in warnings {
        studio_warn!("{}", warning);
    }
    studio_info!(
        "Contract studio starting output_dir={:?} prefix={}",
        config.output_dir,
        config.filename_prefix
    );

    let runner = EffectRunner::new(ExportSettings {
        output_dir: config.output_dir.clone(),
        filename_prefix: config.filename_prefix.clone(),
        company_name: config.company_name.clone(),
    });
    let stdout = std::io::stdout();
    let view = Session::new(runner, stdout.lock())
        .run(&args.form_inputs())
        .context("failed to write the form to the terminal")?;

    Ok(if view.success_visible() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
