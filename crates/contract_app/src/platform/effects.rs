use std::path::PathBuf;

use contract_core::{Effect, ExportJob, JobId, Msg};
use contract_engine::{contract_filename, ExportEvent, ExportHandle, ExportOptions, ExportRequest};
use studio_logging::{studio_error, studio_info, studio_warn};

use super::content::contract_document;

/// Settings the runner needs to turn an export effect into a request.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
    pub filename_prefix: String,
    pub company_name: String,
}

/// Effects the shell handles itself rather than the export engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    ScrollIntoView(contract_core::BannerKind),
}

pub struct EffectRunner {
    engine: ExportHandle,
    settings: ExportSettings,
    in_flight: usize,
}

impl EffectRunner {
    pub fn new(settings: ExportSettings) -> Self {
        Self::with_handle(ExportHandle::new(), settings)
    }

    pub fn with_handle(engine: ExportHandle, settings: ExportSettings) -> Self {
        Self {
            engine,
            settings,
            in_flight: 0,
        }
    }

    /// Starts engine work for `effects`. Returns UI effects for the shell and
    /// messages that are already known (a submit the engine refused).
    pub fn enqueue(&mut self, effects: Vec<Effect>) -> (Vec<UiEffect>, Vec<Msg>) {
        let mut ui = Vec::new();
        let mut immediate = Vec::new();
        for effect in effects {
            match effect {
                Effect::ExportContract { job_id, job } => {
                    if let Some(msg) = self.start_export(job_id, &job) {
                        immediate.push(msg);
                    }
                }
                Effect::ScrollIntoView(kind) => ui.push(UiEffect::ScrollIntoView(kind)),
                Effect::LogExportFailure { job_id, error } => {
                    studio_error!("PDF generation failed job_id={}: {}", job_id, error);
                }
            }
        }
        (ui, immediate)
    }

    /// Blocks until an in-flight export reports back.
    pub fn next_completion(&mut self) -> Option<Msg> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.engine.recv();
        self.in_flight -= 1;
        match event {
            Some(ExportEvent::Completed { job_id, result }) => {
                let result = match result {
                    Ok(outcome) => {
                        studio_info!(
                            "Export job_id={} saved {:?} ({} pages, {} bytes)",
                            job_id,
                            outcome.path,
                            outcome.page_count,
                            outcome.bytes_written
                        );
                        Ok(())
                    }
                    Err(err) => Err(err.to_string()),
                };
                Some(Msg::ExportFinished { job_id, result })
            }
            None => {
                studio_warn!("Export worker stopped with {} job(s) pending", self.in_flight + 1);
                self.in_flight = 0;
                None
            }
        }
    }

    fn start_export(&mut self, job_id: JobId, job: &ExportJob) -> Option<Msg> {
        let filename = contract_filename(
            &self.settings.filename_prefix,
            &job.snapshot.client_name,
            job.issued_on,
        );
        studio_info!(
            "ExportContract job_id={} reference={} filename={}",
            job_id,
            job.reference,
            filename
        );
        let request = ExportRequest {
            output_dir: self.settings.output_dir.clone(),
            filename,
            options: ExportOptions::default(),
        };
        let document = contract_document(&self.settings.company_name, job);
        match self.engine.submit(job_id, document, request) {
            Ok(()) => {
                self.in_flight += 1;
                None
            }
            Err(err) => Some(Msg::ExportFinished {
                job_id,
                result: Err(err.to_string()),
            }),
        }
    }
}
