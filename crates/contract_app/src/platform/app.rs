use std::io::Write;

use chrono::{Local, Utc};
use contract_core::{
    generate_reference, update, Field, FormSnapshot, FormState, FormViewModel, Msg, Submission,
};
use studio_logging::studio_debug;

use super::effects::{EffectRunner, UiEffect};
use super::ui::render;

/// One pass through the form: load, type, submit, wait for the export.
pub struct Session<W: Write> {
    state: FormState,
    runner: EffectRunner,
    ui_pending: Vec<UiEffect>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: FormState::new(),
            runner,
            ui_pending: Vec::new(),
            out,
        }
    }

    /// Runs the whole flow and returns the final view.
    pub fn run(mut self, inputs: &FormSnapshot) -> std::io::Result<FormViewModel> {
        let now = Local::now();
        let reference = generate_reference(&now, &mut rand::rng());
        self.dispatch(Msg::PageLoaded {
            today: now.date_naive(),
            reference,
        });

        for field in Field::ALL {
            self.dispatch(Msg::FieldFocused(field));
            self.dispatch(Msg::FieldChanged {
                field,
                value: inputs.get(field).to_string(),
            });
            self.dispatch(Msg::FieldBlurred(field));
        }
        self.paint()?;

        // The filename carries the UTC calendar date.
        self.dispatch(Msg::SubmitClicked {
            today: Utc::now().date_naive(),
        });
        self.paint()?;

        while let Submission::Exporting { job_id } = self.state.submission() {
            let msg = self
                .runner
                .next_completion()
                .unwrap_or_else(|| Msg::ExportFinished {
                    job_id,
                    result: Err("export worker stopped".to_string()),
                });
            self.dispatch(msg);
            self.paint()?;
        }

        Ok(self.state.view())
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut queue = vec![msg];
        while let Some(msg) = queue.pop() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            if effects.is_empty() {
                continue;
            }
            studio_debug!("Running {} effect(s)", effects.len());
            let (ui, immediate) = self.runner.enqueue(effects);
            self.ui_pending.extend(ui);
            queue.extend(immediate);
        }
    }

    /// Redraws the form when it changed, then brings any requested banner
    /// into view below it.
    fn paint(&mut self) -> std::io::Result<()> {
        if self.state.consume_dirty() {
            for line in render::render(&self.state.view()) {
                writeln!(self.out, "{line}")?;
            }
            writeln!(self.out)?;
        }
        for effect in std::mem::take(&mut self.ui_pending) {
            match effect {
                UiEffect::ScrollIntoView(kind) => {
                    if let Some(banner) = self.state.view().banner.filter(|b| b.kind == kind) {
                        writeln!(self.out, "{}", render::banner_line(&banner))?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;
    use contract_engine::{
        ContractDocument, ExportError, ExportHandle, ExportOutcome, ExportRequest, Exporter,
    };
    use tempfile::TempDir;

    use super::*;
    use crate::platform::effects::ExportSettings;

    /// Always fails, to simulate a rejected export.
    struct RejectingExporter;

    #[async_trait]
    impl Exporter for RejectingExporter {
        async fn export(
            &self,
            _document: &ContractDocument,
            _request: &ExportRequest,
        ) -> Result<ExportOutcome, ExportError> {
            Err(ExportError::Worker("renderer crashed".to_string()))
        }
    }

    fn settings(dir: &Path) -> ExportSettings {
        ExportSettings {
            output_dir: dir.to_path_buf(),
            filename_prefix: "GlowLink_Contract".to_string(),
            company_name: "GlowLink".to_string(),
        }
    }

    fn jane() -> FormSnapshot {
        FormSnapshot {
            client_name: "Jane Doe".to_string(),
            client_email: "jane@example.com".to_string(),
            client_contact: "0821234567".to_string(),
            ..FormSnapshot::default()
        }
    }

    #[test]
    fn valid_form_exports_named_pdf_and_shows_success() {
        let temp = TempDir::new().unwrap();
        let mut out = Vec::new();

        let view = Session::new(EffectRunner::new(settings(temp.path())), &mut out)
            .run(&jane())
            .unwrap();

        assert!(view.success_visible());
        assert!(!view.error_visible());
        assert!(view.submit.enabled);

        let expected = format!(
            "GlowLink_Contract_Jane_Doe_{}.pdf",
            Utc::now().date_naive().format("%Y-%m-%d")
        );
        let pdf = std::fs::read(temp.path().join(&expected)).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("[ Generating PDF... ] (disabled)"));
        assert!(printed.contains(">> SUCCESS:"));
    }

    #[test]
    fn invalid_email_never_reaches_the_exporter() {
        let temp = TempDir::new().unwrap();
        let mut inputs = jane();
        inputs.client_email = "jane.example.com".to_string();
        let mut out = Vec::new();

        let view = Session::new(EffectRunner::new(settings(temp.path())), &mut out)
            .run(&inputs)
            .unwrap();

        assert!(view.error_visible());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains(">> ERROR: ❌ Please enter a valid email address"));
        assert!(!printed.contains("Generating PDF"));
    }

    #[test]
    fn rejected_export_restores_button_and_shows_error() {
        let temp = TempDir::new().unwrap();
        let handle = ExportHandle::with_exporter(Arc::new(RejectingExporter));
        let runner = EffectRunner::with_handle(handle, settings(temp.path()));

        let view = Session::new(runner, Vec::new()).run(&jane()).unwrap();

        assert!(view.error_visible());
        assert!(!view.success_visible());
        assert!(view.submit.enabled);
        assert_eq!(view.submit.label, contract_core::SUBMIT_LABEL);
        assert_eq!(
            view.banner.unwrap().message,
            contract_core::EXPORT_FAILED_MESSAGE
        );
    }
}
