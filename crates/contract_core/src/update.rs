use crate::view_model::{Banner, BannerKind, EXPORT_FAILED_MESSAGE};
use crate::{
    format_long_date, validate_snapshot, Effect, ExportJob, FieldStyle, FormState, Msg,
    Submission,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FormState, msg: Msg) -> (FormState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded { today, reference } => {
            state.set_display(format_long_date(today), reference);
            Vec::new()
        }
        Msg::FieldChanged { field, value } => {
            state.set_input(field, value);
            Vec::new()
        }
        Msg::FieldFocused(field) => {
            state.set_style(field, FieldStyle::Active);
            Vec::new()
        }
        Msg::FieldBlurred(field) => {
            // Blurring an empty input keeps whatever style it already has.
            if !state.input(field).trim().is_empty() {
                state.set_style(field, FieldStyle::Filled);
            }
            Vec::new()
        }
        Msg::SubmitClicked { today } => {
            // The button is disabled while an export runs.
            if state.submission() != Submission::Idle {
                return (state, Vec::new());
            }

            state.clear_banner();
            let snapshot = state.snapshot();
            if let Err(err) = validate_snapshot(&snapshot) {
                state.show_banner(Banner::error(err.to_string()));
                return (state, vec![Effect::ScrollIntoView(BannerKind::Error)]);
            }

            let job = ExportJob {
                snapshot,
                date_label: state.date_label().to_string(),
                reference: state
                    .reference()
                    .map(|r| r.to_string())
                    .unwrap_or_default(),
                issued_on: today,
            };
            let job_id = state.begin_export();
            vec![Effect::ExportContract { job_id, job }]
        }
        Msg::ExportFinished { job_id, result } => {
            if state.submission() != (Submission::Exporting { job_id }) {
                return (state, Vec::new());
            }

            state.finish_export();
            match result {
                Ok(()) => {
                    state.show_banner(Banner::success());
                    vec![Effect::ScrollIntoView(BannerKind::Success)]
                }
                Err(error) => {
                    state.show_banner(Banner::error(EXPORT_FAILED_MESSAGE));
                    vec![
                        Effect::LogExportFailure { job_id, error },
                        Effect::ScrollIntoView(BannerKind::Error),
                    ]
                }
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
