use std::sync::Once;

use chrono::NaiveDate;
use contract_core::{
    update, BannerKind, ContractReference, Effect, Field, FormState, Msg, Submission,
    EXPORT_FAILED_MESSAGE, EXPORT_SUCCESS_MESSAGE, SUBMIT_LABEL, SUBMIT_LOADING_LABEL,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(studio_logging::initialize_for_tests);
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 27).unwrap()
}

fn loaded() -> FormState {
    let now = today().and_hms_opt(14, 30, 0).unwrap();
    let (state, _) = update(
        FormState::new(),
        Msg::PageLoaded {
            today: today(),
            reference: ContractReference::from_parts(&now, 5847),
        },
    );
    state
}

fn fill(mut state: FormState, values: &[(Field, &str)]) -> FormState {
    for (field, value) in values {
        let (next, _) = update(
            state,
            Msg::FieldChanged {
                field: *field,
                value: value.to_string(),
            },
        );
        state = next;
    }
    state
}

fn valid_form() -> FormState {
    fill(
        loaded(),
        &[
            (Field::ClientName, "Jane Doe"),
            (Field::ClientEmail, "jane@example.com"),
            (Field::ClientContact, "0821234567"),
            (Field::SetupCost, "R 1 500"),
        ],
    )
}

fn submit(state: FormState) -> (FormState, Vec<Effect>) {
    update(state, Msg::SubmitClicked { today: today() })
}

fn export_job_id(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ExportContract { job_id, .. } => Some(*job_id),
            _ => None,
        })
        .expect("export effect")
}

#[test]
fn page_load_fills_date_and_reference() {
    init_logging();
    let mut state = loaded();
    let view = state.view();

    assert_eq!(view.date_label, "27 October 2025");
    assert_eq!(view.reference, "251027-1430-5847");
    assert!(view.banner.is_none());
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn blank_or_whitespace_required_fields_block_export() {
    init_logging();
    let cases: [&[(Field, &str)]; 5] = [
        &[],
        &[(Field::ClientEmail, "jane@example.com"), (Field::ClientContact, "082")],
        &[(Field::ClientName, "Jane"), (Field::ClientContact, "082")],
        &[(Field::ClientName, "Jane"), (Field::ClientEmail, "jane@example.com")],
        &[
            (Field::ClientName, "   "),
            (Field::ClientEmail, "jane@example.com"),
            (Field::ClientContact, "\t"),
        ],
    ];

    for values in cases {
        let (state, effects) = submit(fill(loaded(), values));
        let view = state.view();

        assert!(view.error_visible(), "case {values:?}");
        assert!(!view.success_visible());
        assert_eq!(
            view.banner.unwrap().message,
            "❌ Please fill in all required fields (marked with *)"
        );
        assert_eq!(effects, vec![Effect::ScrollIntoView(BannerKind::Error)]);
        assert_eq!(state.submission(), Submission::Idle);
    }
}

#[test]
fn malformed_email_blocks_export() {
    init_logging();
    let state = fill(valid_form(), &[(Field::ClientEmail, "jane@example")]);
    let (state, effects) = submit(state);
    let view = state.view();

    assert_eq!(
        view.banner.unwrap().message,
        "❌ Please enter a valid email address"
    );
    assert!(view.submit.enabled);
    assert_eq!(effects, vec![Effect::ScrollIntoView(BannerKind::Error)]);
}

#[test]
fn valid_submit_disables_button_and_emits_export() {
    init_logging();
    let (state, effects) = submit(valid_form());
    let view = state.view();

    assert!(!view.submit.enabled);
    assert!(view.submit.loading);
    assert_eq!(view.submit.label, SUBMIT_LOADING_LABEL);
    assert!(view.banner.is_none());

    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::ExportContract { job_id, job } => {
            assert_eq!(*job_id, 1);
            assert_eq!(job.snapshot.client_name, "Jane Doe");
            assert_eq!(job.snapshot.setup_cost, "R 1 500");
            assert_eq!(job.snapshot.monthly_cost, "");
            assert_eq!(job.date_label, "27 October 2025");
            assert_eq!(job.reference, "251027-1430-5847");
            assert_eq!(job.issued_on, today());
        }
        other => panic!("unexpected effect {other:?}"),
    }
    assert_eq!(state.submission(), Submission::Exporting { job_id: 1 });
}

#[test]
fn export_success_restores_button_and_shows_only_success() {
    init_logging();
    let (state, effects) = submit(valid_form());
    let job_id = export_job_id(&effects);

    let (state, effects) = update(
        state,
        Msg::ExportFinished {
            job_id,
            result: Ok(()),
        },
    );
    let view = state.view();

    assert!(view.submit.enabled);
    assert_eq!(view.submit.label, SUBMIT_LABEL);
    assert!(view.success_visible());
    assert!(!view.error_visible());
    assert_eq!(view.banner.unwrap().message, EXPORT_SUCCESS_MESSAGE);
    assert_eq!(effects, vec![Effect::ScrollIntoView(BannerKind::Success)]);
}

#[test]
fn export_failure_restores_button_logs_and_shows_only_error() {
    init_logging();
    let (state, effects) = submit(valid_form());
    let job_id = export_job_id(&effects);

    let (state, effects) = update(
        state,
        Msg::ExportFinished {
            job_id,
            result: Err("disk full".to_string()),
        },
    );
    let view = state.view();

    assert!(view.submit.enabled);
    assert!(!view.submit.loading);
    assert_eq!(view.submit.label, SUBMIT_LABEL);
    assert!(view.error_visible());
    assert!(!view.success_visible());
    assert_eq!(view.banner.unwrap().message, EXPORT_FAILED_MESSAGE);
    assert_eq!(
        effects,
        vec![
            Effect::LogExportFailure {
                job_id,
                error: "disk full".to_string(),
            },
            Effect::ScrollIntoView(BannerKind::Error),
        ]
    );
}

#[test]
fn submit_while_exporting_is_ignored() {
    init_logging();
    let (mut state, _) = submit(valid_form());
    assert!(state.consume_dirty());

    let (mut state, effects) = submit(state);

    assert!(effects.is_empty());
    assert_eq!(state.submission(), Submission::Exporting { job_id: 1 });
    assert!(!state.consume_dirty());
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, _) = submit(valid_form());
    let before = state.view();

    let (state, effects) = update(
        state,
        Msg::ExportFinished {
            job_id: 99,
            result: Ok(()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}

#[test]
fn resubmit_after_success_clears_previous_banner() {
    init_logging();
    let (state, effects) = submit(valid_form());
    let (state, _) = update(
        state,
        Msg::ExportFinished {
            job_id: export_job_id(&effects),
            result: Ok(()),
        },
    );
    assert!(state.view().success_visible());

    let state = fill(state, &[(Field::ClientEmail, "broken")]);
    let (state, _) = submit(state);
    let view = state.view();
    assert!(view.error_visible());
    assert!(!view.success_visible());

    let state = fill(state, &[(Field::ClientEmail, "jane@example.com")]);
    let (state, effects) = submit(state);
    assert!(state.view().banner.is_none());
    assert_eq!(export_job_id(&effects), 2);
}
