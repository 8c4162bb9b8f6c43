use chrono::NaiveDate;

use crate::{ContractReference, Field, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The form was shown; fills the date and reference displays.
    PageLoaded {
        today: NaiveDate,
        reference: ContractReference,
    },
    /// User edited an input.
    FieldChanged { field: Field, value: String },
    /// Input gained focus.
    FieldFocused(Field),
    /// Input lost focus.
    FieldBlurred(Field),
    /// User clicked the submit button.
    SubmitClicked { today: NaiveDate },
    /// Export worker finished a job.
    ExportFinished {
        job_id: JobId,
        result: Result<(), String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
