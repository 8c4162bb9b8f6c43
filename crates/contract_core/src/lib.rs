//! Contract form core: pure state machine, validation and view-model helpers.
mod effect;
mod msg;
mod reference;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::{Effect, ExportJob};
pub use msg::Msg;
pub use reference::{format_long_date, generate_reference, ContractReference};
pub use state::{Field, FieldStyle, FormSnapshot, FormState, JobId, Submission};
pub use update::update;
pub use validate::{is_valid_email, validate_snapshot, ValidationError};
pub use view_model::{
    Banner, BannerKind, FieldView, FormViewModel, SubmitButtonView, EXPORT_FAILED_MESSAGE,
    EXPORT_SUCCESS_MESSAGE, SUBMIT_LABEL, SUBMIT_LOADING_LABEL,
};
