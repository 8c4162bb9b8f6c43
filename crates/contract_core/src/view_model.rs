use crate::{Field, FieldStyle};

pub const SUBMIT_LABEL: &str = "Generate Contract PDF";
pub const SUBMIT_LOADING_LABEL: &str = "Generating PDF...";
pub const EXPORT_SUCCESS_MESSAGE: &str = "✅ Contract PDF generated successfully!";
pub const EXPORT_FAILED_MESSAGE: &str =
    "❌ Failed to generate PDF. Please try again or contact support.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// The single visible message region; at most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success() -> Self {
        Self {
            kind: BannerKind::Success,
            message: EXPORT_SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormViewModel {
    pub date_label: String,
    pub reference: String,
    pub fields: Vec<FieldView>,
    pub banner: Option<Banner>,
    pub submit: SubmitButtonView,
    pub dirty: bool,
}

impl FormViewModel {
    pub fn field(&self, field: Field) -> Option<&FieldView> {
        self.fields.iter().find(|view| view.field == field)
    }

    pub fn success_visible(&self) -> bool {
        matches!(&self.banner, Some(b) if b.kind == BannerKind::Success)
    }

    pub fn error_visible(&self) -> bool {
        matches!(&self.banner, Some(b) if b.kind == BannerKind::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    pub style: FieldStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButtonView {
    pub enabled: bool,
    pub loading: bool,
    pub label: &'static str,
}

impl Default for SubmitButtonView {
    fn default() -> Self {
        Self {
            enabled: true,
            loading: false,
            label: SUBMIT_LABEL,
        }
    }
}
