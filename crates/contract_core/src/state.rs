use std::collections::BTreeMap;

use crate::view_model::{Banner, FieldView, FormViewModel, SubmitButtonView};
use crate::{ContractReference, SUBMIT_LABEL, SUBMIT_LOADING_LABEL};

pub type JobId = u64;

/// Inputs on the contract form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    ClientName,
    ClientEmail,
    ClientContact,
    SetupCost,
    MonthlyCost,
}

impl Field {
    /// Form order.
    pub const ALL: [Field; 5] = [
        Field::ClientName,
        Field::ClientEmail,
        Field::ClientContact,
        Field::SetupCost,
        Field::MonthlyCost,
    ];

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Field::ClientName | Field::ClientEmail | Field::ClientContact
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::ClientName => "Client Name",
            Field::ClientEmail => "Client Email",
            Field::ClientContact => "Contact Number",
            Field::SetupCost => "Setup Cost",
            Field::MonthlyCost => "Monthly Cost",
        }
    }
}

/// Field values as read at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSnapshot {
    pub client_name: String,
    pub client_email: String,
    pub client_contact: String,
    pub setup_cost: String,
    pub monthly_cost: String,
}

impl FormSnapshot {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ClientName => &self.client_name,
            Field::ClientEmail => &self.client_email,
            Field::ClientContact => &self.client_contact,
            Field::SetupCost => &self.setup_cost,
            Field::MonthlyCost => &self.monthly_cost,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::ClientName => &mut self.client_name,
            Field::ClientEmail => &mut self.client_email,
            Field::ClientContact => &mut self.client_contact,
            Field::SetupCost => &mut self.setup_cost,
            Field::MonthlyCost => &mut self.monthly_cost,
        };
        *slot = value;
    }
}

/// Cosmetic input styling toggled on focus and blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStyle {
    #[default]
    Active,
    Filled,
}

impl FieldStyle {
    pub fn background(self) -> &'static str {
        match self {
            FieldStyle::Active => "#ffffff",
            FieldStyle::Filled => "#f9fafb",
        }
    }

    /// `None` leaves the stylesheet border in place.
    pub fn border(self) -> Option<&'static str> {
        match self {
            FieldStyle::Active => None,
            FieldStyle::Filled => Some("#d1d5db"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Exporting { job_id: JobId },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    date_label: String,
    reference: Option<ContractReference>,
    inputs: FormSnapshot,
    styles: BTreeMap<Field, FieldStyle>,
    banner: Option<Banner>,
    submission: Submission,
    next_job_id: JobId,
    dirty: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> FormViewModel {
        let fields = Field::ALL
            .into_iter()
            .map(|field| FieldView {
                field,
                label: field.label(),
                value: self.inputs.get(field).to_string(),
                required: field.is_required(),
                style: self.style(field),
            })
            .collect();
        let exporting = matches!(self.submission, Submission::Exporting { .. });

        FormViewModel {
            date_label: self.date_label.clone(),
            reference: self
                .reference
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_default(),
            fields,
            banner: self.banner.clone(),
            submit: SubmitButtonView {
                enabled: !exporting,
                loading: exporting,
                label: if exporting {
                    SUBMIT_LOADING_LABEL
                } else {
                    SUBMIT_LABEL
                },
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn submission(&self) -> Submission {
        self.submission
    }

    pub fn style(&self, field: Field) -> FieldStyle {
        self.styles.get(&field).copied().unwrap_or_default()
    }

    /// Current input values, as a submit would read them.
    pub fn snapshot(&self) -> FormSnapshot {
        self.inputs.clone()
    }

    pub(crate) fn date_label(&self) -> &str {
        &self.date_label
    }

    pub(crate) fn reference(&self) -> Option<&ContractReference> {
        self.reference.as_ref()
    }

    pub(crate) fn input(&self, field: Field) -> &str {
        self.inputs.get(field)
    }

    pub(crate) fn set_display(&mut self, date_label: String, reference: ContractReference) {
        self.date_label = date_label;
        self.reference = Some(reference);
        self.mark_dirty();
    }

    pub(crate) fn set_input(&mut self, field: Field, value: String) {
        if self.inputs.get(field) != value {
            self.inputs.set(field, value);
            self.mark_dirty();
        }
    }

    pub(crate) fn set_style(&mut self, field: Field, style: FieldStyle) {
        if self.style(field) != style {
            self.styles.insert(field, style);
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_banner(&mut self) {
        if self.banner.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn show_banner(&mut self, banner: Banner) {
        self.banner = Some(banner);
        self.mark_dirty();
    }

    pub(crate) fn begin_export(&mut self) -> JobId {
        self.next_job_id += 1;
        let job_id = self.next_job_id;
        self.submission = Submission::Exporting { job_id };
        self.mark_dirty();
        job_id
    }

    pub(crate) fn finish_export(&mut self) {
        self.submission = Submission::Idle;
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
