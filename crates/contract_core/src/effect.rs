use chrono::NaiveDate;

use crate::{BannerKind, FormSnapshot, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Render the contract content region and save it as a PDF.
    ExportContract { job_id: JobId, job: ExportJob },
    /// Bring the banner of the given kind into view.
    ScrollIntoView(BannerKind),
    /// Record a diagnostic entry for a failed export.
    LogExportFailure { job_id: JobId, error: String },
}

/// Everything the export needs, captured at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub snapshot: FormSnapshot,
    pub date_label: String,
    pub reference: String,
    /// Date stamped into the output filename.
    pub issued_on: NaiveDate,
}
