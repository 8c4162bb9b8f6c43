use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::{ContractDocument, ExportOptions, PersistError};

pub type JobId = u64;

/// Where and how one export is written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub output_dir: PathBuf,
    pub filename: String,
    pub options: ExportOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub page_count: usize,
    pub bytes_written: u64,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid export options: {0}")]
    InvalidOptions(String),
    #[error("pdf rendering failed: {0}")]
    Render(#[from] lopdf::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("export worker unavailable: {0}")]
    Worker(String),
}

#[derive(Debug)]
pub enum ExportEvent {
    Completed {
        job_id: JobId,
        result: Result<ExportOutcome, ExportError>,
    },
}

/// Renders a content region to a document and persists it.
///
/// Implementations run to completion; there is no cancellation.
#[async_trait]
pub trait Exporter: Send + Sync {
    async fn export(
        &self,
        document: &ContractDocument,
        request: &ExportRequest,
    ) -> Result<ExportOutcome, ExportError>;
}
