//! Contract engine: PDF export and effect execution.
mod document;
mod engine;
mod filename;
mod options;
mod pdf;
mod persist;
mod types;

pub use document::{Block, ContractDocument};
pub use engine::ExportHandle;
pub use filename::{contract_filename, DEFAULT_FILENAME_PREFIX};
pub use options::{
    CaptureOptions, ExportOptions, ImageFormat, ImageOptions, Orientation, PageBreakMode,
    PageFormat, PageOptions, Unit,
};
pub use pdf::{render_pdf, PdfExporter, RenderedPdf};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{ExportError, ExportEvent, ExportOutcome, ExportRequest, Exporter, JobId};
