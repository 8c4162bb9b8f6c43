use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use studio_logging::{studio_debug, studio_error};

use crate::{
    ContractDocument, ExportError, ExportEvent, ExportRequest, Exporter, JobId, PdfExporter,
};

enum ExportCommand {
    Export {
        job_id: JobId,
        document: ContractDocument,
        request: ExportRequest,
    },
}

/// Background export worker. Jobs run on a tokio runtime owned by a dedicated
/// thread; completions come back through [`ExportHandle::recv`] and its polling
/// variants.
pub struct ExportHandle {
    cmd_tx: mpsc::Sender<ExportCommand>,
    event_rx: mpsc::Receiver<ExportEvent>,
}

impl ExportHandle {
    pub fn new() -> Self {
        Self::with_exporter(Arc::new(PdfExporter))
    }

    pub fn with_exporter(exporter: Arc<dyn Exporter>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    studio_error!("Export runtime failed to start: {}", err);
                    reject_all(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let exporter = exporter.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(handle_command(exporter, command, event_tx));
            }
            // Let in-flight exports finish before the runtime drops.
            runtime.shutdown_timeout(Duration::from_secs(30));
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(
        &self,
        job_id: JobId,
        document: ContractDocument,
        request: ExportRequest,
    ) -> Result<(), ExportError> {
        self.cmd_tx
            .send(ExportCommand::Export {
                job_id,
                document,
                request,
            })
            .map_err(|_| ExportError::Worker("export thread has stopped".to_string()))
    }

    /// Blocks until the next completion; `None` once the worker is gone.
    pub fn recv(&self) -> Option<ExportEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<ExportEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ExportEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl Default for ExportHandle {
    fn default() -> Self {
        Self::new()
    }
}

async fn handle_command(
    exporter: Arc<dyn Exporter>,
    command: ExportCommand,
    event_tx: mpsc::Sender<ExportEvent>,
) {
    match command {
        ExportCommand::Export {
            job_id,
            document,
            request,
        } => {
            studio_debug!("Export job_id={} filename={}", job_id, request.filename);
            // A panicking exporter still has to report its job.
            let task = tokio::spawn(async move { exporter.export(&document, &request).await });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => {
                    studio_error!("Export job_id={} aborted: {}", job_id, err);
                    Err(ExportError::Worker(format!("export task aborted: {err}")))
                }
            };
            let _ = event_tx.send(ExportEvent::Completed { job_id, result });
        }
    }
}

fn reject_all(
    cmd_rx: mpsc::Receiver<ExportCommand>,
    event_tx: mpsc::Sender<ExportEvent>,
    reason: &str,
) {
    while let Ok(ExportCommand::Export { job_id, .. }) = cmd_rx.recv() {
        let _ = event_tx.send(ExportEvent::Completed {
            job_id,
            result: Err(ExportError::Worker(reason.to_string())),
        });
    }
}
