/// UI-side consumer of a running batch
///
/// `ActiveBatch::poll` is called on every UI tick. It drains whatever the
/// worker has produced so far, writes outputs, and finalizes the batch
/// once the sentinel arrives. The UI thread never blocks on the worker.

use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::queue::{work_queue, QueueConsumer, QueueState};
use super::transform::ImageTransform;
use super::worker::{self, WorkerHandle};
use crate::error::{FinalizationError, StartError};
use crate::output::document::{document_path, DocumentBuilder};
use crate::output::writer::{result_path, save_image};
use crate::state::data::{BatchPlan, OutputTarget, ResultRecord};
use crate::state::history::History;

/// A successfully handled input
#[derive(Debug)]
pub struct Processed {
    pub source_path: PathBuf,
    /// Written file, or None when the image became a document page
    pub output_path: Option<PathBuf>,
    pub image: DynamicImage,
}

/// Totals reported when a batch finishes cleanly
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Path of the merged document, if one was written
    pub document: Option<PathBuf>,
}

/// What one poll observed
#[derive(Debug, Default)]
pub struct PollReport {
    pub processed: Vec<Processed>,
    pub failures: usize,
    /// Set once the batch is over
    pub finished: Option<Result<BatchSummary, FinalizationError>>,
}

/// A batch whose worker has been launched
pub struct ActiveBatch {
    target: OutputTarget,
    total: usize,
    consumer: QueueConsumer,
    worker: Option<WorkerHandle>,
    document: Option<DocumentBuilder>,
    succeeded: usize,
    failed: usize,
}

impl ActiveBatch {
    /// Launch the worker for a plan
    pub fn start(plan: BatchPlan, transform: Arc<dyn ImageTransform>) -> Result<Self, StartError> {
        let BatchPlan { inputs, target } = plan;
        let total = inputs.len();
        let (producer, consumer) = work_queue();

        let worker = worker::spawn(inputs, transform, producer).map_err(StartError::Spawn)?;
        let document = target.document_mode.then(DocumentBuilder::new);

        log::info!(
            "▶️  Batch started: {} images -> {} ({}{})",
            total,
            target.folder.display(),
            target.format,
            if target.document_mode { ", merged PDF" } else { "" }
        );

        Ok(Self {
            target,
            total,
            consumer,
            worker: Some(worker),
            document,
            succeeded: 0,
            failed: 0,
        })
    }

    /// Number of inputs in the batch
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of results applied so far
    pub fn completed(&self) -> usize {
        self.succeeded
    }

    /// Drain all available results and apply them.
    ///
    /// Never blocks. An empty queue yields an empty report.
    pub fn poll(&mut self, history: &mut History) -> PollReport {
        let drained = self.consumer.drain();
        let mut report = PollReport::default();

        for record in drained.records {
            match record {
                ResultRecord::Success { source_path, image } => {
                    match self.apply(&source_path, &image, history) {
                        Ok(output_path) => {
                            self.succeeded += 1;
                            report.processed.push(Processed {
                                source_path,
                                output_path,
                                image,
                            });
                        }
                        Err(message) => {
                            log::error!("❌ Error saving {}: {}", source_path.display(), message);
                            self.failed += 1;
                            report.failures += 1;
                        }
                    }
                }
                ResultRecord::Failure {
                    source_path,
                    error_message,
                } => {
                    log::error!("❌ Error processing {}: {}", source_path.display(), error_message);
                    self.failed += 1;
                    report.failures += 1;
                }
            }
        }

        report.finished = match drained.state {
            QueueState::Open => None,
            QueueState::Finished => Some(self.finalize(history)),
            QueueState::Disconnected => {
                self.reap_worker();
                Some(Err(FinalizationError::WorkerLost))
            }
        };

        report
    }

    /// Write one result as a file or a document page
    fn apply(
        &mut self,
        source_path: &Path,
        image: &DynamicImage,
        history: &mut History,
    ) -> Result<Option<PathBuf>, String> {
        if let Some(document) = self.document.as_mut() {
            document.add_page(image).map_err(|e| e.to_string())?;
            log::info!("📄 Added page {} from {}", document.page_count(), source_path.display());
            return Ok(None);
        }

        let path = result_path(&self.target.folder, history.len() + 1, self.target.format);
        save_image(image, &path, self.target.format).map_err(|e| e.to_string())?;
        history.push(path.clone());

        log::info!("📸 {} -> {}", source_path.display(), path.display());
        Ok(Some(path))
    }

    /// Handle the sentinel: write the merged document if there is one
    fn finalize(&mut self, history: &mut History) -> Result<BatchSummary, FinalizationError> {
        self.reap_worker();

        let mut summary = BatchSummary {
            succeeded: self.succeeded,
            failed: self.failed,
            document: None,
        };

        if let Some(document) = self.document.take() {
            if document.page_count() == 0 {
                log::warn!("⚠️  No images succeeded, skipping document");
            } else {
                let path = document_path(&self.target.folder);
                document
                    .write_to(&path)
                    .map_err(|source| FinalizationError::Document {
                        path: path.clone(),
                        source,
                    })?;
                history.push(path.clone());
                summary.document = Some(path);
            }
        }

        log::info!(
            "🏁 Batch complete: {} succeeded, {} failed",
            summary.succeeded,
            summary.failed
        );
        Ok(summary)
    }

    /// Join the worker thread once it has stopped producing
    fn reap_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            if !worker.is_finished() {
                log::debug!("Waiting for worker thread to exit");
            }
            if !worker.join() {
                log::error!("💥 Worker thread panicked");
            }
        }
    }
}

impl std::fmt::Debug for ActiveBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveBatch")
            .field("target", &self.target)
            .field("total", &self.total)
            .field("succeeded", &self.succeeded)
            .field("failed", &self.failed)
            .finish()
    }
}
