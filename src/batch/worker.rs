/// Batch worker
///
/// Processes the inputs one at a time on a dedicated thread and reports
/// each outcome through the work queue. A failing image never stops the
/// batch; the sentinel is always pushed last.

use image::DynamicImage;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::queue::QueueProducer;
use super::transform::ImageTransform;
use crate::error::ItemError;
use crate::state::data::ResultRecord;

/// Read, transform and decode a single image
pub fn process_one(path: &Path, transform: &dyn ImageTransform) -> Result<DynamicImage, ItemError> {
    let input = std::fs::read(path).map_err(|source| ItemError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let output = transform.transform(&input)?;
    let image = image::load_from_memory(&output)?;

    Ok(image)
}

/// Run a whole batch on the current thread.
/// Emits exactly one record per input, in order, then the sentinel.
pub fn run_batch(inputs: &[PathBuf], transform: &dyn ImageTransform, producer: QueueProducer) {
    log::info!("🚀 Processing {} images", inputs.len());

    for path in inputs {
        let record = match process_one(path, transform) {
            Ok(image) => ResultRecord::Success {
                source_path: path.clone(),
                image,
            },
            Err(e) => ResultRecord::Failure {
                source_path: path.clone(),
                error_message: e.to_string(),
            },
        };
        producer.push(record);
    }

    producer.finish();
    log::info!("✅ Worker finished batch of {}", inputs.len());
}

/// Handle on a running worker thread
#[derive(Debug)]
pub struct WorkerHandle {
    handle: JoinHandle<()>,
}

impl WorkerHandle {
    /// Whether the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker thread. Returns false if it panicked.
    pub fn join(self) -> bool {
        self.handle.join().is_ok()
    }
}

/// Launch the worker on its own thread
pub fn spawn(
    inputs: Vec<PathBuf>,
    transform: Arc<dyn ImageTransform>,
    producer: QueueProducer,
) -> io::Result<WorkerHandle> {
    let handle = thread::Builder::new()
        .name("bg-remover-worker".into())
        .spawn(move || run_batch(&inputs, transform.as_ref(), producer))?;

    Ok(WorkerHandle { handle })
}
