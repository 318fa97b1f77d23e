/// Batch processing module
///
/// This module handles the hand-off between the worker thread and the UI:
/// - The background-removal collaborator (transform.rs)
/// - The single-producer/single-consumer result queue (queue.rs)
/// - The sequential worker thread (worker.rs)
/// - The UI-side poller that applies results (poller.rs)

pub mod poller;
pub mod queue;
pub mod transform;
pub mod worker;

pub use poller::{ActiveBatch, BatchSummary, PollReport};
pub use transform::{CommandTransform, ImageTransform};
