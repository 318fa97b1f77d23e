use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::data::{BatchPlan, OutputFormat, OutputTarget};
use super::history::History;
use crate::batch::{ActiveBatch, ImageTransform, PollReport};
use crate::error::{SelectionError, StartError};

/// The Session holds everything the UI handlers act on:
/// the selected inputs, the output target, the history of produced
/// files and the batch currently running, if any.
#[derive(Debug, Default)]
pub struct Session {
    inputs: Vec<PathBuf>,
    output_folder: Option<PathBuf>,
    format: OutputFormat,
    history: History,
    batch: Option<ActiveBatch>,
}

impl Session {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Replace the selected inputs wholesale
    pub fn set_inputs(&mut self, inputs: Vec<PathBuf>) {
        self.inputs = inputs;
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    pub fn set_output_folder(&mut self, folder: PathBuf) {
        self.output_folder = Some(folder);
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn batch(&self) -> Option<&ActiveBatch> {
        self.batch.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.batch.is_some()
    }

    /// Whether the start action should be enabled.
    /// The output folder is only checked when the batch starts.
    pub fn can_start(&self) -> bool {
        !self.inputs.is_empty() && !self.is_processing()
    }

    /// Whether the user should be asked about merging into one document
    pub fn offers_document_mode(&self, threshold: usize) -> bool {
        self.inputs.len() >= threshold
    }

    /// Validate that a batch can start, returning the output folder
    pub fn check_ready(&self) -> Result<&Path, SelectionError> {
        if self.is_processing() {
            return Err(SelectionError::BatchInProgress);
        }
        if self.inputs.is_empty() {
            return Err(SelectionError::NoInputs);
        }

        let folder = self
            .output_folder
            .as_deref()
            .ok_or(SelectionError::NoOutputFolder)?;
        if !folder.is_dir() {
            return Err(SelectionError::OutputFolderMissing(folder.to_path_buf()));
        }

        Ok(folder)
    }

    /// Snapshot inputs and output target for a new batch
    pub fn plan(&self, document_mode: bool) -> Result<BatchPlan, SelectionError> {
        let folder = self.check_ready()?;

        Ok(BatchPlan {
            inputs: self.inputs.clone(),
            target: OutputTarget {
                folder: folder.to_path_buf(),
                format: self.format,
                document_mode,
            },
        })
    }

    /// Start processing the current selection on a worker thread.
    /// Rejected while another batch is still running.
    pub fn start_batch(
        &mut self,
        document_mode: bool,
        transform: Arc<dyn ImageTransform>,
    ) -> Result<(), StartError> {
        let plan = self.plan(document_mode)?;
        self.batch = Some(ActiveBatch::start(plan, transform)?);
        Ok(())
    }

    /// Apply whatever the worker has produced since the last poll.
    /// Returns None when no batch is running.
    pub fn poll(&mut self) -> Option<PollReport> {
        let batch = self.batch.as_mut()?;
        let report = batch.poll(&mut self.history);

        if report.finished.is_some() {
            self.batch = None;
        }

        Some(report)
    }
}
