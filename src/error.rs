/// Error types for the background remover
///
/// Errors fall into three families:
/// - Selection errors stop a batch before it starts (shown as a dialog)
/// - Per-item errors skip one image and are only logged
/// - Finalization errors end a batch and are shown as a dialog

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by the external background-removal routine
#[derive(Debug, Error)]
pub enum TransformError {
    /// The segmentation program could not be launched
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Piping data to or from the program failed
    #[error("I/O error while talking to the transform: {0}")]
    Io(#[from] io::Error),

    /// The program ran but reported an error
    #[error("transform exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// Any other failure raised by an in-process routine
    #[error("{0}")]
    Other(String),
}

/// Why a single image could not be processed
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("background removal failed: {0}")]
    Transform(#[from] TransformError),

    #[error("transform returned an undecodable image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Problems detected when the user asks to start a batch
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please select one or more images.")]
    NoInputs,

    #[error("Please select an output folder.")]
    NoOutputFolder,

    #[error("The output folder {} does not exist.", .0.display())]
    OutputFolderMissing(PathBuf),

    #[error("A batch is already being processed.")]
    BatchInProgress,
}

/// Errors returned when launching a batch
#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("failed to start the worker thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Writing a single output image failed
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors from assembling or saving the merged document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("the document has no pages")]
    Empty,

    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to save document: {0}")]
    Io(#[from] io::Error),
}

/// Errors that end a batch without a clean finish
#[derive(Debug, Error)]
pub enum FinalizationError {
    #[error("could not write the merged document to {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("the worker stopped before finishing the batch")]
    WorkerLost,
}
