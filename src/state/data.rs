/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the worker thread, the poller and the UI layer.

use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Raster formats offered for individual output files
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Tiff,
}

impl OutputFormat {
    /// Every format, in the order shown in the UI
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Png, OutputFormat::Jpg, OutputFormat::Tiff];

    /// Lower-case file extension used in output names
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Tiff => "tiff",
        }
    }

    /// Encoder used by the `image` crate
    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpg => ImageFormat::Jpeg,
            OutputFormat::Tiff => ImageFormat::Tiff,
        }
    }

    /// Whether the encoder can store an alpha channel
    pub fn supports_alpha(self) -> bool {
        !matches!(self, OutputFormat::Jpg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpg => "JPG",
            OutputFormat::Tiff => "TIFF",
        };
        f.write_str(label)
    }
}

/// Where and how a batch writes its results.
/// Snapshotted when a batch starts and never changed while it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTarget {
    /// Existing directory receiving the outputs
    pub folder: PathBuf,
    /// Format for individual files (ignored in document mode)
    pub format: OutputFormat,
    /// Merge every result into one `Results.pdf`
    pub document_mode: bool,
}

/// Everything the worker and poller need for one batch
#[derive(Debug, Clone)]
pub struct BatchPlan {
    /// Ordered input images
    pub inputs: Vec<PathBuf>,
    pub target: OutputTarget,
}

/// Outcome of processing one input image.
/// Produced once per input path, in input order.
#[derive(Debug)]
pub enum ResultRecord {
    Success {
        source_path: PathBuf,
        image: DynamicImage,
    },
    Failure {
        source_path: PathBuf,
        error_message: String,
    },
}

impl ResultRecord {
    /// Path of the input this record belongs to
    pub fn source_path(&self) -> &PathBuf {
        match self {
            ResultRecord::Success { source_path, .. } => source_path,
            ResultRecord::Failure { source_path, .. } => source_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions_are_lowercase() {
        for format in OutputFormat::ALL {
            let ext = format.extension();
            assert_eq!(ext, ext.to_lowercase());
        }
    }

    #[test]
    fn test_format_serializes_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Tiff).unwrap();
        assert_eq!(json, "\"tiff\"");
        let format: OutputFormat = serde_json::from_str("\"jpg\"").unwrap();
        assert_eq!(format, OutputFormat::Jpg);
    }

    #[test]
    fn test_only_jpg_drops_alpha() {
        assert!(OutputFormat::Png.supports_alpha());
        assert!(OutputFormat::Tiff.supports_alpha());
        assert!(!OutputFormat::Jpg.supports_alpha());
    }
}
