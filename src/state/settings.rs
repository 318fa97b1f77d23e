/// Application settings
///
/// Read once at startup from a JSON file in the user's config directory:
/// - Linux: ~/.config/bg-remover/settings.json
/// - macOS: ~/Library/Application Support/bg-remover/settings.json
/// - Windows: %APPDATA%\bg-remover\settings.json
///
/// Missing keys take their default value. The file is never written by the app.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data::OutputFormat;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Background removal command: program followed by its arguments.
    /// It must read an image on stdin and write the cutout to stdout.
    pub transform_command: Vec<String>,

    /// Interval between two polls of the result queue
    pub poll_interval_ms: u64,

    /// Bounding box of the preview surface in pixels
    pub preview_width: u32,
    pub preview_height: u32,

    /// Minimum batch size for which a merged PDF is offered
    pub document_threshold: usize,

    /// Format selected when the app starts
    pub default_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transform_command: vec!["rembg".into(), "i".into(), "-".into(), "-".into()],
            poll_interval_ms: 100,
            preview_width: 500,
            preview_height: 300,
            document_threshold: 4,
            default_format: OutputFormat::Png,
        }
    }
}

impl Settings {
    /// Path of the settings file, if a config directory is known
    pub fn path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("bg-remover");
        path.push("settings.json");
        Some(path)
    }

    /// Load settings, falling back to defaults when the file is absent or invalid
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => return Self::default(),
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("⚙️  Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("⚠️  Ignoring invalid settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "poll_interval_ms": 250, "default_format": "tiff" }"#)
            .unwrap();

        assert_eq!(settings.poll_interval(), Duration::from_millis(250));
        assert_eq!(settings.default_format, OutputFormat::Tiff);
        assert_eq!(settings.document_threshold, 4);
        assert_eq!(settings.transform_command, Settings::default().transform_command);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_custom_command() {
        let settings =
            Settings::from_json(r#"{ "transform_command": ["python", "-m", "rembg.cli", "i", "-", "-"] }"#)
                .unwrap();
        assert_eq!(settings.transform_command[0], "python");
        assert_eq!(settings.preview_width, 500);
    }
}
