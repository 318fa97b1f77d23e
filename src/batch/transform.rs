/// Background removal routine
///
/// The segmentation itself is an external collaborator. The worker only
/// sees the `ImageTransform` trait, so any routine (an external program,
/// an in-process model, a test closure) can be plugged in.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use crate::error::TransformError;

/// Turns encoded image bytes into encoded image bytes with the background removed
pub trait ImageTransform: Send + Sync {
    fn transform(&self, input: &[u8]) -> Result<Vec<u8>, TransformError>;
}

impl<F> ImageTransform for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>, TransformError> + Send + Sync,
{
    fn transform(&self, input: &[u8]) -> Result<Vec<u8>, TransformError> {
        self(input)
    }
}

/// Runs an external segmentation program over stdin/stdout.
///
/// The default is `rembg i - -`, which reads an image on stdin and
/// writes a PNG cutout to stdout.
#[derive(Debug, Clone)]
pub struct CommandTransform {
    program: String,
    args: Vec<String>,
}

impl CommandTransform {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a full command line split into words (program first).
    /// Returns None for an empty command.
    pub fn from_command_line(words: &[String]) -> Option<Self> {
        let (program, args) = words.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

impl Default for CommandTransform {
    fn default() -> Self {
        Self::new("rembg", vec!["i".into(), "-".into(), "-".into()])
    }
}

impl ImageTransform for CommandTransform {
    fn transform(&self, input: &[u8]) -> Result<Vec<u8>, TransformError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TransformError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| TransformError::Other("transform stdin unavailable".into()))?;

        // Feed stdin from a second thread so a chatty child can't deadlock us
        let output = thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(input));
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (output, written)
        });

        let (output, written) = output;
        let output = output?;

        if !output.status.success() {
            return Err(TransformError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // A broken pipe only matters if the program also failed
        if let Err(e) = written {
            log::debug!("Transform closed stdin early: {}", e);
        }

        Ok(output.stdout)
    }
}
