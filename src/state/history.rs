use chrono::{DateTime, Local};
use std::path::PathBuf;

/// One produced output (an image file or a merged document)
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub path: PathBuf,
    pub recorded_at: DateTime<Local>,
}

/// Append-only list of outputs produced during this run.
/// Lives in memory only and starts empty on every launch.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Record a finalized output
    pub fn push(&mut self, path: PathBuf) {
        self.entries.push(HistoryEntry {
            path,
            recorded_at: Local::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were produced
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut history = History::default();
        assert!(history.is_empty());

        history.push(PathBuf::from("/out/Result_1.png"));
        history.push(PathBuf::from("/out/Results.pdf"));

        let paths: Vec<_> = history.entries().iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("/out/Result_1.png"), PathBuf::from("/out/Results.pdf")]
        );
        assert!(history.entries()[0].recorded_at <= history.entries()[1].recorded_at);
    }
}
