//! Typed per-file outcomes aggregated by the batch driver

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What went wrong while processing a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// File could not be opened (corrupt, unsupported format, locked)
    Open,
    /// Workbook could not be written back (disk full, permissions, locked)
    Save,
}

/// Result of processing one workbook. Failures are values, not exceptions;
/// they never escape the per-file boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// An existing marker sheet was repositioned leftmost (or already sat
    /// there)
    Moved {
        sheet: String,
        already_leftmost: bool,
    },
    /// The template was cloned in as a new leftmost sheet
    Inserted {
        /// An unrelated sheet held the target title and was replaced
        replaced_existing: bool,
    },
    /// Processing failed; the file on disk was left as it was
    Failed { kind: FailureKind, message: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Outcome of one file, tagged with its path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Aggregated results of a batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    pub fn push(&mut self, path: PathBuf, outcome: Outcome) {
        self.reports.push(FileReport { path, outcome });
    }

    pub fn moved(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Moved { .. }))
            .count()
    }

    pub fn inserted(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Inserted { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_failure()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut summary = BatchSummary::default();
        summary.push(
            PathBuf::from("a.xlsx"),
            Outcome::Moved {
                sheet: "CUI Cover Page".to_string(),
                already_leftmost: true,
            },
        );
        summary.push(
            PathBuf::from("b.xlsx"),
            Outcome::Inserted {
                replaced_existing: false,
            },
        );
        summary.push(
            PathBuf::from("c.xlsx"),
            Outcome::Failed {
                kind: FailureKind::Open,
                message: "corrupt".to_string(),
            },
        );

        assert_eq!(summary.moved(), 1);
        assert_eq!(summary.inserted(), 1);
        assert_eq!(summary.failed(), 1);
        assert!(summary.has_failures());
    }

    #[test]
    fn test_empty_summary_has_no_failures() {
        let summary = BatchSummary::default();
        assert_eq!(summary.failed(), 0);
        assert!(!summary.has_failures());
    }
}
