//! Batch driver: walk a directory tree and place cover pages one file at a
//! time, strictly sequentially.

use std::path::Path;

use anyhow::{Result, anyhow};
use umya_spreadsheet::Worksheet;
use walkdir::WalkDir;

use crate::config::PlacerConfig;
use crate::outcome::BatchSummary;
use crate::placer;

/// Transient editor lock artifacts start with this prefix and must never be
/// touched.
pub const LOCK_FILE_PREFIX: &str = "~$";

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm"];

/// Whether a file name marks an editor lock file.
pub fn is_lock_artifact(file_name: &str) -> bool {
    file_name.starts_with(LOCK_FILE_PREFIX)
}

/// Whether the path carries a spreadsheet extension (case-insensitive).
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SPREADSHEET_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Walk `root` recursively and process every qualifying workbook in
/// filesystem-walk order.
///
/// Individual file failures are captured in the summary and never halt the
/// walk; only a missing root directory aborts the run.
pub fn run_batch(root: &Path, template: &Worksheet, config: &PlacerConfig) -> Result<BatchSummary> {
    if !root.is_dir() {
        return Err(anyhow!("root directory not found: {}", root.display()));
    }

    let mut summary = BatchSummary::default();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if is_lock_artifact(file_name) || !is_spreadsheet(path) {
            continue;
        }

        let outcome = placer::process_file(path, template, config);
        summary.push(path.to_path_buf(), outcome);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_artifacts_are_detected() {
        assert!(is_lock_artifact("~$report.xlsx"));
        assert!(!is_lock_artifact("report.xlsx"));
        assert!(!is_lock_artifact("re~$port.xlsx"));
    }

    #[test]
    fn test_spreadsheet_extensions() {
        assert!(is_spreadsheet(Path::new("a/b/report.xlsx")));
        assert!(is_spreadsheet(Path::new("report.xlsm")));
        assert!(is_spreadsheet(Path::new("REPORT.XLSX")));
        assert!(!is_spreadsheet(Path::new("report.xls")));
        assert!(!is_spreadsheet(Path::new("report.csv")));
        assert!(!is_spreadsheet(Path::new("report")));
    }
}
