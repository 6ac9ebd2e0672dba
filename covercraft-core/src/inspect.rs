//! Read-only workbook inspection using calamine

use anyhow::{Context, Result};
use calamine::open_workbook_auto;
use std::path::Path;

/// Sheet names of a workbook in display order, plus the first marker match.
#[derive(Debug, Clone)]
pub struct SheetScan {
    pub names: Vec<String>,
    /// Index of the first sheet whose name contains the marker substring
    pub marker_index: Option<usize>,
}

impl SheetScan {
    pub fn marker_sheet(&self) -> Option<&str> {
        self.marker_index.map(|i| self.names[i].as_str())
    }
}

/// Open a workbook read-only and locate the first sheet whose name contains
/// `marker`. The match is case-sensitive and the first sheet in current
/// left-to-right order wins.
pub fn scan_sheets(path: &Path, marker: &str) -> Result<SheetScan> {
    use calamine::Reader;

    let workbook = open_workbook_auto(path)
        .with_context(|| format!("could not open workbook: {}", path.display()))?;
    let names = workbook.sheet_names();
    let marker_index = names.iter().position(|name| name.contains(marker));
    Ok(SheetScan {
        names,
        marker_index,
    })
}
