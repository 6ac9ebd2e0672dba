//! Idempotent cover-page placement for a single workbook.
//!
//! Post-condition per successfully processed file: exactly one sheet whose
//! name equals the target title or contains the marker substring sits at
//! position 0, and no other sheet carries the target title.

use std::path::Path;

use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::config::PlacerConfig;
use crate::inspect::{self, SheetScan};
use crate::outcome::{FailureKind, Outcome};

/// Ensure the workbook at `path` has a cover sheet at position 0, cloning
/// `template` in when no sheet name contains the marker substring. The file
/// is saved in place; there is no backup and no rollback.
///
/// Every failure is captured in the returned [`Outcome`]; nothing
/// propagates past the per-file boundary.
pub fn process_file(path: &Path, template: &Worksheet, config: &PlacerConfig) -> Outcome {
    let scan = match inspect::scan_sheets(path, &config.marker_substring) {
        Ok(scan) => scan,
        Err(err) => {
            return Outcome::Failed {
                kind: FailureKind::Open,
                message: format!("{err:#}"),
            };
        }
    };

    match scan.marker_index {
        Some(index) => move_existing(path, &scan, index, config),
        None => insert_template(path, template, &scan, config),
    }
}

/// Found branch: reposition the first marker match to index 0, keeping the
/// relative order of every other sheet.
fn move_existing(path: &Path, scan: &SheetScan, index: usize, config: &PlacerConfig) -> Outcome {
    let sheet_name = scan.names[index].as_str();
    let target = config.target_sheet_title.as_str();

    // Renaming only happens when the target title is free; an unrelated
    // holder keeps its name and so does the match.
    let rename = config.rename_matches
        && sheet_name != target
        && !scan.names.iter().any(|n| n == target);

    if index == 0 && !rename {
        // Already leftmost: report without rewriting, leaving the on-disk
        // bytes untouched.
        return Outcome::Moved {
            sheet: sheet_name.to_string(),
            already_leftmost: true,
        };
    }

    let mut book = match open_for_write(path) {
        Ok(book) => book,
        Err(message) => {
            return Outcome::Failed {
                kind: FailureKind::Open,
                message,
            };
        }
    };

    // Resolve the index against the freshly opened workbook rather than
    // trusting the scan.
    let Some(index) = position_of(&book, sheet_name) else {
        return Outcome::Failed {
            kind: FailureKind::Open,
            message: format!(
                "sheet '{}' disappeared between scan and rewrite of {}",
                sheet_name,
                path.display()
            ),
        };
    };

    let mut final_name = sheet_name.to_string();
    if rename {
        if let Some(sheet) = book.get_sheet_by_name_mut(sheet_name) {
            sheet.set_name(target);
            final_name = target.to_string();
        }
    }

    let already_leftmost = index == 0;
    move_leftmost(&mut book, index);

    match save(&book, path) {
        Ok(()) => Outcome::Moved {
            sheet: final_name,
            already_leftmost,
        },
        Err(message) => Outcome::Failed {
            kind: FailureKind::Save,
            message,
        },
    }
}

/// Not-found branch: clone the template in under the target title and move
/// it leftmost. If an unrelated sheet already holds the target title, the
/// clone is created under a disambiguated name, the old holder is deleted
/// and the clone takes the title: the fresh clone always wins.
fn insert_template(
    path: &Path,
    template: &Worksheet,
    scan: &SheetScan,
    config: &PlacerConfig,
) -> Outcome {
    let mut book = match open_for_write(path) {
        Ok(book) => book,
        Err(message) => {
            return Outcome::Failed {
                kind: FailureKind::Open,
                message,
            };
        }
    };

    let target = config.target_sheet_title.as_str();
    let insert_title = free_title(&scan.names, target);
    let replaced_existing = insert_title != target;

    // Register a fresh sheet first so the workbook assigns it a proper
    // sheet id, then swap the template copy in behind that identity.
    if let Err(err) = book.new_sheet(insert_title.as_str()) {
        return Outcome::Failed {
            kind: FailureKind::Save,
            message: format!("could not create sheet '{insert_title}': {err}"),
        };
    }
    if let Some(sheet) = book.get_sheet_by_name_mut(insert_title.as_str()) {
        *sheet = template.clone();
        sheet.set_name(insert_title.as_str());
    }

    if replaced_existing {
        if book.remove_sheet_by_name(target).is_err() {
            return Outcome::Failed {
                kind: FailureKind::Save,
                message: format!(
                    "could not replace existing sheet '{}' in {}",
                    target,
                    path.display()
                ),
            };
        }
        if let Some(sheet) = book.get_sheet_by_name_mut(insert_title.as_str()) {
            sheet.set_name(target);
        }
    }

    let Some(index) = position_of(&book, target) else {
        return Outcome::Failed {
            kind: FailureKind::Save,
            message: format!(
                "inserted sheet '{}' not found in {}",
                target,
                path.display()
            ),
        };
    };
    move_leftmost(&mut book, index);

    match save(&book, path) {
        Ok(()) => Outcome::Inserted { replaced_existing },
        Err(message) => Outcome::Failed {
            kind: FailureKind::Save,
            message,
        },
    }
}

/// Smallest free title: the target itself, otherwise "<target> (n)" with
/// the lowest free n >= 2.
fn free_title(names: &[String], target: &str) -> String {
    if !names.iter().any(|n| n == target) {
        return target.to_string();
    }
    let mut counter = 2usize;
    loop {
        let candidate = format!("{target} ({counter})");
        if !names.iter().any(|n| n == &candidate) {
            return candidate;
        }
        counter += 1;
    }
}

fn position_of(book: &Spreadsheet, name: &str) -> Option<usize> {
    book.get_sheet_collection()
        .iter()
        .position(|sheet| sheet.get_name() == name)
}

/// Remove the sheet at `index` and reinsert it at position 0. The relative
/// order of every other sheet is preserved, and the moved sheet becomes the
/// active tab.
fn move_leftmost(book: &mut Spreadsheet, index: usize) {
    if index != 0 {
        let sheets = book.get_sheet_collection_mut();
        let sheet = sheets.remove(index);
        sheets.insert(0, sheet);
    }
    book.set_active_sheet(0);
}

fn open_for_write(path: &Path) -> Result<Spreadsheet, String> {
    umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|err| format!("could not open {}: {}", path.display(), err))
}

fn save(book: &Spreadsheet, path: &Path) -> Result<(), String> {
    umya_spreadsheet::writer::xlsx::write(book, path)
        .map_err(|err| format!("could not save {}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_free_title_prefers_target() {
        assert_eq!(
            free_title(&names(&["Summary", "Data"]), "CUI Cover Page"),
            "CUI Cover Page"
        );
    }

    #[test]
    fn test_free_title_counts_past_collisions() {
        assert_eq!(
            free_title(&names(&["Cover Sheet"]), "Cover Sheet"),
            "Cover Sheet (2)"
        );
        assert_eq!(
            free_title(
                &names(&["Cover Sheet", "Cover Sheet (2)", "Cover Sheet (3)"]),
                "Cover Sheet"
            ),
            "Cover Sheet (4)"
        );
    }

    #[test]
    fn test_move_leftmost_preserves_relative_order() {
        let mut book = umya_spreadsheet::new_file();
        book.get_sheet_by_name_mut("Sheet1").unwrap().set_name("A");
        book.new_sheet("B").unwrap();
        book.new_sheet("C").unwrap();
        book.new_sheet("D").unwrap();

        let index = position_of(&book, "C").unwrap();
        move_leftmost(&mut book, index);

        let order: Vec<&str> = book
            .get_sheet_collection()
            .iter()
            .map(|s| s.get_name())
            .collect();
        assert_eq!(order, vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_move_leftmost_is_noop_at_zero() {
        let mut book = umya_spreadsheet::new_file();
        book.get_sheet_by_name_mut("Sheet1").unwrap().set_name("A");
        book.new_sheet("B").unwrap();

        move_leftmost(&mut book, 0);

        let order: Vec<&str> = book
            .get_sheet_collection()
            .iter()
            .map(|s| s.get_name())
            .collect();
        assert_eq!(order, vec!["A", "B"]);
    }
}
