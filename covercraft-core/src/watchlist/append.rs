//! Append a resolved entry to the watchlist workbook

use std::path::Path;

use crate::error::AppendError;

/// Append `row` after the last populated row of the active sheet and save
/// the workbook in place. Returns the 1-based row number that was written.
///
/// The workbook must already exist; a missing file is an error and nothing
/// is created in its place.
pub fn append_row(path: &Path, row: &[String; 7]) -> Result<u32, AppendError> {
    if !path.exists() {
        return Err(AppendError::MissingWorkbook(path.to_path_buf()));
    }

    let mut book = umya_spreadsheet::reader::xlsx::read(path).map_err(|err| AppendError::Open {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let sheet = book.get_active_sheet_mut();
    let next_row = sheet.get_highest_row() + 1;
    for (offset, value) in row.iter().enumerate() {
        sheet
            .get_cell_mut(((offset + 1) as u32, next_row))
            .set_value(value);
    }

    umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|err| AppendError::Save {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    Ok(next_row)
}
