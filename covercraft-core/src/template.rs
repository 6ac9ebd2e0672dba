//! Template workbook loading

use std::path::Path;

use umya_spreadsheet::Worksheet;

use crate::error::TemplateError;

/// Load the template workbook and return an owned copy of its first sheet.
///
/// The copy is a deep structural clone: cell values and styles, column and
/// row dimensions, merged ranges, page setup, margins, print options and
/// frozen panes all come along, so inserting it into another workbook
/// reproduces the template exactly.
pub fn load_template_sheet(path: &Path) -> Result<Worksheet, TemplateError> {
    if !path.exists() {
        return Err(TemplateError::Missing(path.to_path_buf()));
    }

    let book =
        umya_spreadsheet::reader::xlsx::read(path).map_err(|err| TemplateError::Unreadable {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    book.get_sheet_collection()
        .first()
        .cloned()
        .ok_or_else(|| TemplateError::Empty(path.to_path_buf()))
}
