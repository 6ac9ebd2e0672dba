//! Error taxonomy shared by the placer and the watchlist tools

use std::path::PathBuf;
use thiserror::Error;

/// Template problems are fatal to the whole run: with nothing to insert
/// there is no per-file fallback.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template workbook not found: {0}")]
    Missing(PathBuf),
    #[error("could not read template workbook {path}: {message}")]
    Unreadable { path: PathBuf, message: String },
    #[error("template workbook has no sheets: {0}")]
    Empty(PathBuf),
}

/// Catalog API failures. Never retried; one failed lookup ends the
/// invocation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog returned HTTP {0}")]
    Status(u16),
    #[error("no catalog results for '{0}'")]
    NoResults(String),
}

/// Failures while appending to the watchlist workbook
#[derive(Debug, Error)]
pub enum AppendError {
    /// The workbook must already exist; nothing is created in its place
    #[error("watchlist workbook not found: {0}")]
    MissingWorkbook(PathBuf),
    #[error("could not open watchlist workbook {path}: {message}")]
    Open { path: PathBuf, message: String },
    #[error("could not save watchlist workbook {path}: {message}")]
    Save { path: PathBuf, message: String },
}
