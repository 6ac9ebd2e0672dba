//! Core library for the cover-page placement and watchlist tools.
//!
//! The placer walks a directory tree and guarantees that every workbook
//! carries a designated cover sheet at the leftmost position, cloning it
//! from a template workbook where it is missing. The watchlist module is
//! the companion tool: it resolves a free-text title against a catalog API
//! and appends the result as a row to an existing workbook.

pub mod batch;
pub mod config;
pub mod error;
pub mod inspect;
pub mod outcome;
pub mod placer;
pub mod template;
pub mod watchlist;

pub use batch::run_batch;
pub use config::{AppConfig, PlacerConfig, WatchlistConfig};
pub use error::{AppendError, CatalogError, TemplateError};
pub use outcome::{BatchSummary, FailureKind, FileReport, Outcome};
pub use placer::process_file;
pub use template::load_template_sheet;
