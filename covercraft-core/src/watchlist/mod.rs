//! Watchlist companion: catalog lookup and spreadsheet row appending

pub mod append;
pub mod catalog;

pub use append::append_row;
pub use catalog::{CatalogClient, MediaKind, WatchlistEntry};
