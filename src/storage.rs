//! Persistence at the edges of a withdrawal session.
//!
//! The catalog is read once at startup from a TOML or JSON file.
//! Log records go to a [`LogSink`]:
//!
//! ```text
//! Ledger     # SQLite file, one row per submit
//! MemoryLog  # in-process, for dry runs
//! ```

mod catalog;
mod ledger;
mod memory;

use std::{io, path::PathBuf};

use crate::model::{CatalogError, LogRecord};

pub use catalog::load_catalog;
pub use ledger::Ledger;
pub use memory::MemoryLog;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unsupported catalog format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("corrupt log data: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Where withdrawal attempts are recorded.
///
/// Observably append-only: records are never changed or removed.
pub trait LogSink {
    /// Records one attempt.
    fn append(&mut self, record: &LogRecord) -> Result<()>;

    /// All records for a station, most recent first.
    fn history(&self, station: &str) -> Result<Vec<LogRecord>>;
}
