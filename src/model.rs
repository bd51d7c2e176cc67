//! Core data model: the catalog of station quotas and the withdrawal log.

mod catalog;
mod record;

pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use record::{LogRecord, Status, format_timestamp, now, parse_timestamp};
