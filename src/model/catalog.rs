//! Catalog types: the immutable list of items each station may withdraw.

use std::collections::{BTreeSet, HashSet};

/// Errors that make a catalog unusable.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no items")]
    Empty,

    #[error("item {item_code} appears more than once at station {station}")]
    DuplicateItem { station: String, item_code: String },

    #[error("item code {item_code:?} at station {station} must be non-empty, without spaces, and not start with ':'")]
    InvalidItemCode { station: String, item_code: String },

    #[error("no station has a quota above zero")]
    NothingWithdrawable,
}

/// One catalog row: an item a station may withdraw, and how many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub station: String,
    pub item_code: String,
    pub item_name: String,
    pub allowed_quantity: u32,
}

/// The full catalog across all stations, in file order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Validates and wraps a list of entries.
    ///
    /// Rejects an empty list, item codes that cannot be typed as one word
    /// (empty, containing whitespace, or starting with the `:` command
    /// prefix), item codes repeated within a station, and catalogs where
    /// every quota is zero.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            let code = entry.item_code.as_str();
            if code.is_empty() || code.starts_with(':') || code.contains(char::is_whitespace) {
                return Err(CatalogError::InvalidItemCode {
                    station: entry.station.clone(),
                    item_code: entry.item_code.clone(),
                });
            }
            if !seen.insert((entry.station.as_str(), entry.item_code.as_str())) {
                return Err(CatalogError::DuplicateItem {
                    station: entry.station.clone(),
                    item_code: entry.item_code.clone(),
                });
            }
        }

        let catalog = Self { entries };
        if catalog.rotation().is_empty() {
            return Err(CatalogError::NothingWithdrawable);
        }
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries belonging to one station, in catalog order.
    pub fn station_entries<'a>(
        &'a self,
        station: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.iter().filter(move |e| e.station == station)
    }

    /// Looks up a single item at a station.
    pub fn find(&self, station: &str, item_code: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.station == station && e.item_code == item_code)
    }

    /// Every distinct station id, sorted.
    pub fn stations(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.station.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sum of allowed quantities at a station.
    pub fn total_quota(&self, station: &str) -> u64 {
        self.station_entries(station)
            .map(|e| u64::from(e.allowed_quantity))
            .sum()
    }

    /// Stations a session cycles through: sorted, skipping any station
    /// whose every quota is zero.
    ///
    /// A station with nothing to withdraw can never record a success,
    /// so it could never be left once entered.
    pub fn rotation(&self) -> Vec<&str> {
        self.stations()
            .into_iter()
            .filter(|s| self.total_quota(s) > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(station: &str, code: &str, qty: u32) -> CatalogEntry {
        CatalogEntry {
            station: station.into(),
            item_code: code.into(),
            item_name: format!("Item {code}"),
            allowed_quantity: qty,
        }
    }

    #[test]
    fn stations_are_sorted_and_distinct() {
        let catalog = Catalog::new(vec![
            entry("C", "301", 1),
            entry("A", "101", 2),
            entry("B", "201", 3),
            entry("A", "102", 1),
        ])
        .unwrap();

        assert_eq!(catalog.stations(), vec!["A", "B", "C"]);
    }

    #[test]
    fn station_entries_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            entry("A", "102", 1),
            entry("B", "201", 3),
            entry("A", "101", 2),
        ])
        .unwrap();

        let codes: Vec<&str> = catalog
            .station_entries("A")
            .map(|e| e.item_code.as_str())
            .collect();
        assert_eq!(codes, vec!["102", "101"]);
    }

    #[test]
    fn rotation_skips_zero_quota_stations() {
        let catalog = Catalog::new(vec![
            entry("A", "101", 2),
            entry("B", "201", 0),
            entry("B", "202", 0),
            entry("C", "301", 1),
        ])
        .unwrap();

        assert_eq!(catalog.stations(), vec!["A", "B", "C"]);
        assert_eq!(catalog.rotation(), vec!["A", "C"]);
    }

    #[test]
    fn find_is_scoped_to_station() {
        let catalog = Catalog::new(vec![entry("A", "101", 2), entry("B", "201", 3)]).unwrap();

        assert!(catalog.find("A", "101").is_some());
        assert!(catalog.find("B", "101").is_none());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = Catalog::new(vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn duplicate_item_within_station_is_rejected() {
        let err = Catalog::new(vec![entry("A", "101", 2), entry("A", "101", 1)]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateItem { .. }));
    }

    #[test]
    fn same_code_at_different_stations_is_allowed() {
        let catalog = Catalog::new(vec![entry("A", "101", 2), entry("B", "101", 1)]);
        assert!(catalog.is_ok());
    }

    #[test]
    fn find_returns_the_matching_item() {
        let catalog = Catalog::new(vec![entry("A", "101", 2), entry("B", "101", 5)]).unwrap();

        let found = catalog.find("B", "101").unwrap();
        assert_eq!(found.station, "B");
        assert_eq!(found.allowed_quantity, 5);
    }

    #[test]
    fn codes_that_cannot_be_typed_are_rejected() {
        for code in ["", ":history", "M6 bolt"] {
            let err = Catalog::new(vec![entry("A", code, 1)]).unwrap_err();
            assert!(
                matches!(err, CatalogError::InvalidItemCode { .. }),
                "code {code:?}"
            );
        }
    }

    #[test]
    fn command_words_are_ordinary_codes() {
        let catalog = Catalog::new(vec![entry("A", "history", 2), entry("A", "quit", 1)]);
        assert!(catalog.is_ok());
    }

    #[test]
    fn all_zero_quotas_are_rejected() {
        let err = Catalog::new(vec![entry("A", "101", 0)]).unwrap_err();
        assert!(matches!(err, CatalogError::NothingWithdrawable));
    }
}
