//! Catalog loading: read station quotas from a TOML or JSON file.
//!
//! Each row needs `station`, `code`, `name`, and `allowed`. Rows exported
//! from the legacy spreadsheet, headed `站別`, `料號`, `物料名稱`, `可領數量`,
//! load as-is. Spreadsheet exports often write numbers as `101.0`; whole
//! floats are accepted wherever a number is.
//!
//! ```toml
//! [[item]]
//! station = "A"
//! code = "101"
//! name = "M6 bolt"
//! allowed = 2
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Deserializer, de};

use crate::model::{Catalog, CatalogEntry};

use super::{Result, StorageError};

#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    item: Vec<Row>,
}

#[derive(Deserialize)]
struct Row {
    #[serde(alias = "站別")]
    station: Cell,
    #[serde(alias = "料號")]
    code: Cell,
    #[serde(alias = "物料名稱")]
    name: String,
    #[serde(alias = "可領數量", deserialize_with = "quantity")]
    allowed: u32,
}

/// A station id or item code, written as text or as a bare number.
#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Cell {
    #[allow(clippy::float_cmp)]
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Integer(n) => n.to_string(),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
            Self::Float(f) => f.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Integer(i64),
    Float(f64),
}

/// An allowed quantity: a non-negative whole number that fits in `u32`.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)] // range checked before the cast
fn quantity<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let whole = match Number::deserialize(deserializer)? {
        Number::Integer(n) => n,
        Number::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => f as i64,
        Number::Float(f) => {
            return Err(de::Error::custom(format!(
                "allowed quantity must be a whole number, got {f}"
            )));
        }
    };
    u32::try_from(whole).map_err(|_| {
        de::Error::custom(format!(
            "allowed quantity must be between 0 and {}, got {whole}",
            u32::MAX
        ))
    })
}

impl From<Row> for CatalogEntry {
    fn from(row: Row) -> Self {
        Self {
            station: row.station.into_text(),
            item_code: row.code.into_text(),
            item_name: row.name,
            allowed_quantity: row.allowed,
        }
    }
}

/// Loads and validates a catalog, picking the parser from the file extension.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let format = path.extension().and_then(|e| e.to_str());
    let rows: Vec<Row> = match format {
        Some("toml") => {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<TomlCatalog>(&contents)?.item
        }
        Some("json") => {
            let contents = fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        }
        _ => return Err(StorageError::UnsupportedFormat(path.to_path_buf())),
    };

    let catalog = Catalog::new(rows.into_iter().map(CatalogEntry::from).collect())?;
    tracing::debug!(
        path = %path.display(),
        items = catalog.entries().len(),
        stations = catalog.stations().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::CatalogError;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_toml_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "materials.toml",
            r#"
[[item]]
station = "A"
code = "102"
name = "Washer"
allowed = 1

[[item]]
station = "A"
code = 101
name = "Bolt"
allowed = 2
"#,
        );

        let catalog = load_catalog(&path).unwrap();
        let codes: Vec<&str> = catalog
            .entries()
            .iter()
            .map(|e| e.item_code.as_str())
            .collect();
        assert_eq!(codes, vec!["102", "101"]);
        assert_eq!(catalog.entries()[1].allowed_quantity, 2);
    }

    #[test]
    fn loads_json_with_spreadsheet_headers() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "materials.json",
            r#"[{"站別": "B", "料號": 201, "物料名稱": "螺絲", "可領數量": 3}]"#,
        );

        let catalog = load_catalog(&path).unwrap();
        let entry = &catalog.entries()[0];
        assert_eq!(entry.station, "B");
        assert_eq!(entry.item_code, "201");
        assert_eq!(entry.item_name, "螺絲");
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "materials.json",
            r#"[{"station": "A", "code": "101", "name": "Bolt"}]"#,
        );

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[test]
    fn negative_quantity_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "materials.toml",
            "[[item]]\nstation = \"A\"\ncode = \"101\"\nname = \"Bolt\"\nallowed = -1\n",
        );

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, StorageError::Toml(_)));
    }

    #[test]
    fn whole_floats_from_spreadsheet_exports_load() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "materials.json",
            r#"[{"station": "A", "code": 101.0, "name": "Bolt", "allowed": 2.0}]"#,
        );

        let catalog = load_catalog(&path).unwrap();
        let entry = &catalog.entries()[0];
        assert_eq!(entry.item_code, "101");
        assert_eq!(entry.allowed_quantity, 2);
    }

    #[test]
    fn fractional_quantity_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "materials.toml",
            "[[item]]\nstation = \"A\"\ncode = \"101\"\nname = \"Bolt\"\nallowed = 2.5\n",
        );

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, StorageError::Toml(_)));
    }

    #[test]
    fn quantity_above_u32_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "materials.json",
            r#"[{"station": "A", "code": "101", "name": "Bolt", "allowed": 4294967296}]"#,
        );

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[test]
    fn empty_toml_is_an_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "materials.toml", "");

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, StorageError::Catalog(CatalogError::Empty)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_catalog(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "materials.xlsx", "");

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedFormat(_)));
    }
}
