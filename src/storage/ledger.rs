//! Ledger: the SQLite-backed withdrawal log.
//!
//! One table, one row per submit. The file and table are created on first
//! open; later opens append to what is already there.

use std::path::Path;

use rusqlite::Connection;

use crate::model::{LogRecord, Status, format_timestamp, parse_timestamp};

use super::{LogSink, Result, StorageError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS withdrawals (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    session   TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    station   TEXT NOT NULL,
    item_code TEXT NOT NULL,
    quantity  INTEGER NOT NULL,
    status    TEXT NOT NULL,
    message   TEXT NOT NULL
)";

pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    /// Opens the ledger at `path`, creating the file and schema if missing.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = %path.display(), "ledger opened");
        Ok(Self { conn })
    }

    /// Number of records across all stations.
    #[cfg(test)]
    pub fn count(&self) -> Result<u64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM withdrawals", [], |row| row.get(0))?;
        u64::try_from(n).map_err(|e| StorageError::Corrupt(format!("negative count: {e}")))
    }
}

impl LogSink for Ledger {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO withdrawals
                (session, timestamp, station, item_code, quantity, status, message)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                record.session.to_string(),
                format_timestamp(record.timestamp),
                &record.station,
                &record.item_code,
                record.quantity,
                record.status.as_str(),
                &record.message,
            ],
        )?;
        Ok(())
    }

    fn history(&self, station: &str) -> Result<Vec<LogRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT session, timestamp, station, item_code, quantity, status, message
             FROM withdrawals
             WHERE station = ?1
             ORDER BY timestamp DESC, id DESC",
        )?;
        let rows = stmt.query_map([station], |row| {
            Ok(RawRow {
                session: row.get(0)?,
                timestamp: row.get(1)?,
                station: row.get(2)?,
                item_code: row.get(3)?,
                quantity: row.get(4)?,
                status: row.get(5)?,
                message: row.get(6)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.into_record()?);
        }
        Ok(records)
    }
}

/// A row as stored, before its text columns are parsed.
struct RawRow {
    session: String,
    timestamp: String,
    station: String,
    item_code: String,
    quantity: u32,
    status: String,
    message: String,
}

impl RawRow {
    fn into_record(self) -> Result<LogRecord> {
        let session = self
            .session
            .parse()
            .map_err(|e| StorageError::Corrupt(format!("invalid session id: {e}")))?;
        let timestamp = parse_timestamp(&self.timestamp)
            .map_err(|e| StorageError::Corrupt(format!("invalid timestamp: {e}")))?;
        let status = Status::parse(&self.status)
            .ok_or_else(|| StorageError::Corrupt(format!("unknown status: {}", self.status)))?;

        Ok(LogRecord {
            session,
            timestamp,
            station: self.station,
            item_code: self.item_code,
            quantity: self.quantity,
            status,
            message: self.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn test_ledger() -> (TempDir, Ledger) {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::open(&dir.path().join("log.sqlite")).unwrap();
        (dir, ledger)
    }

    fn record(station: &str, minute: i8, status: Status) -> LogRecord {
        LogRecord {
            session: Uuid::new_v4(),
            timestamp: date(2025, 3, 4).at(8, minute, 0, 0),
            station: station.into(),
            item_code: "101".into(),
            quantity: 1,
            status,
            message: format!("at minute {minute}"),
        }
    }

    #[test]
    fn open_creates_empty_ledger() {
        let (_dir, ledger) = test_ledger();
        assert_eq!(ledger.count().unwrap(), 0);
        assert!(ledger.history("A").unwrap().is_empty());
    }

    #[test]
    fn append_and_load_history() {
        let (_dir, mut ledger) = test_ledger();
        let rec = record("A", 1, Status::Success);

        ledger.append(&rec).unwrap();

        let history = ledger.history("A").unwrap();
        assert_eq!(history, vec![rec]);
    }

    #[test]
    fn history_is_newest_first_and_filtered() {
        let (_dir, mut ledger) = test_ledger();
        ledger.append(&record("A", 1, Status::Success)).unwrap();
        ledger.append(&record("B", 2, Status::Success)).unwrap();
        ledger.append(&record("A", 3, Status::Error)).unwrap();

        let history = ledger.history("A").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].message, "at minute 3");
        assert_eq!(history[1].message, "at minute 1");
        assert!(history.iter().all(|r| r.station == "A"));
        assert_eq!(ledger.count().unwrap(), 3);
    }

    #[test]
    fn same_second_records_keep_reverse_insertion_order() {
        let (_dir, mut ledger) = test_ledger();
        let mut first = record("A", 1, Status::Success);
        first.message = "first".into();
        let mut second = record("A", 1, Status::Error);
        second.message = "second".into();

        ledger.append(&first).unwrap();
        ledger.append(&second).unwrap();

        let history = ledger.history("A").unwrap();
        assert_eq!(history[0].message, "second");
        assert_eq!(history[1].message, "first");
    }

    #[test]
    fn reopening_appends_to_existing_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.sqlite");

        Ledger::open(&path)
            .unwrap()
            .append(&record("A", 1, Status::Success))
            .unwrap();
        let mut reopened = Ledger::open(&path).unwrap();
        reopened.append(&record("A", 2, Status::Success)).unwrap();

        assert_eq!(reopened.count().unwrap(), 2);
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("log.sqlite");

        Ledger::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unknown_status_is_corrupt() {
        let (_dir, ledger) = test_ledger();
        ledger
            .conn
            .execute(
                "INSERT INTO withdrawals
                    (session, timestamp, station, item_code, quantity, status, message)
                 VALUES (?1, '2025-03-04 08:00:00', 'A', '101', 1, 'maybe', '')",
                [Uuid::new_v4().to_string()],
            )
            .unwrap();

        let err = ledger.history("A").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
