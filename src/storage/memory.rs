//! In-process log sink: records live only as long as the shift.

use crate::model::LogRecord;

use super::{LogSink, Result};

#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Vec<LogRecord>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record, in append order.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }
}

impl LogSink for MemoryLog {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn history(&self, station: &str) -> Result<Vec<LogRecord>> {
        // Newest append first, then a stable sort keeps that order within a second.
        let mut history: Vec<LogRecord> = self
            .records
            .iter()
            .rev()
            .filter(|r| r.station == station)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(history)
    }
}
