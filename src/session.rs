//! Withdrawal session: the station and quota state machine.
//!
//! A session sits at exactly one station at a time and tracks how much of
//! each item is still withdrawable there. Every submit is recorded in the log,
//! whatever its outcome. When a successful withdrawal leaves nothing at the
//! station, the session moves on to the next station in sorted order, wrapping
//! after the last, with quotas rebuilt fresh from the catalog.

use std::collections::HashMap;

use jiff::civil::DateTime;
use uuid::Uuid;

use crate::locale::Locale;
use crate::model::{self, Catalog, LogRecord, Status};
use crate::storage::{self, LogSink};

/// The current station and its remaining quotas.
pub struct WithdrawalSession {
    id: Uuid,
    catalog: Catalog,
    locale: Locale,
    /// Rotation order. Never empty: [`Catalog::new`] guarantees a withdrawable station.
    stations: Vec<String>,
    current: usize,
    /// Keyed by item code; holds exactly the current station's items.
    remaining: HashMap<String, u32>,
}

/// One row of the remaining-quantity table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemainingItem {
    pub item_code: String,
    pub item_name: String,
    pub remaining: u32,
}

/// The current station and what can still be withdrawn there, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub station: String,
    pub items: Vec<RemainingItem>,
}

/// The session moved to another station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    pub from: String,
    pub to: String,
}

/// What a submit did.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub status: Status,
    pub message: String,
    pub rotation: Option<Rotation>,
    pub snapshot: Snapshot,
}

#[cfg(test)]
impl SubmitOutcome {
    pub fn rotated(&self) -> bool {
        self.rotation.is_some()
    }
}

/// How a request is resolved before anything is recorded.
enum Verdict {
    UnknownItem,
    Insufficient { max: u32 },
    Granted { item_name: String },
}

impl WithdrawalSession {
    /// Starts a session over `catalog`.
    ///
    /// Begins at `carried` when it names a station in the rotation,
    /// otherwise at the first station.
    pub fn new(catalog: Catalog, carried: Option<&str>, locale: Locale) -> Self {
        let skipped: Vec<&str> = catalog
            .stations()
            .into_iter()
            .filter(|s| catalog.total_quota(s) == 0)
            .collect();
        if !skipped.is_empty() {
            tracing::warn!(?skipped, "stations with no quota left out of rotation");
        }

        let stations: Vec<String> = catalog.rotation().into_iter().map(String::from).collect();
        let current = match carried {
            None => 0,
            Some(station) => stations.iter().position(|s| s == station).unwrap_or_else(|| {
                tracing::warn!(station, "carried-over station not in rotation, starting at first");
                0
            }),
        };

        let mut session = Self {
            id: Uuid::new_v4(),
            catalog,
            locale,
            stations,
            current,
            remaining: HashMap::new(),
        };
        session.refill();
        tracing::info!(
            session = %session.id,
            station = session.station(),
            stations = session.stations.len(),
            "session started"
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The current station id.
    pub fn station(&self) -> &str {
        &self.stations[self.current]
    }

    pub fn snapshot(&self) -> Snapshot {
        let station = self.station();
        let items = self
            .catalog
            .station_entries(station)
            .filter_map(|e| {
                self.remaining.get(&e.item_code).map(|&left| RemainingItem {
                    item_code: e.item_code.clone(),
                    item_name: e.item_name.clone(),
                    remaining: left,
                })
            })
            .collect();
        Snapshot {
            station: station.to_string(),
            items,
        }
    }

    /// Log records for the current station, most recent first.
    pub fn station_history<L: LogSink + ?Sized>(&self, log: &L) -> storage::Result<Vec<LogRecord>> {
        log.history(self.station())
    }

    /// Attempts to withdraw `quantity` of `item_code` at the current station.
    ///
    /// Unknown items and over-quota requests are not errors here: they come
    /// back as [`Status::Error`] and are logged like any other attempt. Only a
    /// failing log sink is an `Err`, in which case nothing changed.
    pub fn submit<L: LogSink + ?Sized>(
        &mut self,
        log: &mut L,
        item_code: &str,
        quantity: u32,
    ) -> storage::Result<SubmitOutcome> {
        self.submit_at(log, item_code, quantity, model::now())
    }

    fn submit_at<L: LogSink + ?Sized>(
        &mut self,
        log: &mut L,
        item_code: &str,
        quantity: u32,
        at: DateTime,
    ) -> storage::Result<SubmitOutcome> {
        let station = self.station().to_string();

        let verdict = match self.remaining.get(item_code) {
            None => Verdict::UnknownItem,
            Some(&left) if quantity > left => Verdict::Insufficient { max: left },
            Some(_) => Verdict::Granted {
                item_name: self
                    .catalog
                    .find(&station, item_code)
                    .map(|e| e.item_name.clone())
                    .unwrap_or_default(),
            },
        };

        let (status, message) = match &verdict {
            Verdict::UnknownItem => (Status::Error, self.locale.unknown_item()),
            Verdict::Insufficient { max } => (Status::Error, self.locale.insufficient(*max)),
            Verdict::Granted { item_name } => {
                (Status::Success, self.locale.withdrawn(quantity, item_name))
            }
        };

        log.append(&LogRecord {
            session: self.id,
            timestamp: at,
            station: station.clone(),
            item_code: item_code.to_string(),
            quantity,
            status,
            message: message.clone(),
        })?;

        let mut rotation = None;
        if let Verdict::Granted { .. } = verdict {
            if let Some(left) = self.remaining.get_mut(item_code) {
                *left -= quantity;
            }
            if self.remaining.values().all(|&left| left == 0) {
                rotation = Some(self.rotate());
            }
        } else {
            tracing::debug!(station = %station, item_code, quantity, %message, "submit rejected");
        }

        Ok(SubmitOutcome {
            status,
            message,
            rotation,
            snapshot: self.snapshot(),
        })
    }

    /// Advances to the next station and rebuilds its quotas from the catalog.
    fn rotate(&mut self) -> Rotation {
        let from = self.station().to_string();
        self.current = (self.current + 1) % self.stations.len();
        self.refill();
        let to = self.station().to_string();

        tracing::info!(session = %self.id, from = %from, to = %to, "station rotated");
        Rotation { from, to }
    }

    /// Resets remaining quotas to the catalog's allowed quantities for the current station.
    fn refill(&mut self) {
        let station = &self.stations[self.current];
        self.remaining = self
            .catalog
            .station_entries(station)
            .map(|e| (e.item_code.clone(), e.allowed_quantity))
            .collect();
    }
}
