//! CLI interface for Quota.
//!
//! `quota shift` is the interactive surface a worker uses at the line.
//! The other subcommands are read-only views over the catalog and the log.

mod format;
mod shift;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::model::Catalog;
use crate::session::WithdrawalSession;
use crate::storage::{self, Ledger, LogSink, MemoryLog};

use format::{format_catalog, format_history};

/// Quota: draw down station material quotas.
#[derive(Debug, Parser)]
#[command(name = "quota", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Config file (default: `~/.quota/config.toml`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file, overriding the config.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Ledger (SQLite) file, overriding the config.
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    /// More diagnostic output on stderr. Repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: a withdrawal shift
  1. quota stations
  2. quota shift
     > 101 2        withdraw 2 of item 101
     > 102          withdraw 1 of item 102
     > :history     this station's log, newest first
     > :quit
  3. quota history --station A --json"#;

#[derive(Debug, Subcommand)]
enum Command {
    /// Start an interactive withdrawal shift.
    ///
    /// Moves to the next station automatically once every quota at the
    /// current one is used up.
    Shift {
        /// Station to start at (default: config `start-station`, then the first station).
        #[arg(long)]
        station: Option<String>,

        /// Keep the log in memory only; nothing is written to the ledger.
        #[arg(long)]
        dry_run: bool,
    },

    /// List stations in rotation order.
    Stations,

    /// Show catalog entries.
    Catalog {
        /// Only this station's entries.
        #[arg(long)]
        station: Option<String>,
    },

    /// Show a station's log, newest first.
    History {
        #[arg(long)]
        station: String,

        /// Print a JSON array instead of a table.
        #[arg(long)]
        json: bool,
    },
}

/// Run the parsed CLI, returning an error message on failure.
pub fn run(cli: Cli, mut config: Config) -> Result<(), String> {
    apply_overrides(&mut config, cli.catalog, cli.ledger);

    match cli.command {
        Command::Shift { station, dry_run } => {
            let catalog = load_catalog(&config)?;
            let carried = start_station(station, &config);
            let mut session = WithdrawalSession::new(catalog, carried.as_deref(), config.locale);
            eprintln!(
                "Shift {} started at station {}",
                &session.id().to_string()[..8],
                session.station()
            );

            let stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            if dry_run {
                let mut log = MemoryLog::new();
                shift::run_shift(&mut session, &mut log, stdin, &mut stdout)?;
                eprintln!("Dry run: {} attempt(s) not saved", log.records().len());
                Ok(())
            } else {
                let mut ledger = open_ledger(&config)?;
                shift::run_shift(&mut session, &mut ledger, stdin, &mut stdout)
            }
        }
        Command::Stations => cmd_stations(&load_catalog(&config)?),
        Command::Catalog { station } => {
            let catalog = load_catalog(&config)?;
            println!(
                "{}",
                format_catalog(&catalog, station.as_deref(), config.locale)
            );
            Ok(())
        }
        Command::History { station, json } => {
            let ledger = open_ledger(&config)?;
            cmd_history(&ledger, &station, json, &config)
        }
    }
}

/// `--catalog` and `--ledger` win over the config file.
fn apply_overrides(config: &mut Config, catalog: Option<PathBuf>, ledger: Option<PathBuf>) {
    if let Some(path) = catalog {
        config.catalog = path;
    }
    if let Some(path) = ledger {
        config.ledger = path;
    }
}

/// `--station`, then config `start-station`. `None` starts at the first station.
fn start_station(flag: Option<String>, config: &Config) -> Option<String> {
    flag.or_else(|| config.start_station.clone())
}

fn load_catalog(config: &Config) -> Result<Catalog, String> {
    storage::load_catalog(&config.catalog)
        .map_err(|e| format!("failed to load catalog {}: {e}", config.catalog.display()))
}

fn open_ledger(config: &Config) -> Result<Ledger, String> {
    Ledger::open(&config.ledger)
        .map_err(|e| format!("failed to open ledger {}: {e}", config.ledger.display()))
}

fn cmd_stations(catalog: &Catalog) -> Result<(), String> {
    let rotation = catalog.rotation();
    for station in catalog.stations() {
        let items = catalog.station_entries(station).count();
        let total = catalog.total_quota(station);
        let note = if rotation.contains(&station) {
            ""
        } else {
            "  (skipped: no quota)"
        };
        println!("{station}  {items} item(s), {total} total{note}");
    }
    Ok(())
}

fn cmd_history(
    log: &impl LogSink,
    station: &str,
    json: bool,
    config: &Config,
) -> Result<(), String> {
    let records = log
        .history(station)
        .map_err(|e| format!("failed to load history: {e}"))?;

    if json {
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| format!("failed to serialize history: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", format_history(&records, config.locale));
    }
    Ok(())
}
