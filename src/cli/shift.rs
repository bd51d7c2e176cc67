//! Interactive withdrawal shift.
//!
//! Reads one request per line: `<item code> [quantity]`. Quantity defaults
//! to 1. Commands start with `:` (`:remaining`, `:history`, `:quit`), a
//! prefix no catalog item code may carry, so every code stays withdrawable.

use std::io::{BufRead, Write};

use crate::session::WithdrawalSession;
use crate::storage::LogSink;

use super::format::{format_history, format_snapshot};

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Withdraw { item_code: &'a str, quantity: u32 },
    BadQuantity(&'a str),
    UnknownCommand(&'a str),
    Remaining,
    History,
    Quit,
    Blank,
}

fn parse_line(line: &str) -> Input<'_> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Input::Blank;
    };

    if first.starts_with(':') {
        return match first {
            ":remaining" => Input::Remaining,
            ":history" => Input::History,
            ":quit" | ":exit" => Input::Quit,
            _ => Input::UnknownCommand(first),
        };
    }

    match words.next() {
        None => Input::Withdraw {
            item_code: first,
            quantity: 1,
        },
        Some(raw) => match raw.parse::<u32>() {
            Ok(quantity) if quantity >= 1 => Input::Withdraw {
                item_code: first,
                quantity,
            },
            _ => Input::BadQuantity(raw),
        },
    }
}

/// Runs the shift until `:quit` or end of input.
pub(super) fn run_shift<L, R, W>(
    session: &mut WithdrawalSession,
    log: &mut L,
    input: R,
    out: &mut W,
) -> Result<(), String>
where
    L: LogSink + ?Sized,
    R: BufRead,
    W: Write,
{
    let locale = session.locale();
    let io_err = |e: std::io::Error| format!("failed to write output: {e}");

    writeln!(out, "{}\n", format_snapshot(&session.snapshot(), locale)).map_err(io_err)?;

    for line in input.lines() {
        let line = line.map_err(|e| format!("failed to read input: {e}"))?;
        match parse_line(&line) {
            Input::Blank => {}
            Input::Quit => break,
            Input::Remaining => {
                writeln!(out, "{}\n", format_snapshot(&session.snapshot(), locale))
                    .map_err(io_err)?;
            }
            Input::History => {
                let records = session
                    .station_history(log)
                    .map_err(|e| format!("failed to load history: {e}"))?;
                writeln!(out, "{}\n", format_history(&records, locale)).map_err(io_err)?;
            }
            Input::BadQuantity(raw) => {
                writeln!(out, "{}\n", locale.bad_quantity(raw)).map_err(io_err)?;
            }
            Input::UnknownCommand(word) => {
                writeln!(out, "{}\n", locale.unknown_command(word)).map_err(io_err)?;
            }
            Input::Withdraw {
                item_code,
                quantity,
            } => {
                let outcome = session
                    .submit(log, item_code, quantity)
                    .map_err(|e| format!("failed to record withdrawal: {e}"))?;
                writeln!(
                    out,
                    "[{}] {}",
                    locale.status(outcome.status),
                    outcome.message
                )
                .map_err(io_err)?;
                if let Some(rotation) = &outcome.rotation {
                    writeln!(out, "{}", locale.rotated(&rotation.from, &rotation.to))
                        .map_err(io_err)?;
                }
                writeln!(out, "{}\n", format_snapshot(&outcome.snapshot, locale))
                    .map_err(io_err)?;
            }
        }
    }

    Ok(())
}
