//! Output formatting for CLI display.

use crate::locale::Locale;
use crate::model::{Catalog, LogRecord, format_timestamp};
use crate::session::Snapshot;

/// Lay out rows as left-aligned columns separated by two spaces.
///
/// Widths count chars, so wide (CJK) glyphs may drift slightly.
fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        line.join("  ").trim_end().to_string()
    };

    let mut lines = vec![render(header.to_vec())];
    lines.extend(
        rows.iter()
            .map(|row| render(row.iter().map(String::as_str).collect())),
    );
    lines.join("\n")
}

/// The current station heading followed by its remaining-quantity table.
pub(super) fn format_snapshot(snapshot: &Snapshot, locale: Locale) -> String {
    let h = locale.remaining_headers();
    let rows: Vec<Vec<String>> = snapshot
        .items
        .iter()
        .map(|i| {
            vec![
                i.item_code.clone(),
                i.item_name.clone(),
                i.remaining.to_string(),
            ]
        })
        .collect();
    format!(
        "{}\n{}",
        locale.current_station(&snapshot.station),
        table(&[h.code, h.name, h.remaining], &rows)
    )
}

pub(super) fn format_history(records: &[LogRecord], locale: Locale) -> String {
    if records.is_empty() {
        return locale.no_history().to_string();
    }
    let h = locale.history_headers();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                format_timestamp(r.timestamp),
                r.station.clone(),
                r.item_code.clone(),
                r.quantity.to_string(),
                locale.status(r.status).to_string(),
                r.message.clone(),
            ]
        })
        .collect();
    table(
        &[h.time, h.station, h.code, h.quantity, h.status, h.message],
        &rows,
    )
}

/// Catalog rows, optionally limited to one station.
pub(super) fn format_catalog(catalog: &Catalog, station: Option<&str>, locale: Locale) -> String {
    let h = locale.history_headers();
    let r = locale.remaining_headers();
    let rows: Vec<Vec<String>> = catalog
        .entries()
        .iter()
        .filter(|e| station.is_none_or(|s| e.station == s))
        .map(|e| {
            vec![
                e.station.clone(),
                e.item_code.clone(),
                e.item_name.clone(),
                e.allowed_quantity.to_string(),
            ]
        })
        .collect();
    table(&[h.station, r.code, r.name, h.quantity], &rows)
}
