//! Text rendering of reservations for the terminal.

use std::fmt::Write as _;

use crate::config::DisplayFormat;
use crate::error::Result;
use crate::reservation::Reservation;

const HEADERS: [&str; 7] = [
    "ID",
    "Passenger Name",
    "Flight No.",
    "Departure",
    "Destination",
    "Date",
    "Seat No.",
];

/// Render a list of reservations in the given format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn reservations(rows: &[Reservation], format: DisplayFormat) -> Result<String> {
    match format {
        DisplayFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        DisplayFormat::Plain => Ok(rows.iter().map(|r| format!("{r}\n")).collect()),
        DisplayFormat::Table => Ok(table(rows)),
    }
}

/// Render a single reservation in the given format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn reservation(row: &Reservation, format: DisplayFormat) -> Result<String> {
    match format {
        DisplayFormat::Json => Ok(serde_json::to_string_pretty(row)?),
        DisplayFormat::Plain => Ok(format!("{row}\n")),
        DisplayFormat::Table => Ok(table(std::slice::from_ref(row))),
    }
}

fn cells(row: &Reservation) -> [String; 7] {
    let d = &row.details;
    [
        row.id.to_string(),
        d.name.clone(),
        d.flight_number.clone(),
        d.departure.clone(),
        d.destination.clone(),
        d.date.clone(),
        d.seat_number.clone(),
    ]
}

fn table(rows: &[Reservation]) -> String {
    let body: Vec<[String; 7]> = rows.iter().map(cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{cell:<width$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
