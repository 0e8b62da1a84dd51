//! `SQLite` schema definitions for skybook.
//!
//! This module contains the SQL statements for creating the reservations
//! table and the function that applies them.

use rusqlite::Connection;

use crate::error::Result;

/// Name of the single table holding reservations.
pub const RESERVATIONS_TABLE: &str = "reservations";

/// SQL statement to create the reservations table.
///
/// `AUTOINCREMENT` keeps ids from being reused after the highest row is deleted.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS reservations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    flight_number TEXT NOT NULL,
    departure TEXT NOT NULL,
    destination TEXT NOT NULL,
    date TEXT NOT NULL,
    seat_number TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_RESERVATIONS_TABLE];

/// Create the schema if it doesn't exist yet.
///
/// Every statement is `IF NOT EXISTS`, so this is safe to run against an
/// already-initialized database.
///
/// # Errors
///
/// Returns an error if any statement fails to execute.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}
