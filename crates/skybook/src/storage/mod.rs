//! Storage layer for skybook.
//!
//! This module provides `SQLite`-based persistent storage for reservations:
//! create, list, fetch, update and delete over the single `reservations` table.

pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationDetails};

/// Columns selected for every reservation read, in `row_to_reservation` order.
const SELECT_COLUMNS: &str =
    "SELECT id, name, flight_number, departure, destination, date, seat_number FROM reservations";

/// Storage engine for reservations.
///
/// Owns the single database connection for the process. Operations never
/// validate their input; callers are expected to reject empty fields first.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// then makes sure the reservations table is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let storage = Self { path, conn };
        storage.initialize()?;

        info!("Database opened successfully at {}", storage.path.display());
        Ok(storage)
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        let storage = Self {
            path: PathBuf::from(":memory:"),
            conn,
        };
        storage.initialize()?;
        Ok(storage)
    }

    /// Ensure the reservations table exists.
    ///
    /// Idempotent; `open` already calls this, but it is safe to call again.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema statements fail.
    pub fn initialize(&self) -> Result<()> {
        schema::initialize_schema(&self.conn)
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new reservation and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails; no row is written in that case.
    pub fn create(&self, details: &ReservationDetails) -> Result<i64> {
        self.conn.execute(
            r"
            INSERT INTO reservations (name, flight_number, departure, destination, date, seat_number)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                details.name,
                details.flight_number,
                details.departure,
                details.destination,
                details.date,
                details.seat_number,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted reservation with id {}", id);
        Ok(id)
    }

    /// Get every reservation, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_all(&self) -> Result<Vec<Reservation>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id DESC"))?;

        let reservations = stmt
            .query_map([], Self::row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Listed {} reservations", reservations.len());
        Ok(reservations)
    }

    /// Get a reservation by its id.
    ///
    /// Returns `None` when no row has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, id: i64) -> Result<Option<Reservation>> {
        let result = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                [id],
                Self::row_to_reservation,
            )
            .optional()?;
        Ok(result)
    }

    /// Replace all six fields of the reservation with the given id.
    ///
    /// Returns `true` if a row was updated, `false` if no row has that id.
    /// A missing id never creates a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn update(&self, id: i64, details: &ReservationDetails) -> Result<bool> {
        let affected = self.conn.execute(
            r"
            UPDATE reservations
            SET name = ?1, flight_number = ?2, departure = ?3,
                destination = ?4, date = ?5, seat_number = ?6
            WHERE id = ?7
            ",
            params![
                details.name,
                details.flight_number,
                details.departure,
                details.destination,
                details.date,
                details.seat_number,
                id,
            ],
        )?;

        debug!("Update of reservation {} touched {} rows", id, affected);
        Ok(affected > 0)
    }

    /// Delete a reservation by id.
    ///
    /// Returns `true` if a reservation was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM reservations WHERE id = ?1", [id])?;

        if affected > 0 {
            info!("Deleted reservation {}", id);
        }
        Ok(affected > 0)
    }

    /// Count reservations in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reservations", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Close the connection, reporting any error from `SQLite`.
    ///
    /// Dropping a `Storage` also closes it, but silently.
    ///
    /// # Errors
    ///
    /// Returns an error if `SQLite` refuses to close the connection.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, source)| Error::from(source))?;
        info!("Database connection closed ({})", path.display());
        Ok(())
    }

    /// Remove the table out from under the connection so reads and writes fail.
    #[cfg(test)]
    pub(crate) fn break_schema(&self) {
        self.conn
            .execute_batch("DROP TABLE reservations")
            .expect("failed to drop reservations table");
    }

    /// Make every insert, update and delete abort while reads keep working.
    #[cfg(test)]
    pub(crate) fn reject_writes(&self) {
        self.conn
            .execute_batch(
                "CREATE TRIGGER reject_insert BEFORE INSERT ON reservations
                     BEGIN SELECT RAISE(ABORT, 'writes disabled'); END;
                 CREATE TRIGGER reject_update BEFORE UPDATE ON reservations
                     BEGIN SELECT RAISE(ABORT, 'writes disabled'); END;
                 CREATE TRIGGER reject_delete BEFORE DELETE ON reservations
                     BEGIN SELECT RAISE(ABORT, 'writes disabled'); END;",
            )
            .expect("failed to install write-rejecting triggers");
    }

    /// Convert a database row to a Reservation.
    fn row_to_reservation(row: &rusqlite::Row) -> rusqlite::Result<Reservation> {
        Ok(Reservation {
            id: row.get(0)?,
            details: ReservationDetails {
                name: row.get(1)?,
                flight_number: row.get(2)?,
                departure: row.get(3)?,
                destination: row.get(4)?,
                date: row.get(5)?,
                seat_number: row.get(6)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn alice() -> ReservationDetails {
        ReservationDetails::new("Alice", "AA100", "NYC", "LAX", "2025-06-01", "12A")
    }

    fn bob() -> ReservationDetails {
        ReservationDetails::new("Bob", "BA200", "LHR", "JFK", "2025-07-04", "3C")
    }

    #[test]
    fn test_open_in_memory() {
        let storage = Storage::open_in_memory();
        assert!(storage.is_ok());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let storage = create_test_storage();
        storage.create(&alice()).unwrap();
        storage.initialize().unwrap();
        storage.initialize().unwrap();
        assert_eq!(storage.count().unwrap(), 1);
    }

    #[test]
    fn test_create_and_get() {
        let storage = create_test_storage();

        let id = storage.create(&alice()).unwrap();
        assert_eq!(id, 1);

        let retrieved = storage.get(id).unwrap().expect("reservation should exist");
        assert_eq!(retrieved.id, 1);
        assert_eq!(retrieved.details, alice());
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let storage = create_test_storage();
        let first = storage.create(&alice()).unwrap();
        let second = storage.create(&bob()).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_duplicate_bookings_allowed() {
        let storage = create_test_storage();
        storage.create(&alice()).unwrap();
        storage.create(&alice()).unwrap();
        assert_eq!(storage.count().unwrap(), 2);
    }

    #[test]
    fn test_storage_accepts_empty_fields() {
        let storage = create_test_storage();
        let id = storage.create(&ReservationDetails::default()).unwrap();
        let retrieved = storage.get(id).unwrap().unwrap();
        assert_eq!(retrieved.details, ReservationDetails::default());
    }

    #[test]
    fn test_get_nonexistent() {
        let storage = create_test_storage();
        let result = storage.get(999_999).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_list_all_empty() {
        let storage = create_test_storage();
        assert!(storage.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_list_all_newest_first() {
        let storage = create_test_storage();
        for i in 0..3 {
            let mut details = alice();
            details.seat_number = format!("{}A", i + 1);
            storage.create(&details).unwrap();
        }

        let ids: Vec<i64> = storage.list_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_update() {
        let storage = create_test_storage();
        let id = storage.create(&alice()).unwrap();

        assert!(storage.update(id, &bob()).unwrap());
        let retrieved = storage.get(id).unwrap().unwrap();
        assert_eq!(retrieved.id, id);
        assert_eq!(retrieved.details, bob());
    }

    #[test]
    fn test_update_twice_is_idempotent() {
        let storage = create_test_storage();
        let id = storage.create(&alice()).unwrap();

        assert!(storage.update(id, &bob()).unwrap());
        assert!(storage.update(id, &bob()).unwrap());
        assert_eq!(storage.get(id).unwrap().unwrap().details, bob());
        assert_eq!(storage.count().unwrap(), 1);
    }

    #[test]
    fn test_update_nonexistent_creates_nothing() {
        let storage = create_test_storage();
        assert!(!storage.update(1, &bob()).unwrap());
        assert_eq!(storage.count().unwrap(), 0);
        assert!(storage.get(1).unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let storage = create_test_storage();
        let first = storage.create(&alice()).unwrap();
        let second = storage.create(&bob()).unwrap();

        assert!(storage.delete(first).unwrap());
        assert!(storage.get(first).unwrap().is_none());

        let remaining = storage.list_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second);
    }

    #[test]
    fn test_delete_nonexistent() {
        let storage = create_test_storage();
        assert!(!storage.delete(99_999).unwrap());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let storage = create_test_storage();
        let first = storage.create(&alice()).unwrap();
        storage.delete(first).unwrap();

        let second = storage.create(&bob()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_count() {
        let storage = create_test_storage();
        assert_eq!(storage.count().unwrap(), 0);

        storage.create(&alice()).unwrap();
        storage.create(&bob()).unwrap();

        assert_eq!(storage.count().unwrap(), 2);
    }

    #[test]
    fn test_failed_writes_leave_table_untouched() {
        let storage = create_test_storage();
        let id = storage.create(&alice()).unwrap();
        storage.reject_writes();

        assert!(storage.create(&bob()).unwrap_err().is_storage_error());
        assert!(storage.update(id, &bob()).is_err());
        assert!(storage.delete(id).is_err());

        assert_eq!(storage.count().unwrap(), 1);
        assert_eq!(storage.get(id).unwrap().unwrap().details, alice());
    }

    #[test]
    fn test_path() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_close() {
        let storage = create_test_storage();
        assert!(storage.close().is_ok());
    }

    #[test]
    fn test_open_on_disk_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("flights.db");

        let storage = Storage::open(&path).unwrap();
        let id = storage.create(&alice()).unwrap();
        storage.close().unwrap();

        let reopened = Storage::open(&path).unwrap();
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(reopened.get(id).unwrap().unwrap().details, alice());
    }

    #[test]
    fn test_open_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = Storage::open(dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().is_storage_error());
    }
}
