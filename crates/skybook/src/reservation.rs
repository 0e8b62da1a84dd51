//! Core reservation types for skybook.
//!
//! A [`Reservation`] is one booked flight record. Its six text fields live in
//! [`ReservationDetails`], which is what callers hand to storage when creating
//! or updating a record; the `id` is assigned by storage and never changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Expected (but not enforced) format of the `date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The user-supplied fields of a reservation.
///
/// Storage accepts whatever text it is given here; emptiness checks happen in
/// the panel layer before a value of this type is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationDetails {
    /// Passenger name.
    pub name: String,
    /// Flight number, e.g. `AA100`.
    pub flight_number: String,
    /// Departure city.
    pub departure: String,
    /// Destination city.
    pub destination: String,
    /// Travel date, usually `YYYY-MM-DD`.
    pub date: String,
    /// Seat number, e.g. `12A`.
    pub seat_number: String,
}

impl ReservationDetails {
    /// Build a set of details from its six fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        flight_number: impl Into<String>,
        departure: impl Into<String>,
        destination: impl Into<String>,
        date: impl Into<String>,
        seat_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            flight_number: flight_number.into(),
            departure: departure.into(),
            destination: destination.into(),
            date: date.into(),
            seat_number: seat_number.into(),
        }
    }

    /// Parse `date` as `YYYY-MM-DD`, if it has that shape.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }
}

/// A persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reservation {
    /// Storage-assigned identifier.
    pub id: i64,

    /// The booked fields.
    #[serde(flatten)]
    pub details: ReservationDetails,
}

impl Reservation {
    /// Pair an id with its details.
    #[must_use]
    pub fn new(id: i64, details: ReservationDetails) -> Self {
        Self { id, details }
    }
}

impl std::fmt::Display for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = &self.details;
        write!(
            f,
            "#{} {} {} {} -> {} on {} seat {}",
            self.id, d.name, d.flight_number, d.departure, d.destination, d.date, d.seat_number
        )
    }
}
