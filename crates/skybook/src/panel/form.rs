//! The six-field reservation form shared by the booking and edit panels.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::ValidationError;
use crate::reservation::ReservationDetails;

/// One input field of the reservation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Passenger name.
    Name,
    /// Flight number.
    FlightNumber,
    /// Departure city.
    Departure,
    /// Destination city.
    Destination,
    /// Travel date.
    Date,
    /// Seat number.
    SeatNumber,
}

impl FormField {
    /// Every field, in display order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::FlightNumber,
        Self::Departure,
        Self::Destination,
        Self::Date,
        Self::SeatNumber,
    ];

    /// Column-style name of the field.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::FlightNumber => "flight_number",
            Self::Departure => "departure",
            Self::Destination => "destination",
            Self::Date => "date",
            Self::SeatNumber => "seat_number",
        }
    }

    /// Label shown next to the input.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Passenger Name",
            Self::FlightNumber => "Flight Number",
            Self::Departure => "Departure City",
            Self::Destination => "Destination City",
            Self::Date => "Date (YYYY-MM-DD)",
            Self::SeatNumber => "Seat Number",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "name" | "passenger" => Ok(Self::Name),
            "flight_number" | "flight" => Ok(Self::FlightNumber),
            "departure" | "from" => Ok(Self::Departure),
            "destination" | "to" => Ok(Self::Destination),
            "date" => Ok(Self::Date),
            "seat_number" | "seat" => Ok(Self::SeatNumber),
            _ => Err(ValidationError::UnknownField(s.to_string())),
        }
    }
}

/// Raw, untrimmed input for one reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationForm {
    values: [String; 6],
}

impl ReservationForm {
    /// An empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw value of a field.
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        &self.values[Self::index(field)]
    }

    /// Overwrite a field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values[Self::index(field)] = value.into();
    }

    /// Empty every field.
    pub fn clear(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
    }

    /// Replace the form contents with a stored reservation's fields.
    pub fn fill(&mut self, details: &ReservationDetails) {
        let ReservationDetails {
            name,
            flight_number,
            departure,
            destination,
            date,
            seat_number,
        } = details;
        self.values = [
            name.clone(),
            flight_number.clone(),
            departure.clone(),
            destination.clone(),
            date.clone(),
            seat_number.clone(),
        ];
    }

    /// The form contents as-is, without trimming or checks.
    #[must_use]
    pub fn details(&self) -> ReservationDetails {
        let [name, flight_number, departure, destination, date, seat_number] = self.values.clone();
        ReservationDetails {
            name,
            flight_number,
            departure,
            destination,
            date,
            seat_number,
        }
    }

    /// Whether every field is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }

    /// Trim every field and build the details, rejecting blanks.
    ///
    /// Dates that don't look like `YYYY-MM-DD` are logged but accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] naming every blank field.
    pub fn validate(&self) -> Result<ReservationDetails, ValidationError> {
        let missing: Vec<&'static str> = FormField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .map(FormField::name)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let details = ReservationDetails::new(
            self.get(FormField::Name).trim(),
            self.get(FormField::FlightNumber).trim(),
            self.get(FormField::Departure).trim(),
            self.get(FormField::Destination).trim(),
            self.get(FormField::Date).trim(),
            self.get(FormField::SeatNumber).trim(),
        );

        if details.parsed_date().is_none() {
            warn!("Date '{}' is not in YYYY-MM-DD format", details.date);
        }

        Ok(details)
    }

    fn index(field: FormField) -> usize {
        field as usize
    }
}
