//! CLI command definitions.
//!
//! This module defines the arguments of every CLI subcommand.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::config::DisplayFormat;
use crate::panel::FormField;

/// Book command arguments.
#[derive(Debug, Args)]
pub struct BookCommand {
    /// Passenger name
    #[arg(long)]
    pub name: String,

    /// Flight number, e.g. AA100
    #[arg(long, visible_alias = "flight")]
    pub flight_number: String,

    /// Departure city
    #[arg(long, visible_alias = "from")]
    pub departure: String,

    /// Destination city
    #[arg(long, visible_alias = "to")]
    pub destination: String,

    /// Travel date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Seat number, e.g. 12A
    #[arg(long, visible_alias = "seat")]
    pub seat_number: String,
}

impl BookCommand {
    /// Field values in form order.
    #[must_use]
    pub fn fields(&self) -> [(FormField, &str); 6] {
        [
            (FormField::Name, self.name.as_str()),
            (FormField::FlightNumber, self.flight_number.as_str()),
            (FormField::Departure, self.departure.as_str()),
            (FormField::Destination, self.destination.as_str()),
            (FormField::Date, self.date.as_str()),
            (FormField::SeatNumber, self.seat_number.as_str()),
        ]
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Reservation id
    pub id: i64,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Edit command arguments. Only the supplied fields change.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Reservation id
    pub id: i64,

    /// New passenger name
    #[arg(long)]
    pub name: Option<String>,

    /// New flight number
    #[arg(long, visible_alias = "flight")]
    pub flight_number: Option<String>,

    /// New departure city
    #[arg(long, visible_alias = "from")]
    pub departure: Option<String>,

    /// New destination city
    #[arg(long, visible_alias = "to")]
    pub destination: Option<String>,

    /// New travel date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// New seat number
    #[arg(long, visible_alias = "seat")]
    pub seat_number: Option<String>,
}

impl EditCommand {
    /// The fields that were given on the command line.
    #[must_use]
    pub fn changes(&self) -> Vec<(FormField, &str)> {
        [
            (FormField::Name, &self.name),
            (FormField::FlightNumber, &self.flight_number),
            (FormField::Departure, &self.departure),
            (FormField::Destination, &self.destination),
            (FormField::Date, &self.date),
            (FormField::SeatNumber, &self.seat_number),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Reservation id
    pub id: i64,

    /// Confirm the deletion
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per reservation
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

impl From<OutputFormat> for DisplayFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Plain => Self::Plain,
            OutputFormat::Table => Self::Table,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(DisplayFormat::from(OutputFormat::Plain), DisplayFormat::Plain);
        assert_eq!(DisplayFormat::from(OutputFormat::Table), DisplayFormat::Table);
        assert_eq!(DisplayFormat::from(OutputFormat::Json), DisplayFormat::Json);
    }

    #[test]
    fn test_book_fields_in_form_order() {
        let cmd = BookCommand {
            name: "Alice".to_string(),
            flight_number: "AA100".to_string(),
            departure: "NYC".to_string(),
            destination: "LAX".to_string(),
            date: "2025-06-01".to_string(),
            seat_number: "12A".to_string(),
        };
        let fields: Vec<FormField> = cmd.fields().iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, FormField::ALL.to_vec());
        assert_eq!(cmd.fields()[5].1, "12A");
    }

    #[test]
    fn test_edit_changes_only_supplied() {
        let cmd = EditCommand {
            id: 1,
            name: None,
            flight_number: None,
            departure: Some("Boston".to_string()),
            destination: None,
            date: None,
            seat_number: Some("2F".to_string()),
        };
        assert_eq!(
            cmd.changes(),
            vec![(FormField::Departure, "Boston"), (FormField::SeatNumber, "2F")]
        );
    }

    #[test]
    fn test_delete_command_debug() {
        let cmd = DeleteCommand { id: 3, yes: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("yes"));
    }
}
