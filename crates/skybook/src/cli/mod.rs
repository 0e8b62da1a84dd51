//! Command-line interface for skybook.
//!
//! This module provides the CLI structure for the `skybook` binary. Each
//! subcommand drives one panel through the coordinator; `session` keeps the
//! coordinator running interactively.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BookCommand, ConfigCommand, DeleteCommand, EditCommand, ListCommand, OutputFormat,
    ShowCommand,
};

/// skybook - Keep track of flight reservations
///
/// Books, lists, edits and deletes flight reservations stored in a local
/// `SQLite` file.
#[derive(Debug, Parser)]
#[command(name = "skybook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the reservation database (overrides configuration)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the reservation store if needed and report where it lives
    Init,

    /// Book a new flight
    Book(BookCommand),

    /// List every reservation, newest first
    List(ListCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// Change fields of an existing reservation
    Edit(EditCommand),

    /// Delete a reservation
    Delete(DeleteCommand),

    /// Interactive session: navigate panels and fill in forms from stdin
    Session,

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                2 => crate::logging::Verbosity::Debug,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            database: None,
            verbose,
            quiet,
            command: Command::Init,
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "skybook");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Debug);
        assert_eq!(cli(5, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_book() {
        let args = [
            "skybook",
            "book",
            "--name",
            "Alice",
            "--flight-number",
            "AA100",
            "--departure",
            "NYC",
            "--destination",
            "LAX",
            "--date",
            "2025-06-01",
            "--seat-number",
            "12A",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Book(book) = cli.command else {
            panic!("expected book command");
        };
        assert_eq!(book.name, "Alice");
        assert_eq!(book.seat_number, "12A");
    }

    #[test]
    fn test_parse_book_missing_field() {
        let args = ["skybook", "book", "--name", "Alice"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_list_format() {
        let cli = Cli::try_parse_from(["skybook", "list", "--format", "json"]).unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(list.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_parse_edit_partial() {
        let cli = Cli::try_parse_from(["skybook", "edit", "3", "--seat", "4B"]).unwrap();
        let Command::Edit(edit) = cli.command else {
            panic!("expected edit command");
        };
        assert_eq!(edit.id, 3);
        assert_eq!(edit.seat_number.as_deref(), Some("4B"));
        assert!(edit.name.is_none());
    }

    #[test]
    fn test_parse_delete_yes() {
        let cli = Cli::try_parse_from(["skybook", "delete", "7", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Delete(DeleteCommand { id: 7, yes: true })
        ));
    }

    #[test]
    fn test_parse_with_database() {
        let args = ["skybook", "--database", "/tmp/f.db", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/f.db")));
    }

    #[test]
    fn test_parse_with_config_and_verbose() {
        let args = ["skybook", "-c", "/custom/config.toml", "-vv", "session"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Session));
    }
}
