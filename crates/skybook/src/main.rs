//! `skybook` - CLI for the flight reservation manager
//!
//! Opens the reservation store, builds the panels, and runs one command (or an
//! interactive session) against them.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use skybook::cli::{
    BookCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ListCommand, ShowCommand,
};
use skybook::config::DisplayFormat;
use skybook::panel::{Panel, PanelId, StatusMessage};
use skybook::{init_logging, render, session, Config, Coordinator, Reservation, Storage};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            eprintln!("skybook: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Execute the parsed command. `Ok(false)` means a panel reported a failure.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;
    let db_path = cli.database.unwrap_or_else(|| config.database_path());
    let default_format = config.display.default_format;

    match cli.command {
        Command::Config(cmd) => handle_config(&config, cmd),
        Command::Init => with_coordinator(&db_path, |c| handle_init(c)),
        Command::Book(cmd) => with_coordinator(&db_path, |c| Ok(handle_book(c, &cmd))),
        Command::List(cmd) => with_coordinator(&db_path, |c| handle_list(c, &cmd, default_format)),
        Command::Show(cmd) => with_coordinator(&db_path, |c| handle_show(c, &cmd, default_format)),
        Command::Edit(cmd) => with_coordinator(&db_path, |c| Ok(handle_edit(c, &cmd))),
        Command::Delete(cmd) => with_coordinator(&db_path, |c| Ok(handle_delete(c, &cmd))),
        Command::Session => with_coordinator(&db_path, |c| {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            session::run(c, stdin.lock(), stdout.lock())?;
            Ok(true)
        }),
    }
}

/// Open the store, run `f` against a fresh coordinator, then close the store.
fn with_coordinator<F>(db_path: &Path, f: F) -> anyhow::Result<bool>
where
    F: FnOnce(&mut Coordinator) -> anyhow::Result<bool>,
{
    // Without a store there is nothing to show; refuse to start.
    let storage = Storage::open(db_path).with_context(|| {
        format!(
            "cannot open the reservation store at {}",
            db_path.display()
        )
    })?;

    let mut coordinator = Coordinator::new(storage);
    let ok = f(&mut coordinator)?;

    coordinator
        .shutdown()
        .context("failed to close the reservation store")?;
    Ok(ok)
}

/// Print a panel's status line; errors go to stderr. Returns `false` on error.
fn report(status: Option<&StatusMessage>) -> bool {
    match status {
        Some(status) if status.is_error() => {
            eprintln!("{status}");
            false
        }
        Some(status) => {
            println!("{status}");
            true
        }
        None => true,
    }
}

fn handle_init(coordinator: &Coordinator) -> anyhow::Result<bool> {
    let storage = coordinator.storage();
    let count = storage.count()?;
    println!("Reservation store ready at {}", storage.path().display());
    println!("Reservations: {count}");
    Ok(true)
}

fn handle_book(coordinator: &mut Coordinator, cmd: &BookCommand) -> bool {
    let nav = coordinator.home().book();
    coordinator.navigate(Some(nav));

    let booking = coordinator.booking_mut();
    for (field, value) in cmd.fields() {
        booking.set_field(field, value);
    }
    let booked = booking.submit().is_some();
    report(coordinator.booking().status()) && booked
}

fn handle_list(
    coordinator: &mut Coordinator,
    cmd: &ListCommand,
    default_format: DisplayFormat,
) -> anyhow::Result<bool> {
    let nav = coordinator.home().view_reservations();
    coordinator.navigate(Some(nav));

    let list = coordinator.list();
    if list.status().is_some_and(StatusMessage::is_error) {
        return Ok(report(list.status()));
    }

    let format = cmd.format.map_or(default_format, DisplayFormat::from);
    if list.rows().is_empty() && format != DisplayFormat::Json {
        println!("No reservations found.");
    } else {
        print!("{}", render::reservations(list.rows(), format)?);
        if format == DisplayFormat::Json {
            println!();
        }
    }
    Ok(true)
}

fn handle_show(
    coordinator: &mut Coordinator,
    cmd: &ShowCommand,
    default_format: DisplayFormat,
) -> anyhow::Result<bool> {
    coordinator.show(PanelId::Edit, Some(cmd.id));
    if coordinator.active() != PanelId::Edit {
        return Ok(report(coordinator.edit().status()));
    }

    let reservation = Reservation::new(cmd.id, coordinator.edit().form().details());
    let format = cmd.format.map_or(default_format, DisplayFormat::from);
    print!("{}", render::reservation(&reservation, format)?);
    if format == DisplayFormat::Json {
        println!();
    }
    Ok(true)
}

fn handle_edit(coordinator: &mut Coordinator, cmd: &EditCommand) -> bool {
    coordinator.show(PanelId::Edit, Some(cmd.id));
    if coordinator.active() != PanelId::Edit {
        return report(coordinator.edit().status());
    }

    let changes = cmd.changes();
    if changes.is_empty() {
        println!("No changes requested for reservation ID {}.", cmd.id);
        return true;
    }

    let edit = coordinator.edit_mut();
    for (field, value) in changes {
        edit.set_field(field, value);
    }
    let nav = edit.update(true);
    let updated = nav.is_some();
    let ok = report(coordinator.edit().status());
    coordinator.navigate(nav);
    ok && updated
}

fn handle_delete(coordinator: &mut Coordinator, cmd: &DeleteCommand) -> bool {
    coordinator.show(PanelId::ReservationList, None);

    let list = coordinator.list_mut();
    if !list.select(cmd.id) {
        eprintln!("Error: Reservation ID {} not found.", cmd.id);
        return false;
    }

    let deleted = list.delete_selected(cmd.yes);
    let ok = report(coordinator.list().status());
    if !cmd.yes {
        println!("Use --yes to confirm.");
    }
    ok && deleted
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<bool> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:   {}", config.database_path().display());
                println!();
                println!("[Display]");
                println!("  Default format:  {:?}", config.display.default_format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}
