//! Interactive session over a line-oriented reader and writer.
//!
//! The session keeps one [`Coordinator`] alive until the user quits or input
//! ends, and maps each typed command onto a panel action or a navigation.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::DisplayFormat;
use crate::coordinator::Coordinator;
use crate::error::Result;
use crate::panel::{FormField, Navigation, PanelId, ReservationForm};
use crate::render;
use crate::reservation::Reservation;

const HELP: &str = "\
Commands:
  home | book | list         switch panel
  go <panel> [id]            switch panel by name, optionally passing an id
  show                       print the current panel
  set <field> <value>        fill in a form field (booking and edit panels)
  submit                     book the reservation, or save the edited one
  select <id>                select a row in the list
  edit [id]                  edit the selected (or given) reservation
  delete [id]                delete the selected (or given) reservation
  refresh                    reload the list
  back                       leave the current panel
  help                       show this text
  quit                       end the session";

/// Run an interactive session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails; storage
/// and validation failures are reported as panel status lines.
pub fn run<R: BufRead, W: Write>(coordinator: &mut Coordinator, input: R, output: W) -> Result<()> {
    Session {
        coordinator,
        input,
        output,
    }
    .run()
}

struct Session<'a, R, W> {
    coordinator: &'a mut Coordinator,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    fn run(&mut self) -> Result<()> {
        writeln!(self.output, "skybook session. Type 'help' for commands.")?;
        self.print_status(self.coordinator.active())?;

        loop {
            write!(self.output, "[{}]> ", self.coordinator.active())?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!("Session command: {line}");
            let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            let rest = rest.trim();

            match command.to_ascii_lowercase().as_str() {
                "quit" | "exit" => {
                    if self.confirm("Do you want to exit the application?")? {
                        break;
                    }
                }
                "help" | "?" => writeln!(self.output, "{HELP}")?,
                "home" => self.go(PanelId::Home, None)?,
                "book" => self.go(PanelId::Booking, None)?,
                "list" => self.go(PanelId::ReservationList, None)?,
                "go" => self.go_by_name(rest)?,
                "show" => self.show()?,
                "set" => self.set(rest)?,
                "submit" | "save" => self.submit()?,
                "select" => self.select(rest)?,
                "edit" => self.edit(rest)?,
                "delete" => self.delete(rest)?,
                "refresh" => self.refresh()?,
                "back" | "cancel" => self.back()?,
                other => writeln!(self.output, "Unknown command '{other}'. Type 'help'.")?,
            }
        }

        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    fn go(&mut self, target: PanelId, payload: Option<i64>) -> Result<()> {
        self.coordinator.show(target, payload);
        if self.coordinator.active() != target {
            self.print_status(target)?;
        }
        self.print_status(self.coordinator.active())
    }

    fn go_by_name(&mut self, args: &str) -> Result<()> {
        let mut parts = args.split_whitespace();
        let Some(name) = parts.next() else {
            return writeln!(self.output, "Usage: go <panel> [id]").map_err(Into::into);
        };
        let payload = match parts.next().map(str::parse::<i64>) {
            None => None,
            Some(Ok(id)) => Some(id),
            Some(Err(_)) => return writeln!(self.output, "Invalid id.").map_err(Into::into),
        };

        match PanelId::from_name(name) {
            Some(target) => self.go(target, payload),
            None => {
                self.coordinator.show_panel(name, payload);
                writeln!(self.output, "Unknown panel '{name}'.").map_err(Into::into)
            }
        }
    }

    fn after_action(&mut self, acted: PanelId, navigation: Option<Navigation>) -> Result<()> {
        self.print_status(acted)?;
        if let Some(nav) = navigation {
            self.coordinator.navigate(Some(nav));
            self.print_status(self.coordinator.active())?;
        }
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        match self.coordinator.active() {
            PanelId::Home => {
                writeln!(self.output, "Flight Reservation System")?;
                writeln!(self.output, "  book  - Book a New Flight")?;
                writeln!(self.output, "  list  - View All Reservations")?;
            }
            PanelId::Booking => {
                let form = self.coordinator.booking().form().clone();
                self.print_form("Book a New Flight", &form)?;
            }
            PanelId::Edit => {
                let title = match self.coordinator.edit().current_id() {
                    Some(id) => format!("Edit Reservation {id}"),
                    None => "Edit Reservation".to_string(),
                };
                let form = self.coordinator.edit().form().clone();
                self.print_form(&title, &form)?;
            }
            PanelId::ReservationList => {
                let rows: Vec<Reservation> = self.coordinator.list().rows().to_vec();
                if rows.is_empty() {
                    writeln!(self.output, "No reservations found.")?;
                } else {
                    let text = render::reservations(&rows, DisplayFormat::Table)?;
                    write!(self.output, "{text}")?;
                }
                if let Some(id) = self.coordinator.list().selected() {
                    writeln!(self.output, "Selected: {id}")?;
                }
            }
        }
        Ok(())
    }

    fn print_form(&mut self, title: &str, form: &ReservationForm) -> Result<()> {
        writeln!(self.output, "{title}")?;
        for field in FormField::ALL {
            writeln!(
                self.output,
                "  {:<20} {:<14} {}",
                field.label(),
                format!("({field})"),
                form.get(field)
            )?;
        }
        Ok(())
    }

    fn set(&mut self, args: &str) -> Result<()> {
        let (name, value) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
        let field = match name.parse::<FormField>() {
            Ok(field) => field,
            Err(err) => return writeln!(self.output, "{err}").map_err(Into::into),
        };
        let value = value.trim();

        match self.coordinator.active() {
            PanelId::Booking => self.coordinator.booking_mut().set_field(field, value),
            PanelId::Edit => self.coordinator.edit_mut().set_field(field, value),
            other => {
                return writeln!(self.output, "Nothing to fill in on the {other} panel.")
                    .map_err(Into::into)
            }
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<()> {
        match self.coordinator.active() {
            PanelId::Booking => {
                self.coordinator.booking_mut().submit();
                self.print_status(PanelId::Booking)
            }
            PanelId::Edit => {
                let question = match self.coordinator.edit().current_id() {
                    Some(id) => format!("Update reservation ID {id}?"),
                    None => "Update reservation?".to_string(),
                };
                // An incomplete form is rejected by update() without a prompt.
                let confirmed = self.coordinator.edit().current_id().is_none()
                    || (self.coordinator.edit().form().validate().is_ok()
                        && self.confirm(&question)?);
                let nav = self.coordinator.edit_mut().update(confirmed);
                self.after_action(PanelId::Edit, nav)
            }
            other => writeln!(self.output, "Nothing to submit on the {other} panel.")
                .map_err(Into::into),
        }
    }

    fn require_list(&mut self) -> Result<bool> {
        if self.coordinator.active() == PanelId::ReservationList {
            Ok(true)
        } else {
            writeln!(self.output, "Open the reservation list first ('list').")?;
            Ok(false)
        }
    }

    /// Select the id in `args` if one was given. Returns `false` if the
    /// argument was present but unusable.
    fn select_arg(&mut self, args: &str) -> Result<bool> {
        if args.is_empty() {
            return Ok(true);
        }
        match args.parse::<i64>() {
            Ok(id) => Ok(self.coordinator.list_mut().select(id)),
            Err(_) => {
                writeln!(self.output, "Invalid id '{args}'.")?;
                Ok(false)
            }
        }
    }

    fn select(&mut self, args: &str) -> Result<()> {
        if !self.require_list()? {
            return Ok(());
        }
        if args.is_empty() {
            return writeln!(self.output, "Usage: select <id>").map_err(Into::into);
        }
        if self.select_arg(args)? {
            writeln!(self.output, "Selected reservation {args}.")?;
        } else {
            self.print_status(PanelId::ReservationList)?;
        }
        Ok(())
    }

    fn edit(&mut self, args: &str) -> Result<()> {
        if !self.require_list()? {
            return Ok(());
        }
        if !self.select_arg(args)? {
            return self.print_status(PanelId::ReservationList);
        }
        let nav = self.coordinator.list_mut().edit_selected();
        if nav.is_none() {
            return self.print_status(PanelId::ReservationList);
        }
        self.coordinator.navigate(nav);
        if self.coordinator.active() != PanelId::Edit {
            self.print_status(PanelId::Edit)?;
        }
        self.print_status(self.coordinator.active())
    }

    fn delete(&mut self, args: &str) -> Result<()> {
        if !self.require_list()? {
            return Ok(());
        }
        if !self.select_arg(args)? {
            return self.print_status(PanelId::ReservationList);
        }
        let confirmed = match self.coordinator.list().selected() {
            Some(id) => self.confirm(&format!(
                "Are you sure you want to delete reservation ID {id}?"
            ))?,
            None => false,
        };
        self.coordinator.list_mut().delete_selected(confirmed);
        self.print_status(PanelId::ReservationList)
    }

    fn refresh(&mut self) -> Result<()> {
        if !self.require_list()? {
            return Ok(());
        }
        self.coordinator.list_mut().load();
        self.print_status(PanelId::ReservationList)
    }

    fn back(&mut self) -> Result<()> {
        let nav = match self.coordinator.active() {
            PanelId::Home => None,
            PanelId::Booking => Some(self.coordinator.booking().back()),
            PanelId::ReservationList => Some(self.coordinator.list().back()),
            PanelId::Edit => Some(self.coordinator.edit_mut().cancel()),
        };
        match nav {
            Some(nav) => self.go(nav.target, nav.payload),
            None => writeln!(self.output, "Already home.").map_err(Into::into),
        }
    }

    fn print_status(&mut self, id: PanelId) -> Result<()> {
        if let Some(status) = self.coordinator.panel(id).status() {
            writeln!(self.output, "  {status}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::ReservationDetails;
    use crate::storage::Storage;

    fn run_script(coordinator: &mut Coordinator, script: &str) -> String {
        let mut output = Vec::new();
        run(coordinator, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn coordinator() -> Coordinator {
        Coordinator::new(Storage::open_in_memory().unwrap())
    }

    #[test]
    fn test_book_through_session() {
        let mut coordinator = coordinator();
        let out = run_script(
            &mut coordinator,
            "book\nset name Alice Smith\nset flight AA100\nset from NYC\nset to LAX\n\
             set date 2025-06-01\nset seat 12A\nsubmit\nquit\ny\n",
        );

        assert!(out.contains("Reservation booked (ID: 1)."));
        let stored = coordinator.storage().get(1).unwrap().unwrap();
        assert_eq!(stored.details.name, "Alice Smith");
    }

    #[test]
    fn test_submit_incomplete_reports_error() {
        let mut coordinator = coordinator();
        let out = run_script(&mut coordinator, "book\nset name Alice\nsubmit\n");
        assert!(out.contains("Error: all fields are required"));
        assert_eq!(coordinator.booking().form().get(FormField::Name), "Alice");
    }

    #[test]
    fn test_list_edit_and_save() {
        let mut coordinator = coordinator();
        coordinator
            .storage()
            .create(&ReservationDetails::new(
                "Alice", "AA100", "NYC", "LAX", "2025-06-01", "12A",
            ))
            .unwrap();

        let out = run_script(
            &mut coordinator,
            "list\nedit 1\nset seat 3C\nsubmit\ny\nquit\ny\n",
        );

        assert!(out.contains("Editing Reservation ID: 1"));
        assert!(out.contains("Reservation ID 1 updated successfully."));
        assert_eq!(coordinator.active(), PanelId::ReservationList);
        let stored = coordinator.storage().get(1).unwrap().unwrap();
        assert_eq!(stored.details.seat_number, "3C");
    }

    #[test]
    fn test_edit_incomplete_form_skips_confirmation() {
        let mut coordinator = coordinator();
        coordinator
            .storage()
            .create(&ReservationDetails::new(
                "Alice", "AA100", "NYC", "LAX", "2025-06-01", "12A",
            ))
            .unwrap();

        // The line after "submit" is a command, not an answer to a prompt.
        let out = run_script(&mut coordinator, "list\nedit 1\nset seat\nsubmit\nback\n");

        assert!(!out.contains("Update reservation ID 1?"));
        assert!(out.contains("Error: all fields are required (missing: seat_number)"));
        assert_eq!(coordinator.active(), PanelId::ReservationList);
        let stored = coordinator.storage().get(1).unwrap().unwrap();
        assert_eq!(stored.details.seat_number, "12A");
    }

    #[test]
    fn test_quit_asks_first() {
        let mut coordinator = coordinator();
        let out = run_script(&mut coordinator, "quit\nn\nbook\nexit\ny\nlist\n");

        assert_eq!(out.matches("Do you want to exit the application?").count(), 2);
        assert_eq!(coordinator.active(), PanelId::Booking);
    }

    #[test]
    fn test_end_of_input_exits_without_prompt() {
        let mut coordinator = coordinator();
        let out = run_script(&mut coordinator, "book\n");

        assert!(!out.contains("exit the application"));
        assert_eq!(coordinator.active(), PanelId::Booking);
    }

    #[test]
    fn test_delete_declined_then_confirmed() {
        let mut coordinator = coordinator();
        coordinator
            .storage()
            .create(&ReservationDetails::new(
                "Alice", "AA100", "NYC", "LAX", "2025-06-01", "12A",
            ))
            .unwrap();

        let out = run_script(&mut coordinator, "list\ndelete 1\nn\ndelete\nyes\n");
        assert!(out.contains("cancelled"));
        assert!(out.contains("Reservation ID 1 deleted."));
        assert_eq!(coordinator.storage().count().unwrap(), 0);
    }

    #[test]
    fn test_go_edit_missing_id_lands_on_list() {
        let mut coordinator = coordinator();
        let out = run_script(&mut coordinator, "go edit 99\n");
        assert!(out.contains("Reservation ID 99 not found."));
        assert_eq!(coordinator.active(), PanelId::ReservationList);
    }

    #[test]
    fn test_unknown_panel_keeps_current() {
        let mut coordinator = coordinator();
        let out = run_script(&mut coordinator, "book\ngo settings\n");
        assert!(out.contains("Unknown panel 'settings'."));
        assert_eq!(coordinator.active(), PanelId::Booking);
    }

    #[test]
    fn test_back_from_booking() {
        let mut coordinator = coordinator();
        let out = run_script(&mut coordinator, "book\nback\n");
        assert!(out.contains("Welcome! Please select an option."));
        assert_eq!(coordinator.active(), PanelId::Home);
    }

    #[test]
    fn test_unknown_command() {
        let mut coordinator = coordinator();
        let out = run_script(&mut coordinator, "fly\n");
        assert!(out.contains("Unknown command 'fly'"));
    }

    #[test]
    fn test_show_list() {
        let mut coordinator = coordinator();
        coordinator
            .storage()
            .create(&ReservationDetails::new(
                "Alice", "AA100", "NYC", "LAX", "2025-06-01", "12A",
            ))
            .unwrap();
        let out = run_script(&mut coordinator, "list\nselect 1\nshow\n");
        assert!(out.contains("Passenger Name"));
        assert!(out.contains("Selected: 1"));
    }
}
