//! The "book a new flight" form.

use std::rc::Rc;

use tracing::{debug, error, info, warn};

use super::{FormField, Navigation, Panel, PanelId, ReservationForm, StatusMessage, StorageHandle};

/// Collects the six reservation fields and creates a new record.
#[derive(Debug)]
pub struct BookingPanel {
    storage: StorageHandle,
    form: ReservationForm,
    status: Option<StatusMessage>,
}

impl BookingPanel {
    /// Create the booking panel over the given store.
    #[must_use]
    pub fn new(storage: &StorageHandle) -> Self {
        Self {
            storage: Rc::clone(storage),
            form: ReservationForm::new(),
            status: None,
        }
    }

    /// The form being filled in.
    #[must_use]
    pub fn form(&self) -> &ReservationForm {
        &self.form
    }

    /// Set one form field.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Validate the form and create the reservation.
    ///
    /// Returns the new id on success and clears the form. On a validation or
    /// storage failure the form is left as it was and the status says why.
    pub fn submit(&mut self) -> Option<i64> {
        let details = match self.form.validate() {
            Ok(details) => details,
            Err(err) => {
                warn!("Booking rejected: {err}");
                self.status = Some(StatusMessage::error(err.to_string()));
                return None;
            }
        };

        match self.storage.create(&details) {
            Ok(id) => {
                info!("Reservation booked with id {id}");
                self.form.clear();
                self.status = Some(StatusMessage::success(format!(
                    "Reservation booked (ID: {id})."
                )));
                Some(id)
            }
            Err(err) => {
                error!("Failed to book reservation: {err}");
                self.status = Some(StatusMessage::error(format!(
                    "Failed to book reservation: {err}"
                )));
                None
            }
        }
    }

    /// "Back to Home".
    #[must_use]
    pub fn back(&self) -> Navigation {
        Navigation::to(PanelId::Home)
    }
}

impl Panel for BookingPanel {
    fn id(&self) -> PanelId {
        PanelId::Booking
    }

    fn on_activate(&mut self, _payload: Option<i64>) -> Option<Navigation> {
        debug!("Booking panel is now visible");
        self.form.clear();
        self.status = None;
        None
    }

    fn refresh_connection(&mut self, storage: &StorageHandle) {
        self.storage = Rc::clone(storage);
    }

    fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::StatusLevel;
    use crate::storage::Storage;

    fn handle() -> StorageHandle {
        Rc::new(Storage::open_in_memory().unwrap())
    }

    fn fill(panel: &mut BookingPanel) {
        for (field, value) in FormField::ALL
            .into_iter()
            .zip(["Alice", "AA100", "NYC", "LAX", "2025-06-01", "12A"])
        {
            panel.set_field(field, value);
        }
    }

    #[test]
    fn test_submit_creates_and_clears() {
        let storage = handle();
        let mut panel = BookingPanel::new(&storage);
        fill(&mut panel);

        let id = panel.submit().expect("booking should succeed");
        assert_eq!(id, 1);
        assert!(panel.form().is_empty());
        assert_eq!(panel.status().unwrap().level, StatusLevel::Success);
        assert_eq!(storage.get(id).unwrap().unwrap().details.name, "Alice");
    }

    #[test]
    fn test_submit_incomplete_keeps_form() {
        let storage = handle();
        let mut panel = BookingPanel::new(&storage);
        fill(&mut panel);
        panel.set_field(FormField::SeatNumber, "  ");

        assert!(panel.submit().is_none());
        assert!(panel.status().unwrap().is_error());
        assert_eq!(panel.form().get(FormField::Name), "Alice");
        assert_eq!(storage.count().unwrap(), 0);
    }

    #[test]
    fn test_submit_storage_failure_keeps_form() {
        let storage = handle();
        storage.reject_writes();
        let mut panel = BookingPanel::new(&storage);
        fill(&mut panel);
        let before = panel.form().clone();

        assert!(panel.submit().is_none());
        let status = panel.status().unwrap();
        assert!(status.is_error());
        assert!(status.text.starts_with("Failed to book reservation"));
        assert_eq!(panel.form(), &before);
        assert_eq!(storage.count().unwrap(), 0);
    }

    #[test]
    fn test_submit_after_table_dropped_keeps_form() {
        let storage = handle();
        storage.break_schema();
        let mut panel = BookingPanel::new(&storage);
        fill(&mut panel);

        assert!(panel.submit().is_none());
        assert!(panel.status().unwrap().is_error());
        assert_eq!(panel.form().get(FormField::Name), "Alice");
    }

    #[test]
    fn test_activate_resets_form() {
        let storage = handle();
        let mut panel = BookingPanel::new(&storage);
        fill(&mut panel);
        panel.set_field(FormField::Name, "");
        panel.submit();

        assert!(panel.on_activate(None).is_none());
        assert!(panel.form().is_empty());
        assert!(panel.status().is_none());
    }

    #[test]
    fn test_refresh_connection_switches_store() {
        let first = handle();
        let second = handle();
        let mut panel = BookingPanel::new(&first);
        panel.refresh_connection(&second);
        fill(&mut panel);
        panel.submit().unwrap();

        assert_eq!(first.count().unwrap(), 0);
        assert_eq!(second.count().unwrap(), 1);
    }

    #[test]
    fn test_back_goes_home() {
        let panel = BookingPanel::new(&handle());
        assert_eq!(panel.back(), Navigation::to(PanelId::Home));
    }
}
