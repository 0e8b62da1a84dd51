//! The "edit reservation" form.

use std::rc::Rc;

use tracing::{debug, error, info, warn};

use super::{FormField, Navigation, Panel, PanelId, ReservationForm, StatusMessage, StorageHandle};

/// Loads one reservation into a form and writes changes back.
#[derive(Debug)]
pub struct EditPanel {
    storage: StorageHandle,
    current_id: Option<i64>,
    form: ReservationForm,
    status: Option<StatusMessage>,
}

impl EditPanel {
    /// Create the edit panel over the given store.
    #[must_use]
    pub fn new(storage: &StorageHandle) -> Self {
        Self {
            storage: Rc::clone(storage),
            current_id: None,
            form: ReservationForm::new(),
            status: None,
        }
    }

    /// Id of the reservation being edited.
    #[must_use]
    pub fn current_id(&self) -> Option<i64> {
        self.current_id
    }

    /// The form holding the reservation's fields.
    #[must_use]
    pub fn form(&self) -> &ReservationForm {
        &self.form
    }

    /// Set one form field.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Load a reservation into the form.
    ///
    /// Returns a navigation back to the list when there is nothing to edit:
    /// no id, an unknown id, or a storage failure.
    pub fn load(&mut self, id: Option<i64>) -> Option<Navigation> {
        self.current_id = id;
        self.form.clear();

        let Some(id) = id else {
            warn!("Edit panel opened without a reservation id");
            self.status = Some(StatusMessage::error("No reservation ID provided to edit."));
            return Some(Navigation::to(PanelId::ReservationList));
        };

        match self.storage.get(id) {
            Ok(Some(reservation)) => {
                self.form.fill(&reservation.details);
                self.status = Some(StatusMessage::info(format!(
                    "Editing Reservation ID: {id}"
                )));
                None
            }
            Ok(None) => {
                warn!("Reservation {id} not found for editing");
                self.current_id = None;
                self.status = Some(StatusMessage::error(format!(
                    "Reservation ID {id} not found."
                )));
                Some(Navigation::to(PanelId::ReservationList))
            }
            Err(err) => {
                error!("Failed to load reservation {id}: {err}");
                self.current_id = None;
                self.status = Some(StatusMessage::error(format!(
                    "Failed to load reservation details: {err}"
                )));
                Some(Navigation::to(PanelId::ReservationList))
            }
        }
    }

    /// "Update Reservation".
    ///
    /// Nothing is written unless `confirmed` is set. On success the panel
    /// returns to the list; on any failure it stays put with the form intact.
    pub fn update(&mut self, confirmed: bool) -> Option<Navigation> {
        let Some(id) = self.current_id else {
            self.status = Some(StatusMessage::error("No reservation selected for update."));
            return None;
        };

        let details = match self.form.validate() {
            Ok(details) => details,
            Err(err) => {
                warn!("Update of reservation {id} rejected: {err}");
                self.status = Some(StatusMessage::error(err.to_string()));
                return None;
            }
        };

        if !confirmed {
            self.status = Some(StatusMessage::info(format!(
                "Update of reservation ID {id} cancelled."
            )));
            return None;
        }

        match self.storage.update(id, &details) {
            Ok(true) => {
                info!("Reservation {id} updated");
                self.status = Some(StatusMessage::success(format!(
                    "Reservation ID {id} updated successfully."
                )));
                Some(Navigation::to(PanelId::ReservationList))
            }
            Ok(false) => {
                warn!("Reservation {id} disappeared before update");
                self.status = Some(StatusMessage::error(format!(
                    "Failed to update reservation ID {id}: not found."
                )));
                None
            }
            Err(err) => {
                error!("Failed to update reservation {id}: {err}");
                self.status = Some(StatusMessage::error(format!(
                    "Failed to update reservation ID {id}: {err}"
                )));
                None
            }
        }
    }

    /// "Cancel / Back to List".
    pub fn cancel(&mut self) -> Navigation {
        self.form.clear();
        self.current_id = None;
        self.status = None;
        Navigation::to(PanelId::ReservationList)
    }
}

impl Panel for EditPanel {
    fn id(&self) -> PanelId {
        PanelId::Edit
    }

    fn on_activate(&mut self, payload: Option<i64>) -> Option<Navigation> {
        debug!("Edit panel is now visible for {payload:?}");
        self.load(payload)
    }

    fn refresh_connection(&mut self, storage: &StorageHandle) {
        self.storage = Rc::clone(storage);
    }

    fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }
}
