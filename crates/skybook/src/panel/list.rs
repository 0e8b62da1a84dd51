//! The table of current reservations.

use std::rc::Rc;

use tracing::{debug, error, info, warn};

use super::{Navigation, Panel, PanelId, StatusMessage, StorageHandle};
use crate::reservation::Reservation;

/// Lists every reservation and offers edit/delete on the selected row.
#[derive(Debug)]
pub struct ReservationListPanel {
    storage: StorageHandle,
    rows: Vec<Reservation>,
    selected: Option<i64>,
    status: Option<StatusMessage>,
}

impl ReservationListPanel {
    /// Create the list panel over the given store.
    #[must_use]
    pub fn new(storage: &StorageHandle) -> Self {
        Self {
            storage: Rc::clone(storage),
            rows: Vec::new(),
            selected: None,
            status: None,
        }
    }

    /// Rows as last loaded, newest first.
    #[must_use]
    pub fn rows(&self) -> &[Reservation] {
        &self.rows
    }

    /// Id of the selected row, if any.
    #[must_use]
    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    /// "Refresh List": reload every row from storage.
    ///
    /// On a storage error the previously loaded rows stay on screen.
    pub fn load(&mut self) -> bool {
        match self.storage.list_all() {
            Ok(rows) => {
                self.status = Some(if rows.is_empty() {
                    StatusMessage::info("No reservations found.")
                } else {
                    StatusMessage::success(format!("Loaded {} reservations.", rows.len()))
                });
                if self
                    .selected
                    .is_some_and(|id| !rows.iter().any(|r| r.id == id))
                {
                    self.selected = None;
                }
                self.rows = rows;
                true
            }
            Err(err) => {
                error!("Failed to load reservations: {err}");
                self.status = Some(StatusMessage::error(format!(
                    "Failed to load reservations: {err}"
                )));
                false
            }
        }
    }

    /// Select the row with the given id.
    ///
    /// Returns `false` and leaves the selection unchanged if no loaded row
    /// has that id.
    pub fn select(&mut self, id: i64) -> bool {
        if self.rows.iter().any(|r| r.id == id) {
            self.selected = Some(id);
            true
        } else {
            warn!("Reservation {id} is not in the list");
            self.status = Some(StatusMessage::warning(format!(
                "Reservation ID {id} is not in the list."
            )));
            false
        }
    }

    /// "Edit Selected".
    pub fn edit_selected(&mut self) -> Option<Navigation> {
        if let Some(id) = self.selected_or_warn() {
            debug!("Editing reservation {id}");
            Some(Navigation::with_payload(PanelId::Edit, id))
        } else {
            None
        }
    }

    /// "Delete Selected".
    ///
    /// Nothing happens unless `confirmed` is set. A successful delete reloads
    /// the list; an id that no longer exists is reported as a failure.
    pub fn delete_selected(&mut self, confirmed: bool) -> bool {
        let Some(id) = self.selected_or_warn() else {
            return false;
        };

        if !confirmed {
            self.status = Some(StatusMessage::info(format!(
                "Deletion of reservation ID {id} cancelled."
            )));
            return false;
        }

        match self.storage.delete(id) {
            Ok(true) => {
                info!("Reservation {id} deleted");
                self.selected = None;
                self.load();
                self.status = Some(StatusMessage::success(format!(
                    "Reservation ID {id} deleted."
                )));
                true
            }
            Ok(false) => {
                warn!("Reservation {id} was already gone");
                self.status = Some(StatusMessage::error(format!(
                    "Reservation ID {id} not found."
                )));
                false
            }
            Err(err) => {
                error!("Failed to delete reservation {id}: {err}");
                self.status = Some(StatusMessage::error(format!(
                    "Failed to delete reservation ID {id}: {err}"
                )));
                false
            }
        }
    }

    /// "Back to Home".
    #[must_use]
    pub fn back(&self) -> Navigation {
        Navigation::to(PanelId::Home)
    }

    fn selected_or_warn(&mut self) -> Option<i64> {
        if self.selected.is_none() {
            self.status = Some(StatusMessage::warning(
                "Please select a reservation from the list first.",
            ));
        }
        self.selected
    }
}

impl Panel for ReservationListPanel {
    fn id(&self) -> PanelId {
        PanelId::ReservationList
    }

    fn on_activate(&mut self, _payload: Option<i64>) -> Option<Navigation> {
        debug!("Reservation list is now visible, refreshing");
        self.load();
        None
    }

    fn refresh_connection(&mut self, storage: &StorageHandle) {
        self.storage = Rc::clone(storage);
    }

    fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }
}
