//! Navigation between panels.
//!
//! The [`Coordinator`] is a small state machine over [`PanelId`]: exactly one
//! panel is active at a time, starting with [`PanelId::Home`]. It also owns
//! the process-wide [`Storage`] and hands every panel the current handle
//! after each navigation, so a panel never keeps working against a store that
//! has been replaced.

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::panel::{
    BookingPanel, EditPanel, HomePanel, Navigation, Panel, PanelId, ReservationListPanel,
    StorageHandle,
};
use crate::storage::Storage;

/// Upper bound on redirects triggered by `on_activate` hooks in one navigation.
const MAX_REDIRECTS: usize = 4;

/// Owns the panels and the storage handle, and switches between panels.
#[derive(Debug)]
pub struct Coordinator {
    storage: StorageHandle,
    active: PanelId,
    home: HomePanel,
    booking: BookingPanel,
    list: ReservationListPanel,
    edit: EditPanel,
}

impl Coordinator {
    /// Build every panel over `storage` and show the home panel.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        let storage = Rc::new(storage);
        let mut coordinator = Self {
            home: HomePanel::new(),
            booking: BookingPanel::new(&storage),
            list: ReservationListPanel::new(&storage),
            edit: EditPanel::new(&storage),
            storage,
            active: PanelId::Home,
        };
        coordinator.show(PanelId::Home, None);
        coordinator
    }

    /// The panel currently shown.
    #[must_use]
    pub fn active(&self) -> PanelId {
        self.active
    }

    /// The current storage handle.
    #[must_use]
    pub fn storage(&self) -> &StorageHandle {
        &self.storage
    }

    /// Show a panel by name.
    ///
    /// Unknown names are logged and ignored; the active panel stays active.
    /// Returns whether the name resolved to a panel.
    pub fn show_panel(&mut self, name: &str, payload: Option<i64>) -> bool {
        if let Some(target) = PanelId::from_name(name) {
            self.show(target, payload);
            true
        } else {
            warn!("Panel '{name}' not found, staying on {}", self.active);
            false
        }
    }

    /// Make `target` the active panel.
    ///
    /// Runs the panel's `on_activate` hook with `payload`, then refreshes every
    /// panel's storage handle. If the hook asks to go elsewhere (the edit panel
    /// does when its record is missing) that navigation happens immediately.
    pub fn show(&mut self, target: PanelId, payload: Option<i64>) {
        let mut next = Some(Navigation { target, payload });
        let mut hops = 0;

        while let Some(nav) = next.take() {
            if hops == MAX_REDIRECTS {
                warn!("Too many panel redirects, stopping at {}", self.active);
                break;
            }
            hops += 1;

            self.active = nav.target;
            info!("Showing panel: {}", nav.target);
            next = self.panel_mut(nav.target).on_activate(nav.payload);
            self.refresh_all_connections();
        }
    }

    /// Perform a navigation returned by a panel action, if there is one.
    pub fn navigate(&mut self, navigation: Option<Navigation>) {
        if let Some(nav) = navigation {
            self.show(nav.target, nav.payload);
        }
    }

    /// Swap in a newly opened store and push it to every panel.
    ///
    /// Returns the previous store so the caller can close it, or `None` if a
    /// handle to it is still held outside the coordinator.
    pub fn reconnect(&mut self, storage: Storage) -> Option<Storage> {
        info!("Switching storage to {}", storage.path().display());
        let previous = std::mem::replace(&mut self.storage, Rc::new(storage));
        self.refresh_all_connections();
        Rc::try_unwrap(previous).ok()
    }

    /// Drop the panels and close the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to close, or if a handle to it is
    /// still held elsewhere.
    pub fn shutdown(self) -> Result<()> {
        let Self {
            storage,
            home,
            booking,
            list,
            edit,
            ..
        } = self;
        drop((home, booking, list, edit));

        match Rc::try_unwrap(storage) {
            Ok(storage) => storage.close(),
            Err(shared) => Err(Error::internal(format!(
                "storage handle still shared at shutdown ({} references)",
                Rc::strong_count(&shared)
            ))),
        }
    }

    /// The home panel.
    #[must_use]
    pub fn home(&self) -> &HomePanel {
        &self.home
    }

    /// The booking panel.
    #[must_use]
    pub fn booking(&self) -> &BookingPanel {
        &self.booking
    }

    /// The booking panel, for filling in and submitting the form.
    pub fn booking_mut(&mut self) -> &mut BookingPanel {
        &mut self.booking
    }

    /// The reservation list panel.
    #[must_use]
    pub fn list(&self) -> &ReservationListPanel {
        &self.list
    }

    /// The reservation list panel, for selecting, editing and deleting rows.
    pub fn list_mut(&mut self) -> &mut ReservationListPanel {
        &mut self.list
    }

    /// The edit panel.
    #[must_use]
    pub fn edit(&self) -> &EditPanel {
        &self.edit
    }

    /// The edit panel, for changing and saving fields.
    pub fn edit_mut(&mut self) -> &mut EditPanel {
        &mut self.edit
    }

    /// Look up a panel through its lifecycle hooks.
    #[must_use]
    pub fn panel(&self, id: PanelId) -> &dyn Panel {
        match id {
            PanelId::Home => &self.home,
            PanelId::Booking => &self.booking,
            PanelId::ReservationList => &self.list,
            PanelId::Edit => &self.edit,
        }
    }

    /// The active panel.
    #[must_use]
    pub fn active_panel(&self) -> &dyn Panel {
        self.panel(self.active)
    }

    fn panel_mut(&mut self, id: PanelId) -> &mut dyn Panel {
        match id {
            PanelId::Home => &mut self.home,
            PanelId::Booking => &mut self.booking,
            PanelId::ReservationList => &mut self.list,
            PanelId::Edit => &mut self.edit,
        }
    }

    fn refresh_all_connections(&mut self) {
        let storage = Rc::clone(&self.storage);
        for id in PanelId::ALL {
            self.panel_mut(id).refresh_connection(&storage);
        }
        debug!("Storage handle refreshed on {} panels", PanelId::ALL.len());
    }
}
