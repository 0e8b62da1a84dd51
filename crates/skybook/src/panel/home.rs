//! The landing screen.

use tracing::debug;

use super::{Navigation, Panel, PanelId, StatusMessage, StorageHandle};

const WELCOME: &str = "Welcome! Please select an option.";

/// Landing screen offering "book" and "view reservations".
///
/// Doesn't touch storage, so it keeps no handle.
#[derive(Debug)]
pub struct HomePanel {
    status: StatusMessage,
}

impl HomePanel {
    /// Create the home panel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: StatusMessage::info(WELCOME),
        }
    }

    /// "Book a New Flight".
    #[must_use]
    pub fn book(&self) -> Navigation {
        Navigation::to(PanelId::Booking)
    }

    /// "View All Reservations".
    #[must_use]
    pub fn view_reservations(&self) -> Navigation {
        Navigation::to(PanelId::ReservationList)
    }
}

impl Default for HomePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for HomePanel {
    fn id(&self) -> PanelId {
        PanelId::Home
    }

    fn on_activate(&mut self, _payload: Option<i64>) -> Option<Navigation> {
        debug!("Home panel is now visible");
        self.status = StatusMessage::info(WELCOME);
        None
    }

    fn refresh_connection(&mut self, _storage: &StorageHandle) {}

    fn status(&self) -> Option<&StatusMessage> {
        Some(&self.status)
    }
}
