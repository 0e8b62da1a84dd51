//! Screen controllers driven by the [`Coordinator`](crate::coordinator::Coordinator).
//!
//! Each panel holds transient form or list state plus a shared handle to the
//! process-wide [`Storage`]. Panels never navigate on their own; actions that
//! should switch screens return a [`Navigation`] for the coordinator to carry
//! out. Storage failures are caught here and turned into a [`StatusMessage`],
//! so they never reach the front end as errors.

mod booking;
mod edit;
mod form;
mod home;
mod list;

use std::fmt;
use std::rc::Rc;

use crate::storage::Storage;

pub use booking::BookingPanel;
pub use edit::EditPanel;
pub use form::{FormField, ReservationForm};
pub use home::HomePanel;
pub use list::ReservationListPanel;

/// Shared handle to the open store.
///
/// The coordinator owns the authoritative copy; panels keep clones that it
/// refreshes after every navigation.
pub type StorageHandle = Rc<Storage>;

/// Identifies one of the application's screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    /// Landing screen with the main options.
    Home,
    /// Form for booking a new reservation.
    Booking,
    /// Table of every stored reservation.
    ReservationList,
    /// Form for editing an existing reservation.
    Edit,
}

impl PanelId {
    /// Every panel, in registration order.
    pub const ALL: [Self; 4] = [Self::Home, Self::Booking, Self::ReservationList, Self::Edit];

    /// Canonical short name used by the CLI and session commands.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Booking => "booking",
            Self::ReservationList => "reservations",
            Self::Edit => "edit",
        }
    }

    /// Resolve a panel by name.
    ///
    /// Accepts the canonical short names, a few aliases and the page names
    /// used by the desktop version (`HomePage`, `BookingPage`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "home" | "homepage" => Some(Self::Home),
            "booking" | "book" | "bookingpage" => Some(Self::Booking),
            "reservations" | "list" | "reservationspage" => Some(Self::ReservationList),
            "edit" | "editreservationpage" => Some(Self::Edit),
            _ => None,
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request to switch the active panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// Panel to activate.
    pub target: PanelId,
    /// Optional reservation id handed to the target's `on_activate` hook.
    pub payload: Option<i64>,
}

impl Navigation {
    /// Navigate to `target` without a payload.
    #[must_use]
    pub fn to(target: PanelId) -> Self {
        Self {
            target,
            payload: None,
        }
    }

    /// Navigate to `target`, passing a reservation id along.
    #[must_use]
    pub fn with_payload(target: PanelId, id: i64) -> Self {
        Self {
            target,
            payload: Some(id),
        }
    }
}

/// Severity of a panel's status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Neutral information.
    Info,
    /// An operation completed.
    Success,
    /// The user needs to do something first (e.g. select a row).
    Warning,
    /// An operation failed.
    Error,
}

/// The line of feedback a panel shows under its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Severity.
    pub level: StatusLevel,
    /// Human-readable text.
    pub text: String,
}

impl StatusMessage {
    /// An informational status.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Info, text)
    }

    /// A success status.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Success, text)
    }

    /// A warning status.
    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warning, text)
    }

    /// An error status.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(StatusLevel::Error, text)
    }

    fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    /// Whether this status reports a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            StatusLevel::Info | StatusLevel::Success => f.write_str(&self.text),
            StatusLevel::Warning => write!(f, "Warning: {}", self.text),
            StatusLevel::Error => write!(f, "Error: {}", self.text),
        }
    }
}

/// Lifecycle hooks every panel implements.
///
/// The coordinator calls these on all panels uniformly; panels that don't
/// care about a hook implement it as a no-op.
pub trait Panel: fmt::Debug {
    /// Which screen this is.
    fn id(&self) -> PanelId;

    /// Called when the panel becomes the active one.
    ///
    /// `payload` carries a reservation id when the caller supplied one. The
    /// returned navigation, if any, is performed right away by the coordinator.
    fn on_activate(&mut self, payload: Option<i64>) -> Option<Navigation>;

    /// Replace the panel's storage handle with the coordinator's current one.
    fn refresh_connection(&mut self, storage: &StorageHandle);

    /// The panel's current status line, if it shows one.
    fn status(&self) -> Option<&StatusMessage>;
}
