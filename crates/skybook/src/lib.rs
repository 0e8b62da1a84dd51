//! `skybook` - A local flight reservation manager
//!
//! This library provides `SQLite`-backed storage for flight reservations, the
//! panels that collect and display them, and the coordinator that switches
//! between panels while keeping every panel on the current storage handle.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod panel;
pub mod render;
pub mod reservation;
pub mod session;
pub mod storage;

pub use config::Config;
pub use coordinator::Coordinator;
pub use error::{Error, Result, ValidationError};
pub use logging::init_logging;
pub use reservation::{Reservation, ReservationDetails};
pub use storage::Storage;
