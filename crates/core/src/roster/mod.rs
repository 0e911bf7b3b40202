//! Roster state and the port to the remote roster service

pub mod ports;
pub mod store;

pub use ports::RosterGateway;
pub use store::{RosterSnapshot, RosterStore};
