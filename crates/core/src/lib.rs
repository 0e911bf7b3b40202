//! # Rota Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The roster store (client-side state and every mutation path)
//! - The gateway port to the remote roster service
//! - The ephemeral feedback tracker
//! - The exclusive popover coordinator
//!
//! ## Architecture Principles
//! - Only depends on `rota-common` and `rota-domain`
//! - No HTTP or platform code
//! - The remote service is reached through the `RosterGateway` trait

pub mod feedback;
pub mod popover;
pub mod roster;

pub use feedback::{FeedbackCategory, FeedbackSnapshot, FeedbackTracker};
pub use popover::{PopoverCoordinator, PopoverTarget};
pub use roster::ports::RosterGateway;
pub use roster::{RosterSnapshot, RosterStore};
