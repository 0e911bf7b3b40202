//! Domain types and models
//!
//! Everything the roster client exchanges with the remote planner service,
//! expressed as strongly typed values independent of the wire encoding.

pub mod assignment;
pub mod generation;
pub mod unavailability;
pub mod user;
pub mod validation;

pub use assignment::{AssignedUser, AssignmentChange, AssignmentGrid, ChangeKind, DayAssignment};
pub use generation::{GenerationOutcome, GenerationRequest};
pub use unavailability::{NewUnavailability, UnavailabilityId, UnavailabilityRecord};
pub use user::{User, UserId};
pub use validation::ValidationFailure;
