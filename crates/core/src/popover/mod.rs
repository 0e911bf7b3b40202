//! Mutually exclusive inline editors.

pub mod coordinator;

pub use coordinator::{PopoverCoordinator, PopoverTarget};
