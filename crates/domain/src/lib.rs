//! # Rota Domain
//!
//! Business domain types and models for the duty roster client.
//!
//! This crate contains:
//! - Roster data types (users, days off, assignments, generation payloads)
//! - The `YearMonth` view-cursor token and date range helpers
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other rota crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::calendar::{DateRange, YearMonth};
