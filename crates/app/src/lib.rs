//! # Rota App
//!
//! Application layer for the roster client.
//!
//! This crate contains:
//! - The roster context (dependency injection)
//! - Logging setup and command execution helpers
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the HTTP gateway into the roster store
//! - Presentation layers drive the store through [`RosterContext`]

pub mod context;
pub mod utils;

pub use context::*;
