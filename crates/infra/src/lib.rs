//! # Rota Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The HTTP client (timeouts, bounded retry for idempotent requests)
//! - The JSON API client and its error classification
//! - `HttpRosterGateway`, the REST adapter behind `RosterGateway`
//! - Configuration loading (environment, then JSON/TOML file)
//!
//! ## Architecture
//! - Implements traits defined in `rota-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, ApiErrorCategory, HttpRosterGateway};
pub use errors::InfraError;
pub use http::HttpClient;
