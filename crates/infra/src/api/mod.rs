//! Planner REST API access
//!
//! - `client`: JSON GET/POST/DELETE over [`crate::http::HttpClient`]
//! - `errors`: status classification and conversion into `RosterError`
//! - `wire`: request/response shapes of the planner service
//! - `gateway`: `HttpRosterGateway`, the `RosterGateway` implementation

pub mod client;
pub mod errors;
pub mod gateway;
pub mod wire;

pub use client::ApiClient;
pub use errors::{ApiError, ApiErrorCategory};
pub use gateway::HttpRosterGateway;
