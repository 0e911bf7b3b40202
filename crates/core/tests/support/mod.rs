//! Shared test helpers for `rota-core` integration tests.
//!
//! The in-memory gateway behaves like a small roster service so store tests
//! can exercise refetch-after-mutate without scripting every response.

pub mod gateway;

use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` literal.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date literal")
}
