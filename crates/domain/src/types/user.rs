//! Staff member types
//!
//! Users are created and removed by the remote service only; the client
//! refreshes them once per session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A staff member eligible for duty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
}

impl User {
    pub fn new(id: impl Into<UserId>, full_name: impl Into<String>) -> Self {
        Self { id: id.into(), full_name: full_name.into() }
    }
}
