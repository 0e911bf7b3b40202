//! Day-off (unavailability) records

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Identifier assigned by the remote service to a day-off record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnavailabilityId(pub i64);

impl fmt::Display for UnavailabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UnavailabilityId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A day on which a specific user is not eligible for duty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailabilityRecord {
    pub id: UnavailabilityId,
    pub user_id: UserId,
    pub date: NaiveDate,
}

/// Payload for creating a day-off record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUnavailability {
    pub user_id: UserId,
    pub date: NaiveDate,
}
