//! Duty assignment types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::UserId;
use crate::errors::{Result, RosterError};

/// Summary of a user on duty, as rendered in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedUser {
    pub id: UserId,
    pub name: String,
}

impl AssignedUser {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// The set of users on duty for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAssignment {
    pub date: NaiveDate,
    pub users: Vec<AssignedUser>,
}

/// Date → ordered assignees, as displayed by the assignment grid.
pub type AssignmentGrid = BTreeMap<NaiveDate, Vec<AssignedUser>>;

/// What a single reassignment does to the set for its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Remove,
    Replace,
}

/// One edit of the assignment set for a date.
///
/// `previous = None` adds `new`, `new = None` removes `previous`, both set
/// replaces one user with the other. Both empty is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentChange {
    date: NaiveDate,
    previous: Option<UserId>,
    new: Option<UserId>,
}

impl AssignmentChange {
    /// # Errors
    /// Returns `RosterError::InvalidInput` when both users are `None`.
    pub fn new(date: NaiveDate, previous: Option<UserId>, new: Option<UserId>) -> Result<Self> {
        if previous.is_none() && new.is_none() {
            return Err(RosterError::InvalidInput(format!(
                "assignment change for {date} names neither a previous nor a new user"
            )));
        }
        Ok(Self { date, previous, new })
    }

    pub fn add(date: NaiveDate, user: UserId) -> Self {
        Self { date, previous: None, new: Some(user) }
    }

    pub fn remove(date: NaiveDate, user: UserId) -> Self {
        Self { date, previous: Some(user), new: None }
    }

    pub fn replace(date: NaiveDate, previous: UserId, new: UserId) -> Self {
        Self { date, previous: Some(previous), new: Some(new) }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn previous(&self) -> Option<UserId> {
        self.previous
    }

    pub fn new_user(&self) -> Option<UserId> {
        self.new
    }

    pub fn kind(&self) -> ChangeKind {
        match (self.previous, self.new) {
            (Some(_), Some(_)) => ChangeKind::Replace,
            (Some(_), None) => ChangeKind::Remove,
            _ => ChangeKind::Add,
        }
    }
}
