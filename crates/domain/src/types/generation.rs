//! Bulk generation request and response

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::assignment::DayAssignment;
use crate::errors::{Result, RosterError};
use crate::utils::calendar::YearMonth;

/// Parameters of a bulk assignment-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub month: YearMonth,
    pub people_per_day: u32,
    pub dates: Vec<NaiveDate>,
}

impl GenerationRequest {
    /// Dates are sorted and de-duplicated.
    ///
    /// # Errors
    /// Returns `RosterError::InvalidInput` when `dates` is empty or
    /// `people_per_day` is zero.
    pub fn new(month: YearMonth, people_per_day: u32, dates: Vec<NaiveDate>) -> Result<Self> {
        if people_per_day == 0 {
            return Err(RosterError::InvalidInput("people per day must be at least 1".into()));
        }
        let dates: Vec<NaiveDate> = dates.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        if dates.is_empty() {
            return Err(RosterError::InvalidInput("no dates selected for generation".into()));
        }
        Ok(Self { month, people_per_day, dates })
    }
}

/// What the generator produced: assignments plus per-date violations.
///
/// The two parts are independent; a date may carry both a (partial)
/// assignment and violation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub assignments: Vec<DayAssignment>,
    pub violations: BTreeMap<NaiveDate, Vec<String>>,
}

impl GenerationOutcome {
    /// All violation messages, flattened in date order.
    pub fn warnings(&self) -> Vec<String> {
        self.violations.values().flatten().cloned().collect()
    }

    /// Dates whose violation list is non-empty.
    pub fn violating_dates(&self) -> BTreeSet<NaiveDate> {
        self.violations
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(date, _)| *date)
            .collect()
    }
}
