//! Month cursor and date range helpers
//!
//! A [`YearMonth`] is the `YYYY-MM` token every panel uses as its view
//! cursor. All dates a panel renders are recomputed from it.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, RosterError};

/// A calendar month, always representable as a `YYYY-MM` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// Build a month from its numeric parts.
    ///
    /// # Errors
    /// Returns `RosterError::InvalidInput` when `month` is outside `1..=12`
    /// or the year cannot be represented.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first }).ok_or_else(|| {
            RosterError::InvalidInput(format!("invalid year-month: {year:04}-{month:02}"))
        })
    }

    /// The month a given day belongs to.
    pub fn containing(date: NaiveDate) -> Self {
        Self { first: date - Days::new(u64::from(date.day0())) }
    }

    /// The month of today's local date.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        // with_day cannot fail for a day count taken from the same month
        self.first.with_day(self.day_count()).unwrap_or(self.first)
    }

    /// Number of days in the month (leap-year aware).
    pub fn day_count(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Every day of the month, in calendar order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first.iter_days().take(self.day_count() as usize).collect()
    }

    /// Inclusive range from the first to the last day.
    pub fn range(&self) -> DateRange {
        DateRange { start: self.first_day(), end: self.last_day() }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::containing(date) == *self
    }

    /// The month `months` away from this one (negative goes back).
    ///
    /// # Errors
    /// Returns `RosterError::InvalidInput` when the result leaves the
    /// representable calendar.
    pub fn offset(&self, months: i32) -> Result<Self> {
        let index = i64::from(self.year()) * 12 + i64::from(self.month0()) + i64::from(months);
        let year = i32::try_from(index.div_euclid(12))
            .map_err(|_| RosterError::InvalidInput(format!("month offset out of range: {months}")))?;
        let month = u32::try_from(index.rem_euclid(12)).unwrap_or(0) + 1;
        Self::new(year, month)
    }

    pub fn next(&self) -> Result<Self> {
        self.offset(1)
    }

    pub fn previous(&self) -> Result<Self> {
        self.offset(-1)
    }

    fn month0(&self) -> u32 {
        self.first.month0()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RosterError::InvalidInput(format!("expected YYYY-MM, got '{s}'"));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;

        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Inclusive date range used to scope list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// # Errors
    /// Returns `RosterError::InvalidInput` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(RosterError::InvalidInput(format!(
                "range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
