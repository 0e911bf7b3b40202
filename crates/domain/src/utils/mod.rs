//! Pure helpers with no state

pub mod calendar;
