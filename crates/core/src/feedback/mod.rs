//! Transient operator notifications (errors, generation warnings,
//! highlighted dates) with independent auto-expiry.

pub mod tracker;

pub use tracker::{FeedbackCategory, FeedbackSnapshot, FeedbackTracker};
