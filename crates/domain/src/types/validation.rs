//! Structured rejection returned when creating a day-off record

use std::fmt;

use serde::{Deserialize, Serialize};

/// Field-level rejection details reported by the remote service.
///
/// Exactly one human-readable message is derived from it, with the
/// precedence cross-field conflict, then date-specific problem, then the
/// unstructured detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    #[serde(default)]
    pub non_field_errors: Vec<String>,
    #[serde(default)]
    pub date: Vec<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ValidationFailure {
    /// The message to show, if the payload carried anything usable.
    pub fn message(&self) -> Option<String> {
        if !self.non_field_errors.is_empty() {
            return Some(self.non_field_errors.join(", "));
        }
        if !self.date.is_empty() {
            return Some(self.date.join(", "));
        }
        self.detail.as_ref().filter(|detail| !detail.trim().is_empty()).cloned()
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message().unwrap_or_else(|| fallback.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.message().is_none()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message_or("request rejected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_field_message_wins() {
        let failure = ValidationFailure {
            non_field_errors: vec!["already recorded".into()],
            date: vec!["date is in the past".into()],
            detail: Some("bad request".into()),
        };
        assert_eq!(failure.message().as_deref(), Some("already recorded"));
    }

    #[test]
    fn date_message_before_detail() {
        let failure = ValidationFailure {
            date: vec!["date is in the past".into(), "not a duty day".into()],
            detail: Some("bad request".into()),
            ..Default::default()
        };
        assert_eq!(failure.message().as_deref(), Some("date is in the past, not a duty day"));
    }

    #[test]
    fn falls_back_when_nothing_usable() {
        let failure = ValidationFailure { detail: Some("  ".into()), ..Default::default() };
        assert!(failure.is_empty());
        assert_eq!(failure.message_or("generic"), "generic");
    }
}
