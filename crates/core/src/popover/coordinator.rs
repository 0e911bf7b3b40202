//! Exclusive popover coordinator
//!
//! Four kinds of inline editor share one slot, so "at most one open" holds
//! by construction rather than by bookkeeping.

use chrono::NaiveDate;
use parking_lot::Mutex;
use rota_domain::UserId;
use tracing::trace;

/// Identity of an inline editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopoverTarget {
    /// Add a day off for one user.
    UnavailabilityAdd(UserId),
    /// Add an assignee to one date.
    AssignmentAdd(NaiveDate),
    /// Swap out one assignee on one date.
    Reassign { date: NaiveDate, user_id: UserId },
    /// The month picker of the assignment panel.
    MonthPicker,
}

/// Single-slot owner of the currently open editor
#[derive(Debug, Default)]
pub struct PopoverCoordinator {
    active: Mutex<Option<PopoverTarget>>,
}

impl PopoverCoordinator {
    /// Coordinator with nothing open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `target`, closing whatever else is open. Opening the editor that
    /// is already open closes it instead.
    ///
    /// Returns the editor that is open afterwards.
    pub fn open(&self, target: PopoverTarget) -> Option<PopoverTarget> {
        let mut active = self.active.lock();
        *active = if *active == Some(target) { None } else { Some(target) };
        trace!(?active, "popover toggled");
        *active
    }

    /// Close every editor (outside click, successful mutation).
    pub fn close_all(&self) {
        self.active.lock().take();
    }

    /// Escape closes everything, like an outside click.
    pub fn handle_escape(&self) {
        self.close_all();
    }

    /// Editor open right now.
    pub fn current(&self) -> Option<PopoverTarget> {
        *self.active.lock()
    }

    /// Whether `target` is the open editor.
    pub fn is_open(&self, target: &PopoverTarget) -> bool {
        self.active.lock().as_ref() == Some(target)
    }

    /// Whether any editor is open.
    pub fn is_any_open(&self) -> bool {
        self.active.lock().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn opening_twice_toggles_closed() {
        let popovers = PopoverCoordinator::new();
        let target = PopoverTarget::UnavailabilityAdd(UserId(7));

        assert_eq!(popovers.open(target), Some(target));
        assert_eq!(popovers.open(target), None);
        assert!(!popovers.is_any_open());
    }

    #[test]
    fn opening_another_closes_the_first_across_kinds() {
        let popovers = PopoverCoordinator::new();
        let reassign = PopoverTarget::Reassign { date: day(4), user_id: UserId(1) };

        popovers.open(PopoverTarget::AssignmentAdd(day(4)));
        popovers.open(reassign);

        assert!(popovers.is_open(&reassign));
        assert!(!popovers.is_open(&PopoverTarget::AssignmentAdd(day(4))));
        assert_eq!(popovers.current(), Some(reassign));
    }

    #[test]
    fn reassign_identity_is_date_and_user() {
        let popovers = PopoverCoordinator::new();
        popovers.open(PopoverTarget::Reassign { date: day(4), user_id: UserId(1) });

        // Same user on another date is a different editor.
        let other = PopoverTarget::Reassign { date: day(5), user_id: UserId(1) };
        assert_eq!(popovers.open(other), Some(other));
    }

    #[test]
    fn escape_and_close_all_close_everything() {
        let popovers = PopoverCoordinator::new();
        popovers.open(PopoverTarget::MonthPicker);
        popovers.handle_escape();
        assert_eq!(popovers.current(), None);

        popovers.open(PopoverTarget::MonthPicker);
        popovers.close_all();
        assert!(!popovers.is_any_open());
    }
}
