//! Ephemeral feedback tracker
//!
//! Owns the transient notifications shown to the operator: one error
//! message, a batch of generation warnings and a set of highlighted dates.
//! Each category expires on its own timer or on explicit dismissal. A new
//! report for a category cancels and reschedules that category's timer.

use std::collections::BTreeSet;
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::NaiveDate;
use parking_lot::Mutex;
use rota_common::time::{timeout, TimerHandle};
use rota_domain::FeedbackConfig;
use tracing::debug;

/// Notification categories, each with an independent expiry timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackCategory {
    /// The single visible error message.
    Error,
    /// Violation messages from the last generation.
    Warnings,
    /// Dates flagged by the last generation.
    Highlights,
}

/// Point-in-time view of every visible notification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackSnapshot {
    /// Visible error, if any.
    pub error: Option<String>,
    /// Visible warning texts; empty when none.
    pub warnings: Vec<String>,
    /// Highlighted dates; empty when none.
    pub highlighted: BTreeSet<NaiveDate>,
}

struct Slot<T> {
    value: Option<T>,
    generation: u64,
    timer: Option<TimerHandle>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { value: None, generation: 0, timer: None }
    }
}

impl<T> Slot<T> {
    /// Replace the value and return the generation the new timer belongs to.
    fn set(&mut self, value: T) -> u64 {
        self.cancel_timer();
        self.generation += 1;
        self.value = Some(value);
        self.generation
    }

    fn clear(&mut self) {
        self.cancel_timer();
        self.generation += 1;
        self.value = None;
    }

    /// Clear only if no newer report arrived since `generation` was issued.
    fn expire(&mut self, generation: u64) -> bool {
        if self.generation != generation {
            return false;
        }
        self.value = None;
        self.timer = None;
        true
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

#[derive(Default)]
struct FeedbackState {
    error: Slot<String>,
    warnings: Slot<Vec<String>>,
    highlights: Slot<BTreeSet<NaiveDate>>,
}

impl FeedbackState {
    fn expire(&mut self, category: FeedbackCategory, generation: u64) -> bool {
        match category {
            FeedbackCategory::Error => self.error.expire(generation),
            FeedbackCategory::Warnings => self.warnings.expire(generation),
            FeedbackCategory::Highlights => self.highlights.expire(generation),
        }
    }

    fn attach_timer(&mut self, category: FeedbackCategory, timer: TimerHandle) {
        let slot_timer = match category {
            FeedbackCategory::Error => &mut self.error.timer,
            FeedbackCategory::Warnings => &mut self.warnings.timer,
            FeedbackCategory::Highlights => &mut self.highlights.timer,
        };
        *slot_timer = Some(timer);
    }
}

/// Transient error / warning / highlight notifications with auto-expiry.
///
/// Timers are spawned on the ambient tokio runtime, so reporting must
/// happen from within one.
pub struct FeedbackTracker {
    config: FeedbackConfig,
    state: Arc<Mutex<FeedbackState>>,
}

impl FeedbackTracker {
    /// Create an empty tracker using the lifetimes in `config`.
    pub fn new(config: FeedbackConfig) -> Self {
        Self { config, state: Arc::new(Mutex::new(FeedbackState::default())) }
    }

    /// Lifetimes in use.
    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    /// Show `message`, replacing any visible error and restarting the
    /// error timer.
    pub fn report_error(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "reporting error");

        let mut state = self.state.lock();
        let generation = state.error.set(message);
        let timer = self.schedule(FeedbackCategory::Error, generation, self.config.error_ttl());
        state.attach_timer(FeedbackCategory::Error, timer);
    }

    /// Hide the error now and cancel its timer.
    pub fn clear_error(&self) {
        self.state.lock().error.clear();
    }

    /// Replace the warning batch and the highlighted dates.
    ///
    /// Highlights expire after the highlight lifetime, the warning texts
    /// after the (longer) warning lifetime. An empty batch clears the
    /// category instead of showing nothing for a while.
    pub fn report_warnings(&self, messages: Vec<String>, dates: BTreeSet<NaiveDate>) {
        debug!(warnings = messages.len(), dates = dates.len(), "reporting warnings");

        let mut state = self.state.lock();

        if messages.is_empty() {
            state.warnings.clear();
        } else {
            let generation = state.warnings.set(messages);
            let timer =
                self.schedule(FeedbackCategory::Warnings, generation, self.config.warning_ttl());
            state.attach_timer(FeedbackCategory::Warnings, timer);
        }

        if dates.is_empty() {
            state.highlights.clear();
        } else {
            let generation = state.highlights.set(dates);
            let timer = self.schedule(
                FeedbackCategory::Highlights,
                generation,
                self.config.highlight_ttl(),
            );
            state.attach_timer(FeedbackCategory::Highlights, timer);
        }
    }

    /// Explicit dismissal clears warnings and highlights together.
    pub fn dismiss_warnings(&self) {
        let mut state = self.state.lock();
        state.warnings.clear();
        state.highlights.clear();
    }

    /// Visible error message.
    pub fn current_error(&self) -> Option<String> {
        self.state.lock().error.value.clone()
    }

    /// Visible warning texts.
    pub fn warnings(&self) -> Vec<String> {
        self.state.lock().warnings.value.clone().unwrap_or_default()
    }

    /// Dates currently highlighted.
    pub fn highlighted_dates(&self) -> BTreeSet<NaiveDate> {
        self.state.lock().highlights.value.clone().unwrap_or_default()
    }

    /// Whether `date` is currently highlighted.
    pub fn is_highlighted(&self, date: NaiveDate) -> bool {
        self.state.lock().highlights.value.as_ref().is_some_and(|dates| dates.contains(&date))
    }

    /// Owned copy of every visible notification.
    pub fn snapshot(&self) -> FeedbackSnapshot {
        let state = self.state.lock();
        FeedbackSnapshot {
            error: state.error.value.clone(),
            warnings: state.warnings.value.clone().unwrap_or_default(),
            highlighted: state.highlights.value.clone().unwrap_or_default(),
        }
    }

    /// Drop every notification and cancel all pending timers.
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        state.error.clear();
        state.warnings.clear();
        state.highlights.clear();
    }

    fn schedule(&self, category: FeedbackCategory, generation: u64, ttl: Duration) -> TimerHandle {
        let state: Weak<Mutex<FeedbackState>> = Arc::downgrade(&self.state);

        timeout(ttl, move || {
            if let Some(state) = state.upgrade() {
                if state.lock().expire(category, generation) {
                    debug!(?category, "feedback expired");
                }
            }
        })
    }
}

impl Drop for FeedbackTracker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn error_expires_after_its_lifetime() {
        let tracker = FeedbackTracker::new(FeedbackConfig::default());
        tracker.report_error("boom");

        sleep(Duration::from_millis(4_900)).await;
        assert_eq!(tracker.current_error().as_deref(), Some("boom"));

        sleep(Duration::from_millis(200)).await;
        assert_eq!(tracker.current_error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn second_error_supersedes_the_first_timer() {
        let tracker = FeedbackTracker::new(FeedbackConfig::default());
        tracker.report_error("first");

        sleep(Duration::from_millis(3_000)).await;
        tracker.report_error("second");
        assert_eq!(tracker.current_error().as_deref(), Some("second"));

        // The first report's deadline passes without clearing the second.
        sleep(Duration::from_millis(2_500)).await;
        assert_eq!(tracker.current_error().as_deref(), Some("second"));

        sleep(Duration::from_millis(2_600)).await;
        assert_eq!(tracker.current_error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_error_cancels_the_timer() {
        let tracker = FeedbackTracker::new(FeedbackConfig::default());
        tracker.report_error("first");
        tracker.clear_error();
        assert_eq!(tracker.current_error(), None);

        // A later error must not be cut short by the cancelled timer.
        sleep(Duration::from_millis(3_000)).await;
        tracker.report_error("second");
        sleep(Duration::from_millis(2_500)).await;
        assert_eq!(tracker.current_error().as_deref(), Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn highlights_expire_before_warnings() {
        let tracker = FeedbackTracker::new(FeedbackConfig::default());
        tracker.report_warnings(vec!["short".into()], BTreeSet::from([date(5)]));

        sleep(Duration::from_millis(5_100)).await;
        assert!(tracker.highlighted_dates().is_empty());
        assert_eq!(tracker.warnings(), vec!["short".to_string()]);

        sleep(Duration::from_millis(5_000)).await;
        assert!(tracker.warnings().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dismissal_clears_warnings_and_highlights() {
        let tracker = FeedbackTracker::new(FeedbackConfig::default());
        tracker.report_warnings(vec!["a".into(), "b".into()], BTreeSet::from([date(4), date(5)]));
        assert!(tracker.is_highlighted(date(4)));

        tracker.dismiss_warnings();
        assert_eq!(tracker.snapshot(), FeedbackSnapshot::default());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_batch_clears_previous_warnings() {
        let tracker = FeedbackTracker::new(FeedbackConfig::default());
        tracker.report_warnings(vec!["stale".into()], BTreeSet::from([date(4)]));
        tracker.report_warnings(Vec::new(), BTreeSet::new());

        assert!(tracker.warnings().is_empty());
        assert!(!tracker.is_highlighted(date(4)));
    }
}
