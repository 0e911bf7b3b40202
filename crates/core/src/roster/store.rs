//! Roster store - the single owner of client-side roster state
//!
//! Holds the staff list, the day-off records of the viewed month, the
//! assignment grid of the (independently) viewed month, the date selection
//! and the people-per-day input. Every remote failure is converted into a
//! notification on the [`FeedbackTracker`]; nothing here panics on a
//! gateway error.
//!
//! State sits behind a `parking_lot::Mutex` that is never held across an
//! `.await`, so the store can be shared as `Arc<RosterStore>` between
//! concurrent callers. Gateway responses are applied when they arrive, even
//! if the view cursor moved meanwhile.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use rota_domain::constants::{
    DEFAULT_PEOPLE_PER_DAY, MSG_ADD_UNAVAILABILITY_FAILED, MSG_ADD_UNAVAILABILITY_NETWORK,
    MSG_CHANGE_ASSIGNMENT_FAILED, MSG_DELETE_UNAVAILABILITY_FAILED, MSG_GENERATE_FAILED,
    MSG_LOAD_UNAVAILABILITY_FAILED, MSG_LOAD_USERS_FAILED,
};
use rota_domain::{
    AssignedUser, AssignmentChange, AssignmentGrid, DayAssignment, FeedbackConfig,
    GenerationOutcome, GenerationRequest, NewUnavailability, Result, RosterError,
    UnavailabilityId, UnavailabilityRecord, User, UserId, YearMonth,
};
use tracing::{debug, info, warn};

use super::ports::RosterGateway;
use crate::feedback::FeedbackTracker;
use crate::popover::PopoverCoordinator;

/// Owned copy of the roster state at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSnapshot {
    /// Staff list, in service order.
    pub users: Vec<User>,
    /// Day-off records of `unavailability_month`.
    pub unavailability: Vec<UnavailabilityRecord>,
    /// Month shown in the day-off panel.
    pub unavailability_month: YearMonth,
    /// Assignees per day of `assignment_month`.
    pub assignments: AssignmentGrid,
    /// Month shown in the assignment panel.
    pub assignment_month: YearMonth,
    /// Dates picked for the next generation request.
    pub selected_dates: BTreeSet<NaiveDate>,
    /// Headcount for the next generation request.
    pub people_per_day: u32,
    /// A user listing is in flight.
    pub loading_users: bool,
    /// A generation request is in flight.
    pub generating: bool,
}

impl RosterSnapshot {
    fn new(month: YearMonth, people_per_day: u32) -> Self {
        Self {
            users: Vec::new(),
            unavailability: Vec::new(),
            unavailability_month: month,
            assignments: AssignmentGrid::new(),
            assignment_month: month,
            selected_dates: BTreeSet::new(),
            people_per_day,
            loading_users: false,
            generating: false,
        }
    }
}

/// Resets a busy flag when dropped, including when the owning future is
/// dropped before the gateway call resolves.
struct BusyFlag<'a> {
    state: &'a Mutex<RosterSnapshot>,
    flag: FlagField,
}

type FlagField = fn(&mut RosterSnapshot) -> &mut bool;

impl<'a> BusyFlag<'a> {
    fn raise(state: &'a Mutex<RosterSnapshot>, flag: FlagField) -> Self {
        *flag(&mut state.lock()) = true;
        Self { state, flag }
    }

    /// Raise the flag unless it is already up.
    fn try_raise(state: &'a Mutex<RosterSnapshot>, flag: FlagField) -> Option<Self> {
        let mut guard = state.lock();
        let raised = flag(&mut guard);
        if *raised {
            return None;
        }
        *raised = true;
        drop(guard);
        Some(Self { state, flag })
    }
}

impl Drop for BusyFlag<'_> {
    fn drop(&mut self) {
        *(self.flag)(&mut self.state.lock()) = false;
    }
}

fn loading_users(state: &mut RosterSnapshot) -> &mut bool {
    &mut state.loading_users
}

fn generating(state: &mut RosterSnapshot) -> &mut bool {
    &mut state.generating
}

/// Client-side roster state plus the operations that mutate it
pub struct RosterStore {
    gateway: Arc<dyn RosterGateway>,
    feedback: Arc<FeedbackTracker>,
    popovers: Arc<PopoverCoordinator>,
    state: Mutex<RosterSnapshot>,
}

impl RosterStore {
    /// Create a store viewing the current month in both panels.
    pub fn new(gateway: Arc<dyn RosterGateway>, feedback: FeedbackConfig) -> Self {
        Self {
            gateway,
            feedback: Arc::new(FeedbackTracker::new(feedback)),
            popovers: Arc::new(PopoverCoordinator::new()),
            state: Mutex::new(RosterSnapshot::new(YearMonth::current(), DEFAULT_PEOPLE_PER_DAY)),
        }
    }

    /// Start both panels on `month` instead of the current one.
    pub fn with_month(self, month: YearMonth) -> Self {
        {
            let mut state = self.state.lock();
            state.unavailability_month = month;
            state.assignment_month = month;
        }
        self
    }

    /// Pre-fill the people-per-day input. Zero is ignored.
    pub fn with_people_per_day(self, people_per_day: u32) -> Self {
        if people_per_day > 0 {
            self.state.lock().people_per_day = people_per_day;
        }
        self
    }

    /// Share an existing popover coordinator (e.g. one owned by the view).
    pub fn with_popovers(mut self, popovers: Arc<PopoverCoordinator>) -> Self {
        self.popovers = popovers;
        self
    }

    /// Notifications raised by this store.
    pub fn feedback(&self) -> &Arc<FeedbackTracker> {
        &self.feedback
    }

    /// Editor coordinator closed after every completed edit.
    pub fn popovers(&self) -> &Arc<PopoverCoordinator> {
        &self.popovers
    }

    /// Initial load: staff, then both month views.
    ///
    /// Every step runs even if an earlier one fails; the first failure is
    /// returned and all of them are already surfaced as notifications.
    pub async fn start(&self) -> Result<()> {
        info!("loading roster");
        let users = self.load_users().await;
        let unavailability = self.refetch_unavailability().await;
        self.refetch_assignments().await;
        users.and(unavailability)
    }

    // ---------------------------------------------------------------------
    // Users
    // ---------------------------------------------------------------------

    /// Replace the staff list. On failure the previous list stays and the
    /// "server unreachable" message is shown.
    pub async fn load_users(&self) -> Result<()> {
        let busy = BusyFlag::raise(&self.state, loading_users);
        let result = self.gateway.list_users().await;
        drop(busy);

        let mut state = self.state.lock();
        match result {
            Ok(users) => {
                debug!(count = users.len(), "users loaded");
                state.users = users;
                Ok(())
            }
            Err(err) => {
                drop(state);
                warn!(error = %err, kind = err.label(), "failed to load users");
                self.feedback.report_error(MSG_LOAD_USERS_FAILED);
                Err(err)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Unavailability panel
    // ---------------------------------------------------------------------

    /// Move the day-off panel to `month` and reload it.
    pub async fn set_unavailability_month(&self, month: YearMonth) -> Result<()> {
        self.state.lock().unavailability_month = month;
        debug!(%month, "unavailability month changed");
        self.refetch_unavailability().await
    }

    /// Move the day-off panel `months` away from its current month.
    pub async fn shift_unavailability_month(&self, months: i32) -> Result<()> {
        let month = self.unavailability_month().offset(months)?;
        self.set_unavailability_month(month).await
    }

    /// Reload the day-off records of the viewed month.
    ///
    /// "Nothing found" empties the collection. Any other failure keeps the
    /// previous records and shows an error.
    pub async fn refetch_unavailability(&self) -> Result<()> {
        let month = self.unavailability_month();
        let result = self.gateway.list_unavailability(month.range()).await;

        let mut state = self.state.lock();
        if state.unavailability_month != month {
            debug!(requested = %month, current = %state.unavailability_month, "applying late unavailability response");
        }
        match result {
            Ok(records) => {
                state.unavailability = records;
                Ok(())
            }
            Err(err) if err.is_empty_result() => {
                state.unavailability.clear();
                Ok(())
            }
            Err(err) => {
                drop(state);
                warn!(error = %err, %month, "failed to load unavailability");
                self.feedback.report_error(MSG_LOAD_UNAVAILABILITY_FAILED);
                Err(err)
            }
        }
    }

    /// Record a day off for `user_id` on `date`.
    ///
    /// `date` is the raw value of the date input; `None` is rejected before
    /// any remote call. On success the panel is reloaded and every editor is
    /// closed. Structured rejections are shown verbatim.
    pub async fn add_unavailability(
        &self,
        user_id: UserId,
        date: Option<NaiveDate>,
    ) -> Result<UnavailabilityRecord> {
        let date = date.ok_or_else(|| {
            RosterError::InvalidInput(format!("no date given for user {user_id}"))
        })?;

        self.feedback.clear_error();
        match self.gateway.create_unavailability(NewUnavailability { user_id, date }).await {
            Ok(record) => {
                info!(%user_id, %date, id = %record.id, "day off recorded");
                self.popovers.close_all();
                let _ = self.refetch_unavailability().await;
                Ok(record)
            }
            Err(err) => {
                warn!(error = %err, %user_id, %date, "failed to add day off");
                self.feedback.report_error(add_unavailability_message(&err));
                Err(err)
            }
        }
    }

    /// Delete one day-off record, then reload the panel.
    ///
    /// On failure the current records stay visible.
    pub async fn delete_unavailability(&self, id: UnavailabilityId) -> Result<()> {
        match self.gateway.delete_unavailability(id).await {
            Ok(()) => {
                info!(%id, "day off deleted");
                self.popovers.close_all();
                let _ = self.refetch_unavailability().await;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, %id, "failed to delete day off");
                self.feedback.report_error(MSG_DELETE_UNAVAILABILITY_FAILED);
                Err(err)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Assignment panel
    // ---------------------------------------------------------------------

    /// Move the assignment panel to `month`, drop the date selection and
    /// reload the grid.
    pub async fn set_assignment_month(&self, month: YearMonth) {
        {
            let mut state = self.state.lock();
            state.assignment_month = month;
            state.selected_dates.clear();
        }
        debug!(%month, "assignment month changed");
        self.refetch_assignments().await;
    }

    /// Move the assignment panel `months` away from its current month.
    pub async fn shift_assignment_month(&self, months: i32) -> Result<()> {
        let month = self.assignment_month().offset(months)?;
        self.set_assignment_month(month).await;
        Ok(())
    }

    /// Reload the assignment grid of the viewed month.
    ///
    /// Any failure resets the grid to empty; nothing is shown to the
    /// operator.
    pub async fn refetch_assignments(&self) {
        let month = self.assignment_month();
        let result = self.gateway.list_assignments(month.range()).await;

        let mut state = self.state.lock();
        if state.assignment_month != month {
            debug!(requested = %month, current = %state.assignment_month, "applying late assignment response");
        }
        match result {
            Ok(days) => state.assignments = into_grid(days),
            Err(err) => {
                if !err.is_empty_result() {
                    warn!(error = %err, %month, "failed to load assignments, clearing grid");
                }
                state.assignments.clear();
            }
        }
    }

    /// Add, remove or replace one assignee on `date`.
    ///
    /// Both users `None` is rejected before any remote call. Otherwise the
    /// editors are closed and the grid is reloaded whatever the outcome.
    pub async fn change_assignment(
        &self,
        date: NaiveDate,
        previous: Option<UserId>,
        new: Option<UserId>,
    ) -> Result<()> {
        let change = AssignmentChange::new(date, previous, new)?;
        let range = self.assignment_month().range();

        self.popovers.close_all();
        let result = self.gateway.change_assignment(change, range).await;
        match &result {
            Ok(()) => info!(%date, kind = ?change.kind(), "assignment changed"),
            Err(err) => {
                warn!(error = %err, %date, kind = ?change.kind(), "failed to change assignment");
                self.feedback.report_error(MSG_CHANGE_ASSIGNMENT_FAILED);
            }
        }

        self.refetch_assignments().await;
        result
    }

    // ---------------------------------------------------------------------
    // Generation
    // ---------------------------------------------------------------------

    /// Flip `date` in the selection. Returns whether it is selected now.
    ///
    /// # Errors
    /// `RosterError::InvalidInput` when `date` is outside the viewed
    /// assignment month.
    pub fn toggle_date_selection(&self, date: NaiveDate) -> Result<bool> {
        let mut state = self.state.lock();
        if !state.assignment_month.contains(date) {
            return Err(RosterError::InvalidInput(format!(
                "{date} is outside {}",
                state.assignment_month
            )));
        }
        let selected = if state.selected_dates.remove(&date) {
            false
        } else {
            state.selected_dates.insert(date)
        };
        Ok(selected)
    }

    /// Drop every selected date.
    pub fn clear_selection(&self) {
        self.state.lock().selected_dates.clear();
    }

    /// Set the headcount used by [`RosterStore::generate_selected`].
    ///
    /// # Errors
    /// `RosterError::InvalidInput` when `people_per_day` is zero.
    pub fn set_people_per_day(&self, people_per_day: u32) -> Result<()> {
        if people_per_day == 0 {
            return Err(RosterError::InvalidInput("people per day must be at least 1".into()));
        }
        self.state.lock().people_per_day = people_per_day;
        Ok(())
    }

    /// Generate assignments for the selected dates of the viewed month.
    pub async fn generate_selected(&self) -> Result<Option<GenerationOutcome>> {
        let (month, people_per_day, dates) = {
            let state = self.state.lock();
            (
                state.assignment_month,
                state.people_per_day,
                state.selected_dates.iter().copied().collect::<Vec<_>>(),
            )
        };
        self.generate(month, people_per_day, dates).await
    }

    /// Ask the service to fill `dates` with `people_per_day` users each.
    ///
    /// An empty `dates` list is a no-op and returns `Ok(None)`. On success
    /// the requested dates are replaced in the grid by whatever came back,
    /// violation messages become warnings and their dates are highlighted.
    /// On failure nothing in the grid changes.
    ///
    /// # Errors
    /// `RosterError::InvalidInput` when `people_per_day` is zero or another
    /// generation is still running; any gateway error otherwise.
    pub async fn generate(
        &self,
        month: YearMonth,
        people_per_day: u32,
        dates: Vec<NaiveDate>,
    ) -> Result<Option<GenerationOutcome>> {
        if dates.is_empty() {
            debug!(%month, "no dates selected, skipping generation");
            return Ok(None);
        }
        let request = GenerationRequest::new(month, people_per_day, dates)?;

        let busy = BusyFlag::try_raise(&self.state, generating).ok_or_else(|| {
            RosterError::InvalidInput("generation already in progress".into())
        })?;

        self.feedback.clear_error();
        info!(%month, people_per_day, dates = request.dates.len(), "generating assignments");
        let result = self.gateway.generate(request.clone()).await;
        drop(busy);

        let mut state = self.state.lock();
        match result {
            Ok(outcome) => {
                for date in &request.dates {
                    state.assignments.remove(date);
                }
                for day in &outcome.assignments {
                    state.assignments.insert(day.date, day.users.clone());
                }
                drop(state);

                let warnings = outcome.warnings();
                if !warnings.is_empty() {
                    warn!(%month, violations = warnings.len(), "generation finished with violations");
                }
                self.feedback.report_warnings(warnings, outcome.violating_dates());
                self.popovers.close_all();
                Ok(Some(outcome))
            }
            Err(err) => {
                drop(state);
                warn!(error = %err, %month, "generation failed");
                self.feedback.report_error(MSG_GENERATE_FAILED);
                Err(err)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Owned copy of the whole state.
    pub fn snapshot(&self) -> RosterSnapshot {
        self.state.lock().clone()
    }

    /// Current staff list.
    pub fn users(&self) -> Vec<User> {
        self.state.lock().users.clone()
    }

    /// Day-off records of the viewed month.
    pub fn unavailability(&self) -> Vec<UnavailabilityRecord> {
        self.state.lock().unavailability.clone()
    }

    /// Day-off records of one user in the viewed month, by date.
    pub fn unavailability_for(&self, user_id: UserId) -> Vec<UnavailabilityRecord> {
        let mut records: Vec<_> = self
            .state
            .lock()
            .unavailability
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.date);
        records
    }

    /// Assignment grid of the viewed month.
    pub fn assignments(&self) -> AssignmentGrid {
        self.state.lock().assignments.clone()
    }

    /// Users on duty for `date`; empty when the grid has no entry.
    pub fn assignees_on(&self, date: NaiveDate) -> Vec<AssignedUser> {
        self.state.lock().assignments.get(&date).cloned().unwrap_or_default()
    }

    /// Dates picked for generation.
    pub fn selected_dates(&self) -> BTreeSet<NaiveDate> {
        self.state.lock().selected_dates.clone()
    }

    /// Month shown in the day-off panel.
    pub fn unavailability_month(&self) -> YearMonth {
        self.state.lock().unavailability_month
    }

    /// Month shown in the assignment panel.
    pub fn assignment_month(&self) -> YearMonth {
        self.state.lock().assignment_month
    }

    /// Headcount for the next generation.
    pub fn people_per_day(&self) -> u32 {
        self.state.lock().people_per_day
    }

    /// True while the staff list is loading.
    pub fn is_loading_users(&self) -> bool {
        self.state.lock().loading_users
    }

    /// True while a generation request is in flight.
    pub fn is_generating(&self) -> bool {
        self.state.lock().generating
    }
}

fn into_grid(days: Vec<DayAssignment>) -> AssignmentGrid {
    days.into_iter().map(|day| (day.date, day.users)).collect()
}

/// Structured validation text first, then the network / generic fallbacks.
fn add_unavailability_message(err: &RosterError) -> String {
    match err {
        RosterError::Validation(failure) => failure.message_or(MSG_ADD_UNAVAILABILITY_FAILED),
        RosterError::Network(_) => MSG_ADD_UNAVAILABILITY_NETWORK.to_string(),
        _ => MSG_ADD_UNAVAILABILITY_FAILED.to_string(),
    }
}
