use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rota_core::RosterGateway;
use rota_domain::{
    AssignedUser, AssignmentChange, DateRange, DayAssignment, GenerationOutcome,
    GenerationRequest, NewUnavailability, Result as DomainResult, RosterError, UnavailabilityId,
    UnavailabilityRecord, User, UserId, ValidationFailure,
};

/// Gateway operations, used to inject failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListUsers,
    ListUnavailability,
    ListAssignments,
    CreateUnavailability,
    DeleteUnavailability,
    ChangeAssignment,
    Generate,
}

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListUsers,
    ListUnavailability(DateRange),
    ListAssignments(DateRange),
    CreateUnavailability(NewUnavailability),
    DeleteUnavailability(UnavailabilityId),
    ChangeAssignment(AssignmentChange, DateRange),
    Generate(GenerationRequest),
}

impl Call {
    fn op(&self) -> Op {
        match self {
            Self::ListUsers => Op::ListUsers,
            Self::ListUnavailability(_) => Op::ListUnavailability,
            Self::ListAssignments(_) => Op::ListAssignments,
            Self::CreateUnavailability(_) => Op::CreateUnavailability,
            Self::DeleteUnavailability(_) => Op::DeleteUnavailability,
            Self::ChangeAssignment(..) => Op::ChangeAssignment,
            Self::Generate(_) => Op::Generate,
        }
    }
}

#[derive(Default)]
struct ServerState {
    users: Vec<User>,
    records: Vec<UnavailabilityRecord>,
    grid: BTreeMap<chrono::NaiveDate, Vec<AssignedUser>>,
    next_id: i64,
    generate_outcome: GenerationOutcome,
    delays: HashMap<Op, Duration>,
    failures: HashMap<Op, RosterError>,
    calls: Vec<Call>,
}

/// In-memory roster service.
///
/// Day-off creation rejects duplicates with a `non_field_errors` message,
/// reassignments edit the stored grid and generation returns the scripted
/// outcome (and stores it). Any operation can be made to fail until
/// [`MockRosterGateway::succeed`] is called for it.
#[derive(Default, Clone)]
pub struct MockRosterGateway {
    state: Arc<Mutex<ServerState>>,
}

impl MockRosterGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, id: i64, full_name: &str) -> Self {
        self.state.lock().unwrap().users.push(User::new(id, full_name));
        self
    }

    pub fn with_record(self, id: i64, user_id: i64, date: chrono::NaiveDate) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.records.push(UnavailabilityRecord {
                id: UnavailabilityId(id),
                user_id: UserId(user_id),
                date,
            });
            state.next_id = state.next_id.max(id);
        }
        self
    }

    pub fn with_assignment(self, date: chrono::NaiveDate, users: Vec<AssignedUser>) -> Self {
        self.state.lock().unwrap().grid.insert(date, users);
        self
    }

    pub fn with_generate_outcome(self, outcome: GenerationOutcome) -> Self {
        self.state.lock().unwrap().generate_outcome = outcome;
        self
    }

    /// Make `op` sleep before answering (use with paused time).
    pub fn with_delay(self, op: Op, delay: Duration) -> Self {
        self.set_delay(op, Some(delay));
        self
    }

    /// Change or remove the delay of `op`; calls already sleeping keep theirs.
    pub fn set_delay(&self, op: Op, delay: Option<Duration>) {
        let mut state = self.state.lock().unwrap();
        match delay {
            Some(delay) => state.delays.insert(op, delay),
            None => state.delays.remove(&op),
        };
    }

    pub fn fail(&self, op: Op, error: RosterError) {
        self.state.lock().unwrap().failures.insert(op, error);
    }

    pub fn succeed(&self, op: Op) {
        self.state.lock().unwrap().failures.remove(&op);
    }

    /// Remove a record behind the client's back.
    pub fn remove_record(&self, id: i64) {
        self.state.lock().unwrap().records.retain(|record| record.id != UnavailabilityId(id));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, op: Op) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|call| call.op() == op).count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    async fn answer_after_delay(&self, op: Op) {
        let delay = self.state.lock().unwrap().delays.get(&op).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn record(&self, call: Call) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let op = call.op();
        state.calls.push(call);
        match state.failures.get(&op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RosterGateway for MockRosterGateway {
    async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.record(Call::ListUsers)?;
        self.answer_after_delay(Op::ListUsers).await;
        Ok(self.state.lock().unwrap().users.clone())
    }

    async fn list_unavailability(
        &self,
        range: DateRange,
    ) -> DomainResult<Vec<UnavailabilityRecord>> {
        self.record(Call::ListUnavailability(range))?;
        self.answer_after_delay(Op::ListUnavailability).await;
        Ok(self
            .state
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|record| range.contains(record.date))
            .cloned()
            .collect())
    }

    async fn list_assignments(&self, range: DateRange) -> DomainResult<Vec<DayAssignment>> {
        self.record(Call::ListAssignments(range))?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .grid
            .iter()
            .filter(|(date, _)| range.contains(**date))
            .map(|(date, users)| DayAssignment { date: *date, users: users.clone() })
            .collect())
    }

    async fn create_unavailability(
        &self,
        record: NewUnavailability,
    ) -> DomainResult<UnavailabilityRecord> {
        self.record(Call::CreateUnavailability(record))?;

        let mut state = self.state.lock().unwrap();
        if state.records.iter().any(|r| r.user_id == record.user_id && r.date == record.date) {
            return Err(RosterError::Validation(ValidationFailure {
                non_field_errors: vec!["already recorded".into()],
                ..ValidationFailure::default()
            }));
        }
        state.next_id += 1;
        let created = UnavailabilityRecord {
            id: UnavailabilityId(state.next_id),
            user_id: record.user_id,
            date: record.date,
        };
        state.records.push(created.clone());
        Ok(created)
    }

    async fn delete_unavailability(&self, id: UnavailabilityId) -> DomainResult<()> {
        self.record(Call::DeleteUnavailability(id))?;
        self.state.lock().unwrap().records.retain(|record| record.id != id);
        Ok(())
    }

    async fn change_assignment(
        &self,
        change: AssignmentChange,
        range: DateRange,
    ) -> DomainResult<()> {
        self.record(Call::ChangeAssignment(change, range))?;

        let mut state = self.state.lock().unwrap();
        let name = change.new_user().and_then(|id| {
            state.users.iter().find(|user| user.id == id).map(|user| user.full_name.clone())
        });
        let users = state.grid.entry(change.date()).or_default();
        if let Some(previous) = change.previous() {
            users.retain(|user| user.id != previous);
        }
        if let Some(new) = change.new_user() {
            users.push(AssignedUser { id: new, name: name.unwrap_or_default() });
        }
        Ok(())
    }

    async fn generate(&self, request: GenerationRequest) -> DomainResult<GenerationOutcome> {
        self.record(Call::Generate(request))?;
        self.answer_after_delay(Op::Generate).await;

        let mut state = self.state.lock().unwrap();
        let outcome = state.generate_outcome.clone();
        for day in &outcome.assignments {
            state.grid.insert(day.date, day.users.clone());
        }
        Ok(outcome)
    }
}
