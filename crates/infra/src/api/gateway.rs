//! REST implementation of the `RosterGateway` port

use async_trait::async_trait;
use rota_core::RosterGateway;
use rota_domain::{
    ApiConfig, AssignmentChange, DateRange, DayAssignment, GenerationOutcome, GenerationRequest,
    NewUnavailability, Result, RosterError, UnavailabilityId, UnavailabilityRecord, User,
    ValidationFailure,
};
use serde::de::IgnoredAny;
use tracing::{debug, instrument, warn};

use super::client::ApiClient;
use super::errors::ApiError;
use super::wire::{
    AssignDto, AssignmentListDto, DayOffDto, DayOffRejectionDto, GenerateDto,
    GenerateResponseDto, NewDayOffDto, UserDto,
};

const USERS_PATH: &str = "/api/users/";
const DAYS_OFF_PATH: &str = "/api/days-off/";
const ASSIGNMENTS_PATH: &str = "/api/duties/list_assignments/";
const ASSIGN_PATH: &str = "/api/duties/assign/";
const GENERATE_PATH: &str = "/api/duties/generate/";

/// Roster gateway backed by the planner REST API
#[derive(Clone)]
pub struct HttpRosterGateway {
    client: ApiClient,
}

impl HttpRosterGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    /// Returns `RosterError::Config` when the API client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(ApiClient::new(config)?))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

fn range_query(range: DateRange) -> [(&'static str, String); 2] {
    [("start_date", range.start.to_string()), ("end_date", range.end.to_string())]
}

/// A 400 body becomes a structured failure; an unreadable one still counts
/// as a rejection so the generic message is shown.
fn rejection(err: ApiError) -> RosterError {
    match err {
        ApiError::BadRequest(body) => {
            let failure = serde_json::from_str::<DayOffRejectionDto>(&body)
                .map(ValidationFailure::from)
                .unwrap_or_else(|parse_err| {
                    debug!(error = %parse_err, "unstructured day-off rejection body");
                    ValidationFailure::default()
                });
            RosterError::Validation(failure)
        }
        other => other.into(),
    }
}

#[async_trait]
impl RosterGateway for HttpRosterGateway {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>> {
        let users: Vec<UserDto> = self.client.get(USERS_PATH, &[]).await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self), fields(range = %range))]
    async fn list_unavailability(&self, range: DateRange) -> Result<Vec<UnavailabilityRecord>> {
        let records: Vec<DayOffDto> = self.client.get(DAYS_OFF_PATH, &range_query(range)).await?;
        Ok(records
            .into_iter()
            .map(UnavailabilityRecord::from)
            .filter(|record| range.contains(record.date))
            .collect())
    }

    #[instrument(skip(self), fields(range = %range))]
    async fn list_assignments(&self, range: DateRange) -> Result<Vec<DayAssignment>> {
        let listing: AssignmentListDto =
            self.client.get(ASSIGNMENTS_PATH, &range_query(range)).await?;
        Ok(listing.into_days())
    }

    #[instrument(skip(self), fields(user_id = %record.user_id, date = %record.date))]
    async fn create_unavailability(
        &self,
        record: NewUnavailability,
    ) -> Result<UnavailabilityRecord> {
        let created: DayOffDto = self
            .client
            .post(DAYS_OFF_PATH, &[], &NewDayOffDto::from(record))
            .await
            .map_err(rejection)?;
        Ok(created.into())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_unavailability(&self, id: UnavailabilityId) -> Result<()> {
        self.client.delete(&format!("{DAYS_OFF_PATH}{id}/")).await?;
        Ok(())
    }

    #[instrument(skip(self, change), fields(date = %change.date(), range = %range))]
    async fn change_assignment(&self, change: AssignmentChange, range: DateRange) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .post(ASSIGN_PATH, &range_query(range), &AssignDto::from(change))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, request), fields(month = %request.month, dates = request.dates.len()))]
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome> {
        let response: GenerateResponseDto =
            self.client.post(GENERATE_PATH, &[], &GenerateDto::from(request)).await.map_err(
                |err| {
                    warn!(error = %err, "generate request failed");
                    RosterError::from(err)
                },
            )?;
        Ok(response.into())
    }
}
