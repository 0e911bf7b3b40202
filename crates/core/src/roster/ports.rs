//! Port interface for the remote roster service
//!
//! The generation algorithm and all persistence live behind this trait. It
//! is pure request/response: implementations must not cache.

use async_trait::async_trait;
use rota_domain::{
    AssignmentChange, DateRange, DayAssignment, GenerationOutcome, GenerationRequest,
    NewUnavailability, Result, UnavailabilityId, UnavailabilityRecord, User,
};

/// Boundary to the external roster service
#[async_trait]
pub trait RosterGateway: Send + Sync {
    /// List every staff member.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// List day-off records whose date falls inside `range`.
    ///
    /// "Nothing found" may be reported either as an empty list or as
    /// `RosterError::NotFound`; callers treat both as empty.
    async fn list_unavailability(&self, range: DateRange) -> Result<Vec<UnavailabilityRecord>>;

    /// List assignments for the dates inside `range`.
    async fn list_assignments(&self, range: DateRange) -> Result<Vec<DayAssignment>>;

    /// Create a day-off record. Structured rejections come back as
    /// `RosterError::Validation`.
    async fn create_unavailability(
        &self,
        record: NewUnavailability,
    ) -> Result<UnavailabilityRecord>;

    /// Delete a day-off record.
    async fn delete_unavailability(&self, id: UnavailabilityId) -> Result<()>;

    /// Apply one reassignment, scoped to the currently viewed `range`.
    async fn change_assignment(&self, change: AssignmentChange, range: DateRange) -> Result<()>;

    /// Run the bulk generator. A failure carries no partial data.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome>;
}
