//! Wire representations of the planner REST API
//!
//! The service is lenient about shapes (`{data: [...]}` or a bare list,
//! `full_name` or `name`, a message string or a list of them); these types
//! absorb that and convert into the strict domain types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rota_domain::{
    AssignedUser, AssignmentChange, DayAssignment, GenerationOutcome, GenerationRequest,
    NewUnavailability, UnavailabilityId, UnavailabilityRecord, User, UserId, ValidationFailure,
    YearMonth,
};
use serde::{Deserialize, Serialize};

/// One message or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Messages {
    One(String),
    Many(Vec<String>),
}

impl Default for Messages {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<Messages> for Vec<String> {
    fn from(value: Messages) -> Self {
        match value {
            Messages::One(message) => vec![message],
            Messages::Many(messages) => messages,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        let composed = || {
            let parts: Vec<&str> = [dto.first_name.as_deref(), dto.last_name.as_deref()]
                .into_iter()
                .flatten()
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        };

        let full_name = dto
            .full_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(composed)
            .or_else(|| dto.email.clone())
            .unwrap_or_else(|| format!("#{}", dto.id));

        User::new(dto.id, full_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayOffDto {
    pub id: i64,
    pub date: NaiveDate,
    pub user: i64,
}

impl From<DayOffDto> for UnavailabilityRecord {
    fn from(dto: DayOffDto) -> Self {
        Self { id: UnavailabilityId(dto.id), user_id: UserId(dto.user), date: dto.date }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDayOffDto {
    pub user: i64,
    pub date: NaiveDate,
}

impl From<NewUnavailability> for NewDayOffDto {
    fn from(record: NewUnavailability) -> Self {
        Self { user: record.user_id.0, date: record.date }
    }
}

/// Body of a rejected day-off creation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayOffRejectionDto {
    #[serde(default)]
    pub non_field_errors: Messages,
    #[serde(default)]
    pub date: Messages,
    #[serde(default)]
    pub detail: Option<String>,
}

impl From<DayOffRejectionDto> for ValidationFailure {
    fn from(dto: DayOffRejectionDto) -> Self {
        Self {
            non_field_errors: dto.non_field_errors.into(),
            date: dto.date.into(),
            detail: dto.detail,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignedUserDto {
    pub id: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<AssignedUserDto> for AssignedUser {
    fn from(dto: AssignedUserDto) -> Self {
        AssignedUser::new(dto.id, dto.full_name.or(dto.name).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayAssignmentDto {
    pub date: NaiveDate,
    #[serde(default)]
    pub users: Vec<AssignedUserDto>,
}

impl From<DayAssignmentDto> for DayAssignment {
    fn from(dto: DayAssignmentDto) -> Self {
        Self { date: dto.date, users: dto.users.into_iter().map(Into::into).collect() }
    }
}

/// The assignment listing arrives wrapped or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AssignmentListDto {
    Wrapped { data: Vec<DayAssignmentDto> },
    Bare(Vec<DayAssignmentDto>),
}

impl AssignmentListDto {
    pub fn into_days(self) -> Vec<DayAssignment> {
        let (Self::Wrapped { data: days } | Self::Bare(days)) = self;
        days.into_iter().map(Into::into).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignDto {
    pub user_id_prev: Option<i64>,
    pub user_id_new: Option<i64>,
    pub date: NaiveDate,
}

impl From<AssignmentChange> for AssignDto {
    fn from(change: AssignmentChange) -> Self {
        Self {
            user_id_prev: change.previous().map(|id| id.0),
            user_id_new: change.new_user().map(|id| id.0),
            date: change.date(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateDto {
    pub month: YearMonth,
    pub people_per_day: u32,
    pub dates: Vec<NaiveDate>,
}

impl From<GenerationRequest> for GenerateDto {
    fn from(request: GenerationRequest) -> Self {
        Self { month: request.month, people_per_day: request.people_per_day, dates: request.dates }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponseDto {
    #[serde(default)]
    pub data: Vec<DayAssignmentDto>,
    #[serde(default)]
    pub errors: BTreeMap<NaiveDate, Messages>,
}

impl From<GenerateResponseDto> for GenerationOutcome {
    fn from(dto: GenerateResponseDto) -> Self {
        Self {
            assignments: dto.data.into_iter().map(Into::into).collect(),
            violations: dto
                .errors
                .into_iter()
                .map(|(date, messages)| (date, Vec::<String>::from(messages)))
                .collect(),
        }
    }
}
