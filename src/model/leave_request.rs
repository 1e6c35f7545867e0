use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    FullDay,
    MorningHalf,
    AfternoonHalf,
}

impl LeaveType {
    pub fn is_half_day(&self) -> bool {
        matches!(self, LeaveType::MorningHalf | LeaveType::AfternoonHalf)
    }
}

/// Stored with every request. Nothing moves a request out of `Pending`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "username": "ABC",
    "start_date": "2024-01-01",
    "end_date": "2024-01-05",
    "days": 5.0,
    "leave_type": "FULL_DAY",
    "status": "PENDING"
}))]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "ABC")]
    pub username: String,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-01-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = 5.0)]
    pub days: f64,
    pub leave_type: LeaveType,
    pub status: LeaveStatus,
}

/// A request that passed the calculator and waits to be journaled.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLeaveRequest {
    pub username: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: f64,
    pub leave_type: LeaveType,
}

impl NewLeaveRequest {
    pub fn into_request(self, id: u64) -> LeaveRequest {
        LeaveRequest {
            id,
            username: self.username,
            start_date: self.start_date,
            end_date: self.end_date,
            days: self.days,
            leave_type: self.leave_type,
            status: LeaveStatus::Pending,
        }
    }
}
