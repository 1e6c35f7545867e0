use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::leave_request::LeaveType;

#[derive(Deserialize, ToSchema)]
pub struct SignupReqDto {
    #[schema(example = "ABC")]
    pub username: String,
    #[schema(example = "1234qwer")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "ABC")]
    pub username: String,
    #[schema(example = "1234qwer")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "ABC")]
    pub username: String,
    #[schema(example = 14)]
    pub total_leave: i32,
    #[schema(example = 0.0)]
    pub used_leave: f64,
    #[schema(example = 14.0)]
    pub remaining_leave: f64,
}

/// Dates stay strings here so a bad value is reported as a validation error
/// by the calculator rather than a generic JSON failure.
#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "2024-01-01", format = "date")]
    pub start_date: String,
    #[schema(example = "2024-01-05", format = "date")]
    pub end_date: String,
    pub leave_type: LeaveType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username; the only identity the leave operations need.
    pub sub: String,
    pub exp: usize,
    pub jti: String,
}
