use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{AppError, AppResult};
use crate::model::leave_request::LeaveType;

pub const HALF_DAY: f64 = 0.5;

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("'{}' is not a valid YYYY-MM-DD date", value)))
}

/// Chargeable days for a leave request.
///
/// Half-day types cost 0.5 and must start and end on the same date. Full days
/// count every Monday to Friday in `[start_date, end_date]`; weekends are free.
pub fn compute_days(
    start_date: NaiveDate,
    end_date: NaiveDate,
    leave_type: LeaveType,
) -> AppResult<f64> {
    if start_date > end_date {
        return Err(AppError::InvalidRange(
            "start_date cannot be after end_date".to_string(),
        ));
    }

    if leave_type.is_half_day() {
        if start_date != end_date {
            return Err(AppError::InvalidRange(
                "half-day types must span exactly one day".to_string(),
            ));
        }
        return Ok(HALF_DAY);
    }

    let weekdays = start_date
        .iter_days()
        .take_while(|day| *day <= end_date)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .count();

    Ok(weekdays as f64)
}

/// Same as [`compute_days`] for raw ISO date strings.
pub fn compute_days_str(start_date: &str, end_date: &str, leave_type: LeaveType) -> AppResult<f64> {
    compute_days(parse_date(start_date)?, parse_date(end_date)?, leave_type)
}
