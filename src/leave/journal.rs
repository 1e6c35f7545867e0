use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::AppResult;
use crate::model::leave_request::{LeaveRequest, LeaveType, NewLeaveRequest};
use crate::store::LeaveStore;

/// Append-only record of leave requests.
#[derive(Clone)]
pub struct RequestJournal {
    store: Arc<dyn LeaveStore>,
}

impl RequestJournal {
    pub fn new(store: Arc<dyn LeaveStore>) -> Self {
        Self { store }
    }

    /// Stores a `PENDING` request and returns its id. Ids only ever grow.
    pub async fn append(
        &self,
        username: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        days: f64,
        leave_type: LeaveType,
    ) -> AppResult<u64> {
        self.store
            .append_request(NewLeaveRequest {
                username: username.to_string(),
                start_date,
                end_date,
                days,
                leave_type,
            })
            .await
    }

    /// Newest first.
    pub async fn list_for(&self, username: &str) -> AppResult<Vec<LeaveRequest>> {
        self.store.list_requests(username).await
    }
}
