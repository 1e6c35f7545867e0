//! Entry point for every leave operation.
//!
//! Handlers never talk to the store directly. The username is always an
//! explicit argument; the HTTP layer takes it from the verified token.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::auth::credentials::{CredentialPolicy, CredentialStore};
use crate::error::AppResult;
use crate::leave::{BalanceLedger, RequestJournal, compute_days, compute_days_str, parse_date};
use crate::model::employee::Balance;
use crate::model::leave_request::{LeaveRequest, LeaveType, NewLeaveRequest};
use crate::store::LeaveStore;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct SubmittedLeave {
    #[schema(example = 42)]
    pub request_id: u64,
    #[schema(example = 5.0)]
    pub days: f64,
}

#[derive(Clone)]
pub struct LeaveService {
    store: Arc<dyn LeaveStore>,
    credentials: CredentialStore,
    ledger: BalanceLedger,
    journal: RequestJournal,
}

impl LeaveService {
    pub fn new(store: Arc<dyn LeaveStore>, policy: CredentialPolicy) -> Self {
        Self {
            credentials: CredentialStore::new(store.clone(), policy),
            ledger: BalanceLedger::new(store.clone()),
            journal: RequestJournal::new(store.clone()),
            store,
        }
    }

    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    pub fn journal(&self) -> &RequestJournal {
        &self.journal
    }

    pub async fn register(&self, username: &str, password: &str) -> AppResult<()> {
        self.credentials.register(username, password).await
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Balance> {
        self.credentials.authenticate(username, password).await
    }

    /// Days a request would cost, without submitting it.
    pub fn preview_days(
        &self,
        start_date: &str,
        end_date: &str,
        leave_type: LeaveType,
    ) -> AppResult<f64> {
        compute_days_str(start_date, end_date, leave_type)
    }

    /// Computes the cost, then journals the request and deducts it in one unit.
    #[instrument(name = "submit_request", skip(self))]
    pub async fn submit_request(
        &self,
        username: &str,
        start_date: &str,
        end_date: &str,
        leave_type: LeaveType,
    ) -> AppResult<SubmittedLeave> {
        let start_date = parse_date(start_date)?;
        let end_date = parse_date(end_date)?;
        let days = compute_days(start_date, end_date, leave_type)?;

        let (request_id, used_leave) = self
            .store
            .record_request(NewLeaveRequest {
                username: username.to_string(),
                start_date,
                end_date,
                days,
                leave_type,
            })
            .await?;

        info!(request_id, days, used_leave, "Leave request submitted");
        Ok(SubmittedLeave { request_id, days })
    }

    pub async fn get_history(&self, username: &str) -> AppResult<Vec<LeaveRequest>> {
        self.journal.list_for(username).await
    }

    pub async fn get_balance(&self, username: &str) -> AppResult<Balance> {
        self.ledger.query(username).await
    }
}
