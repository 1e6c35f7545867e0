//! Persistence seam for employees and leave requests.
//!
//! Two backends implement [`LeaveStore`]: [`MySqlStore`] for deployments and
//! [`MemoryStore`] for tests and local demos. Both keep the ledger rule in
//! [`crate::leave::ledger::apply_deduction`] and run it under the same lock or
//! transaction as the write that follows.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::model::employee::{Employee, NewEmployee};
use crate::model::leave_request::{LeaveRequest, NewLeaveRequest};

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Brings the schema to the latest version. Safe to call on every start.
    async fn migrate(&self) -> AppResult<()>;

    /// Fails with `AlreadyExists` when the username is taken.
    async fn insert_employee(&self, employee: NewEmployee) -> AppResult<()>;

    async fn find_employee(&self, username: &str) -> AppResult<Option<Employee>>;

    /// Atomic check-then-increment of `used_leave`. Returns the new value.
    async fn deduct(&self, username: &str, days: f64) -> AppResult<f64>;

    /// Journals a request without touching the balance.
    async fn append_request(&self, request: NewLeaveRequest) -> AppResult<u64>;

    /// Journals a request and deducts its days as one unit: both are
    /// visible afterwards or neither is. Returns `(request_id, used_leave)`.
    async fn record_request(&self, request: NewLeaveRequest) -> AppResult<(u64, f64)>;

    /// Requests owned by `username`, highest id first.
    async fn list_requests(&self, username: &str) -> AppResult<Vec<LeaveRequest>>;
}
