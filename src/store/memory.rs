use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::leave::ledger::apply_deduction;
use crate::model::employee::{Employee, NewEmployee};
use crate::model::leave_request::{LeaveRequest, NewLeaveRequest};
use crate::store::LeaveStore;

/// In-process store. One mutex guards both tables, so a check and the write
/// that depends on it never interleave with another caller.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    employees: HashMap<String, Employee>,
    requests: Vec<LeaveRequest>,
    next_employee_id: u64,
    next_request_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, MemoryState>> {
        self.inner
            .lock()
            .map_err(|_| AppError::Store("memory store lock poisoned".to_string()))
    }
}

impl MemoryState {
    fn deduct(&mut self, username: &str, days: f64) -> AppResult<f64> {
        let employee = self
            .employees
            .get_mut(username)
            .ok_or_else(|| AppError::user_not_found(username))?;

        let used = apply_deduction(&employee.balance(), days)?;
        employee.used_leave = used;
        Ok(used)
    }

    fn append(&mut self, request: NewLeaveRequest) -> u64 {
        self.next_request_id += 1;
        let id = self.next_request_id;
        self.requests.push(request.into_request(id));
        id
    }
}

#[async_trait]
impl LeaveStore for MemoryStore {
    async fn migrate(&self) -> AppResult<()> {
        Ok(())
    }

    async fn insert_employee(&self, employee: NewEmployee) -> AppResult<()> {
        let mut state = self.lock()?;

        if state.employees.contains_key(&employee.username) {
            return Err(AppError::AlreadyExists(format!(
                "username '{}' is already taken",
                employee.username
            )));
        }

        state.next_employee_id += 1;
        let id = state.next_employee_id;
        state.employees.insert(
            employee.username.clone(),
            Employee {
                id,
                username: employee.username,
                password: employee.password,
                total_leave: employee.total_leave,
                used_leave: employee.used_leave,
            },
        );
        Ok(())
    }

    async fn find_employee(&self, username: &str) -> AppResult<Option<Employee>> {
        Ok(self.lock()?.employees.get(username).cloned())
    }

    async fn deduct(&self, username: &str, days: f64) -> AppResult<f64> {
        self.lock()?.deduct(username, days)
    }

    async fn append_request(&self, request: NewLeaveRequest) -> AppResult<u64> {
        Ok(self.lock()?.append(request))
    }

    async fn record_request(&self, request: NewLeaveRequest) -> AppResult<(u64, f64)> {
        let mut state = self.lock()?;
        // deduct first: it is the only step that can fail
        let used = state.deduct(&request.username, request.days)?;
        let id = state.append(request);
        Ok((id, used))
    }

    async fn list_requests(&self, username: &str) -> AppResult<Vec<LeaveRequest>> {
        let state = self.lock()?;
        Ok(state
            .requests
            .iter()
            .rev()
            .filter(|request| request.username == username)
            .cloned()
            .collect())
    }
}
