use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::model::employee::Balance;
use crate::store::LeaveStore;

/// Returns the `used_leave` value after charging `days` against `balance`.
///
/// Every store runs this inside the same lock or transaction that writes the
/// result back, so the remaining balance it sees cannot be stale.
pub fn apply_deduction(balance: &Balance, days: f64) -> AppResult<f64> {
    if !days.is_finite() || days < 0.0 {
        return Err(AppError::Validation(format!(
            "cannot deduct {} days",
            days
        )));
    }

    if days > balance.remaining_leave {
        return Err(AppError::InsufficientBalance {
            requested: days,
            remaining: balance.remaining_leave,
        });
    }

    Ok(balance.used_leave + days)
}

#[derive(Clone)]
pub struct BalanceLedger {
    store: Arc<dyn LeaveStore>,
}

impl BalanceLedger {
    pub fn new(store: Arc<dyn LeaveStore>) -> Self {
        Self { store }
    }

    pub async fn deduct(&self, username: &str, days: f64) -> AppResult<f64> {
        let used = self.store.deduct(username, days).await?;
        tracing::debug!(username, days, used_leave = used, "Leave deducted");
        Ok(used)
    }

    pub async fn query(&self, username: &str) -> AppResult<Balance> {
        self.store
            .find_employee(username)
            .await?
            .map(|employee| employee.balance())
            .ok_or_else(|| AppError::user_not_found(username))
    }
}
