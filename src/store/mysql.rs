use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::{FromRow, MySql, Transaction};
use tracing::{error, info};

use crate::error::{AppError, AppResult};
use crate::leave::ledger::apply_deduction;
use crate::model::employee::{Balance, Employee, NewEmployee};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType, NewLeaveRequest};
use crate::store::LeaveStore;

/// MySQL-backed store. Each operation borrows a pooled connection; writes
/// that depend on a balance read lock the employee row with `FOR UPDATE`.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

#[derive(FromRow)]
struct LeaveRequestRow {
    id: u64,
    username: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    days: f64,
    leave_type: String,
    status: String,
}

impl TryFrom<LeaveRequestRow> for LeaveRequest {
    type Error = AppError;

    fn try_from(row: LeaveRequestRow) -> AppResult<Self> {
        let leave_type = LeaveType::from_str(&row.leave_type).map_err(|_| {
            AppError::Store(format!(
                "leave request {} has unknown leave_type '{}'",
                row.id, row.leave_type
            ))
        })?;
        let status = LeaveStatus::from_str(&row.status).map_err(|_| {
            AppError::Store(format!(
                "leave request {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;

        Ok(LeaveRequest {
            id: row.id,
            username: row.username,
            start_date: row.start_date,
            end_date: row.end_date,
            days: row.days,
            leave_type,
            status,
        })
    }
}

impl MySqlStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> AppResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    async fn deduct_in(
        tx: &mut Transaction<'static, MySql>,
        username: &str,
        days: f64,
    ) -> AppResult<f64> {
        let (total_leave, used_leave) = sqlx::query_as::<_, (i32, f64)>(
            r#"
            SELECT total_leave, used_leave
            FROM employees
            WHERE username = ?
            FOR UPDATE
            "#,
        )
        .bind(username)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::user_not_found(username))?;

        let used = apply_deduction(&Balance::new(total_leave, used_leave), days)?;

        sqlx::query("UPDATE employees SET used_leave = ? WHERE username = ?")
            .bind(used)
            .bind(username)
            .execute(&mut **tx)
            .await?;

        Ok(used)
    }

    async fn append_in(
        tx: &mut Transaction<'static, MySql>,
        request: &NewLeaveRequest,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (username, start_date, end_date, days, leave_type, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.username)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.days)
        .bind(request.leave_type.as_ref())
        .bind(LeaveStatus::Pending.as_ref())
        .execute(&mut **tx)
        .await?;

        Ok(result.last_insert_id())
    }
}

#[async_trait]
impl LeaveStore for MySqlStore {
    async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    async fn insert_employee(&self, employee: NewEmployee) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (username, password, total_leave, used_leave)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&employee.username)
        .bind(&employee.password)
        .bind(employee.total_leave)
        .bind(employee.used_leave)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23000") => {
                Err(AppError::AlreadyExists(format!(
                    "username '{}' is already taken",
                    employee.username
                )))
            }
            Err(e) => {
                error!(error = %e, username = %employee.username, "Failed to insert employee");
                Err(AppError::Store(e.to_string()))
            }
        }
    }

    async fn find_employee(&self, username: &str) -> AppResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, username, password, total_leave, used_leave
            FROM employees
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn deduct(&self, username: &str, days: f64) -> AppResult<f64> {
        let mut tx = self.pool.begin().await?;
        let used = Self::deduct_in(&mut tx, username, days).await?;
        tx.commit().await?;
        Ok(used)
    }

    async fn append_request(&self, request: NewLeaveRequest) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        let id = Self::append_in(&mut tx, &request).await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn record_request(&self, request: NewLeaveRequest) -> AppResult<(u64, f64)> {
        // dropping `tx` on any early return rolls both statements back
        let mut tx = self.pool.begin().await?;
        let used = Self::deduct_in(&mut tx, &request.username, request.days).await?;
        let id = Self::append_in(&mut tx, &request).await?;
        tx.commit().await?;
        Ok((id, used))
    }

    async fn list_requests(&self, username: &str) -> AppResult<Vec<LeaveRequest>> {
        let rows = sqlx::query_as::<_, LeaveRequestRow>(
            r#"
            SELECT id, username, start_date, end_date, days, leave_type, status
            FROM leave_requests
            WHERE username = ?
            ORDER BY id DESC
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(LeaveRequest::try_from).collect()
    }
}
