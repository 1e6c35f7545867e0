use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Employee {
    pub id: u64,
    pub username: String,
    /// Stored credential, either an argon2 PHC string or legacy `salt$digest`.
    pub password: String,
    pub total_leave: i32,
    pub used_leave: f64,
}

impl Employee {
    pub fn balance(&self) -> Balance {
        Balance::new(self.total_leave, self.used_leave)
    }
}

/// Row to insert at signup or when seeding.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub username: String,
    pub password: String,
    pub total_leave: i32,
    pub used_leave: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "total_leave": 14,
        "used_leave": 5.5,
        "remaining_leave": 8.5
    })
)]
pub struct Balance {
    #[schema(example = 14)]
    pub total_leave: i32,

    #[schema(example = 5.5)]
    pub used_leave: f64,

    #[schema(example = 8.5)]
    pub remaining_leave: f64,
}

impl Balance {
    pub fn new(total_leave: i32, used_leave: f64) -> Self {
        Self {
            total_leave,
            used_leave,
            remaining_leave: f64::from(total_leave) - used_leave,
        }
    }
}
