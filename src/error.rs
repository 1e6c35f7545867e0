use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Display, Clone, PartialEq)]
pub enum AppError {
    /// Malformed input: dates, username length, empty password.
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Date range that cannot be charged (reversed, or a half-day over several dates).
    #[display(fmt = "{}", _0)]
    InvalidRange(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    Unauthorized(String),

    #[display(fmt = "{}", _0)]
    AlreadyExists(String),

    #[display(fmt = "insufficient leave balance: requested {}, remaining {}", requested, remaining)]
    InsufficientBalance { requested: f64, remaining: f64 },

    /// Persistence failure. The message is logged but never sent to clients.
    #[display(fmt = "store error: {}", _0)]
    Store(String),

    /// Server-side failure outside persistence, e.g. token signing.
    #[display(fmt = "internal error: {}", _0)]
    Internal(String),
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidRange(_) => "INVALID_RANGE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn user_not_found(username: &str) -> Self {
        AppError::NotFound(format!("employee '{}' does not exist", username))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Store operation failed");
        AppError::Store(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        tracing::error!(error = %e, "Migration failed");
        AppError::Store(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidRange(_)
            | AppError::InsufficientBalance { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Store(_) | AppError::Internal(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "message": message
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_kind() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidRange("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::AlreadyExists("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Store("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn insufficient_balance_message_names_both_amounts() {
        let err = AppError::InsufficientBalance {
            requested: 5.0,
            remaining: 3.0,
        };
        assert_eq!(err.kind(), "INSUFFICIENT_BALANCE");
        assert_eq!(
            err.to_string(),
            "insufficient leave balance: requested 5, remaining 3"
        );
    }

    #[actix_web::test]
    async fn store_errors_do_not_leak_details() {
        let resp = AppError::Store("connection refused".into()).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({ "error": "STORE_ERROR", "message": "Internal Server Error" })
        );
        assert!(!String::from_utf8_lossy(&bytes).contains("connection refused"));
    }

    #[actix_web::test]
    async fn internal_errors_are_not_store_errors() {
        let err = AppError::Internal("token signing failed".into());
        assert_eq!(err.kind(), "INTERNAL_ERROR");

        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({ "error": "INTERNAL_ERROR", "message": "Internal Server Error" })
        );
    }
}
