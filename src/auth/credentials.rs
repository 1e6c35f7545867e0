use std::sync::Arc;

use tracing::info;

use crate::auth::password::{PasswordScheme, hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::model::employee::{Balance, NewEmployee};
use crate::store::LeaveStore;

/// Signup rules. Values come from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct CredentialPolicy {
    /// Exact username length in characters.
    pub username_length: usize,
    pub default_total_leave: i32,
    pub scheme: PasswordScheme,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            username_length: 3,
            default_total_leave: 14,
            scheme: PasswordScheme::Argon2,
        }
    }
}

#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn LeaveStore>,
    policy: CredentialPolicy,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn LeaveStore>, policy: CredentialPolicy) -> Self {
        Self { store, policy }
    }

    pub fn validate_username(&self, username: &str) -> AppResult<()> {
        let length = username.chars().count();
        if length != self.policy.username_length {
            return Err(AppError::Validation(format!(
                "username must be exactly {} characters, got {}",
                self.policy.username_length, length
            )));
        }
        Ok(())
    }

    pub async fn register(&self, username: &str, password: &str) -> AppResult<()> {
        let username = username.trim();
        self.validate_username(username)?;

        if password.is_empty() {
            return Err(AppError::Validation("password must not be empty".to_string()));
        }

        self.store
            .insert_employee(NewEmployee {
                username: username.to_string(),
                password: hash_password(password, self.policy.scheme)?,
                total_leave: self.policy.default_total_leave,
                used_leave: 0.0,
            })
            .await?;

        info!(username, "Employee registered");
        Ok(())
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Balance> {
        let employee = self
            .store
            .find_employee(username.trim())
            .await?
            .ok_or_else(|| AppError::user_not_found(username))?;

        if !verify_password(password, &employee.password) {
            info!(username, "Invalid credentials: password mismatch");
            return Err(AppError::Unauthorized("password does not match".to_string()));
        }

        Ok(employee.balance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn credentials() -> CredentialStore {
        CredentialStore::new(Arc::new(MemoryStore::new()), CredentialPolicy::default())
    }

    #[test]
    fn username_length_counts_characters_not_bytes() {
        let creds = credentials();
        assert!(creds.validate_username("ABC").is_ok());
        assert!(creds.validate_username("피카츄").is_ok());
        assert!(creds.validate_username("AB").is_err());
        assert!(creds.validate_username("ABCD").is_err());
    }

    #[actix_web::test]
    async fn register_then_authenticate() {
        let creds = credentials();
        creds.register("ABC", "1234qwer").await.unwrap();

        let balance = creds.authenticate("ABC", "1234qwer").await.unwrap();
        assert_eq!(balance, Balance::new(14, 0.0));

        let err = creds.authenticate("ABC", "nope").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = creds.authenticate("XYZ", "1234qwer").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_web::test]
    async fn register_rejects_bad_input_and_duplicates() {
        let creds = credentials();
        assert!(matches!(
            creds.register("ABCD", "pw").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            creds.register("ABC", "").await,
            Err(AppError::Validation(_))
        ));

        creds.register("ABC", "pw").await.unwrap();
        assert!(matches!(
            creds.register("ABC", "other").await,
            Err(AppError::AlreadyExists(_))
        ));
    }

    #[actix_web::test]
    async fn legacy_policy_stores_salted_digest() {
        let store = Arc::new(MemoryStore::new());
        let creds = CredentialStore::new(
            store.clone(),
            CredentialPolicy {
                scheme: PasswordScheme::Legacy,
                ..CredentialPolicy::default()
            },
        );
        creds.register("ABC", "pw").await.unwrap();

        let stored = store.find_employee("ABC").await.unwrap().unwrap().password;
        assert_eq!(stored.split('$').count(), 2);
        assert!(creds.authenticate("ABC", "pw").await.is_ok());
    }
}
