use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::Rng;
use sha2::{Digest, Sha256};
use strum_macros::{Display, EnumString};

use crate::error::{AppError, AppResult};

/// Format used for newly stored credentials. Verification accepts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PasswordScheme {
    Argon2,
    /// `salt$sha256hex(salt + password)` with a four digit decimal salt.
    Legacy,
}

pub fn hash_password(password: &str, scheme: PasswordScheme) -> AppResult<String> {
    match scheme {
        PasswordScheme::Argon2 => {
            let argon2 = Argon2::default();
            let salt = SaltString::generate(&mut OsRng);

            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| {
                    tracing::error!(error = %e, "Password hashing failed");
                    AppError::Internal("password hashing failed".to_string())
                })
        }
        PasswordScheme::Legacy => {
            let salt = rand::thread_rng().gen_range(1000..=9999).to_string();
            Ok(legacy_hash(&salt, password))
        }
    }
}

/// Malformed stored values never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    if stored.starts_with("$argon2") {
        return match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        };
    }

    match stored.split('$').collect::<Vec<_>>().as_slice() {
        [salt, digest] => legacy_hash(salt, password) == format!("{}${}", salt, digest),
        _ => false,
    }
}

fn legacy_hash(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{}${:x}", salt, hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn argon2_round_trip() {
        let stored = hash_password("1234qwer", PasswordScheme::Argon2).unwrap();
        assert!(stored.starts_with("$argon2"));
        assert!(verify_password("1234qwer", &stored));
        assert!(!verify_password("1234qwer!", &stored));
    }

    #[test]
    fn legacy_format_is_salt_dollar_hex() {
        let stored = hash_password("1234qwer", PasswordScheme::Legacy).unwrap();
        let (salt, digest) = stored.split_once('$').unwrap();
        let salt: u32 = salt.parse().unwrap();
        assert!((1000..=9999).contains(&salt));
        assert_eq!(digest.len(), 64);
        assert!(verify_password("1234qwer", &stored));
        assert!(!verify_password("wrong", &stored));
    }

    #[test]
    fn verifies_known_legacy_credential() {
        // sha256("1234" + "secret")
        let digest = format!("{:x}", Sha256::digest(b"1234secret"));
        let stored = format!("1234${}", digest);
        assert!(verify_password("secret", &stored));
    }

    #[test]
    fn malformed_hashes_never_verify() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "no-separator"));
        assert!(!verify_password("x", "a$b$c"));
        assert!(!verify_password("x", "$argon2id$garbage"));
    }

    #[test]
    fn scheme_parses_from_config_value() {
        assert_eq!(PasswordScheme::from_str("argon2").unwrap(), PasswordScheme::Argon2);
        assert_eq!(PasswordScheme::from_str("legacy").unwrap(), PasswordScheme::Legacy);
        assert!(PasswordScheme::from_str("md5").is_err());
    }
}
