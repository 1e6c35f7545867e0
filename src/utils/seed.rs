use rand::Rng;
use rand::seq::SliceRandom;

use crate::auth::password::{PasswordScheme, hash_password};
use crate::error::{AppError, AppResult};
use crate::model::employee::NewEmployee;
use crate::store::LeaveStore;

pub const DEMO_EMPLOYEES: [&str; 10] = [
    "이상해", "피카츄", "파이리", "꼬부기", "버터플", "야도란", "피존투", "또가스", "식스테", "팬텀",
];
pub const DEMO_PASSWORD: &str = "1234qwer";

const DEMO_ALLOTMENTS: [i32; 3] = [14, 15, 16];

/// Inserts the demo roster with random balances. Existing names are left
/// untouched. Returns how many employees were created.
pub async fn seed_demo_employees(store: &dyn LeaveStore, scheme: PasswordScheme) -> AppResult<usize> {
    let mut created = 0usize;

    for name in DEMO_EMPLOYEES {
        let (total_leave, used_leave) = {
            let mut rng = rand::thread_rng();
            let total = *DEMO_ALLOTMENTS.choose(&mut rng).unwrap_or(&14);
            (total, rng.gen_range(0..=total))
        };

        let employee = NewEmployee {
            username: name.to_string(),
            password: hash_password(DEMO_PASSWORD, scheme)?,
            total_leave,
            used_leave: f64::from(used_leave),
        };

        match store.insert_employee(employee).await {
            Ok(()) => created += 1,
            Err(AppError::AlreadyExists(_)) => {}
            Err(e) => return Err(e),
        }
    }

    tracing::info!(created, "Demo employees seeded");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::store::MemoryStore;

    #[actix_web::test]
    async fn seeding_is_idempotent_and_balances_are_valid() {
        let store = MemoryStore::new();
        assert_eq!(
            seed_demo_employees(&store, PasswordScheme::Legacy).await.unwrap(),
            DEMO_EMPLOYEES.len()
        );
        assert_eq!(seed_demo_employees(&store, PasswordScheme::Legacy).await.unwrap(), 0);

        for name in DEMO_EMPLOYEES {
            let employee = store.find_employee(name).await.unwrap().unwrap();
            assert!(DEMO_ALLOTMENTS.contains(&employee.total_leave));
            assert!(employee.used_leave >= 0.0);
            assert!(employee.used_leave <= f64::from(employee.total_leave));
            assert!(verify_password(DEMO_PASSWORD, &employee.password));
        }
    }
}
