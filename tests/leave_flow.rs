//! End-to-end leave flows through `LeaveService` on the in-memory store.

use std::sync::Arc;

use leave_tracker::auth::credentials::CredentialPolicy;
use leave_tracker::model::employee::{Balance, NewEmployee};
use leave_tracker::model::leave_request::{LeaveStatus, LeaveType};
use leave_tracker::store::{LeaveStore, MemoryStore};
use leave_tracker::{AppError, LeaveService};

fn service() -> LeaveService {
    LeaveService::new(Arc::new(MemoryStore::new()), CredentialPolicy::default())
}

async fn service_with(username: &str, total_leave: i32, used_leave: f64) -> LeaveService {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_employee(NewEmployee {
            username: username.to_string(),
            password: "unused".to_string(),
            total_leave,
            used_leave,
        })
        .await
        .unwrap();
    LeaveService::new(store, CredentialPolicy::default())
}

#[actix_web::test]
async fn full_week_then_invalid_half_day() {
    let service = service();
    service.register("ABC", "1234qwer").await.unwrap();
    assert_eq!(
        service.authenticate("ABC", "1234qwer").await.unwrap(),
        Balance::new(14, 0.0)
    );

    let submitted = service
        .submit_request("ABC", "2024-01-01", "2024-01-05", LeaveType::FullDay)
        .await
        .unwrap();
    assert_eq!(submitted.days, 5.0);

    let balance = service.get_balance("ABC").await.unwrap();
    assert_eq!(balance.remaining_leave, 9.0);
    assert_eq!(balance.used_leave, 5.0);

    let err = service
        .submit_request("ABC", "2024-01-01", "2024-01-02", LeaveType::MorningHalf)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidRange(_)));

    // the rejected half day left nothing behind
    assert_eq!(service.get_history("ABC").await.unwrap().len(), 1);
    assert_eq!(service.get_balance("ABC").await.unwrap().remaining_leave, 9.0);
}

#[actix_web::test]
async fn insufficient_balance_changes_nothing() {
    let service = service_with("ABC", 14, 11.0).await;

    let err = service
        .submit_request("ABC", "2024-01-01", "2024-01-05", LeaveType::FullDay)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AppError::InsufficientBalance {
            requested: 5.0,
            remaining: 3.0
        }
    );

    assert_eq!(
        service.get_balance("ABC").await.unwrap(),
        Balance::new(14, 11.0)
    );
    assert!(service.get_history("ABC").await.unwrap().is_empty());
}

#[actix_web::test]
async fn history_lists_newest_first_with_computed_days() {
    let service = service_with("ABC", 14, 0.0).await;

    let first = service
        .submit_request("ABC", "2024-01-04", "2024-01-09", LeaveType::FullDay)
        .await
        .unwrap();
    let second = service
        .submit_request("ABC", "2024-01-10", "2024-01-10", LeaveType::AfternoonHalf)
        .await
        .unwrap();
    assert!(second.request_id > first.request_id);

    let history = service.get_history("ABC").await.unwrap();
    assert_eq!(history.len(), 2);

    let newest = &history[0];
    assert_eq!(newest.id, second.request_id);
    assert_eq!(newest.days, 0.5);
    assert_eq!(newest.leave_type, LeaveType::AfternoonHalf);
    assert_eq!(newest.status, LeaveStatus::Pending);
    assert_eq!(newest.username, "ABC");

    assert_eq!(history[1].id, first.request_id);
    assert_eq!(history[1].days, 4.0);

    assert_eq!(service.get_balance("ABC").await.unwrap().used_leave, 4.5);
}

#[actix_web::test]
async fn weekend_request_is_journaled_at_no_cost() {
    let service = service_with("ABC", 14, 14.0).await;

    let submitted = service
        .submit_request("ABC", "2024-01-06", "2024-01-07", LeaveType::FullDay)
        .await
        .unwrap();
    assert_eq!(submitted.days, 0.0);
    assert_eq!(service.get_history("ABC").await.unwrap().len(), 1);
    assert_eq!(service.get_balance("ABC").await.unwrap().remaining_leave, 0.0);
}

#[actix_web::test]
async fn unknown_users_and_bad_dates() {
    let service = service();

    assert!(matches!(
        service.get_balance("XYZ").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service
            .submit_request("XYZ", "2024-01-01", "2024-01-01", LeaveType::FullDay)
            .await,
        Err(AppError::NotFound(_))
    ));
    assert!(service.get_history("XYZ").await.unwrap().is_empty());

    assert!(matches!(
        service
            .submit_request("XYZ", "2024-02-30", "2024-03-01", LeaveType::FullDay)
            .await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        service.preview_days("2024-01-05", "2024-01-01", LeaveType::FullDay),
        Err(AppError::InvalidRange(_))
    ));
}

#[actix_web::test]
async fn preview_has_no_side_effects() {
    let service = service_with("ABC", 14, 0.0).await;

    assert_eq!(
        service
            .preview_days("2024-01-01", "2024-01-05", LeaveType::FullDay)
            .unwrap(),
        5.0
    );
    assert!(service.get_history("ABC").await.unwrap().is_empty());
    assert_eq!(service.get_balance("ABC").await.unwrap().used_leave, 0.0);
}

#[actix_web::test]
async fn ledger_and_journal_work_on_their_own() {
    let service = service_with("ABC", 14, 0.0).await;

    assert_eq!(service.ledger().deduct("ABC", 2.5).await.unwrap(), 2.5);
    assert!(matches!(
        service.ledger().deduct("ABC", 12.0).await,
        Err(AppError::InsufficientBalance { .. })
    ));
    assert_eq!(service.ledger().query("ABC").await.unwrap().remaining_leave, 11.5);

    let date = leave_tracker::leave::parse_date("2024-01-02").unwrap();
    let id = service
        .journal()
        .append("ABC", date, date, 1.0, LeaveType::FullDay)
        .await
        .unwrap();
    let listed = service.journal().list_for("ABC").await.unwrap();
    assert_eq!(listed[0].id, id);
    // appending alone does not charge the balance
    assert_eq!(service.ledger().query("ABC").await.unwrap().used_leave, 2.5);
}
