//! Concurrent deductions against one employee must never overdraw the balance.

use std::sync::Arc;

use futures::future::join_all;
use leave_tracker::auth::credentials::CredentialPolicy;
use leave_tracker::model::leave_request::LeaveType;
use leave_tracker::store::MemoryStore;
use leave_tracker::{AppError, LeaveService};
use tokio::sync::Barrier;

async fn registered_service() -> LeaveService {
    let service = LeaveService::new(Arc::new(MemoryStore::new()), CredentialPolicy::default());
    service.register("ABC", "pw").await.unwrap();
    service
}

async fn race_deductions(service: &LeaveService, tasks: usize, days: f64) -> (usize, usize) {
    let barrier = Arc::new(Barrier::new(tasks));

    let handles = (0..tasks).map(|_| {
        let service = service.clone();
        let barrier = barrier.clone();
        tokio::spawn(async move {
            barrier.wait().await;
            service.ledger().deduct("ABC", days).await
        })
    });

    let mut ok = 0;
    let mut insufficient = 0;
    for result in join_all(handles).await {
        match result.unwrap() {
            Ok(_) => ok += 1,
            Err(AppError::InsufficientBalance { .. }) => insufficient += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    (ok, insufficient)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn whole_day_deductions_stop_at_zero() {
    let service = registered_service().await;

    let (ok, insufficient) = race_deductions(&service, 50, 1.0).await;

    assert_eq!(ok, 14);
    assert_eq!(insufficient, 36);
    let balance = service.get_balance("ABC").await.unwrap();
    assert_eq!(balance.used_leave, 14.0);
    assert_eq!(balance.remaining_leave, 0.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn fractional_deductions_take_floor_of_remaining() {
    let service = registered_service().await;

    // floor(14 / 1.5) = 9
    let (ok, insufficient) = race_deductions(&service, 20, 1.5).await;

    assert_eq!(ok, 9);
    assert_eq!(insufficient, 11);
    let balance = service.get_balance("ABC").await.unwrap();
    assert_eq!(balance.used_leave, 13.5);
    assert!(balance.used_leave <= f64::from(balance.total_leave));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_submissions_keep_journal_and_ledger_in_step() {
    let service = registered_service().await;
    let tasks = 40;
    let barrier = Arc::new(Barrier::new(tasks));

    let handles = (0..tasks).map(|_| {
        let service = service.clone();
        let barrier = barrier.clone();
        tokio::spawn(async move {
            barrier.wait().await;
            service
                .submit_request("ABC", "2024-01-02", "2024-01-02", LeaveType::MorningHalf)
                .await
        })
    });

    let accepted = join_all(handles)
        .await
        .into_iter()
        .filter(|result| matches!(result, Ok(Ok(_))))
        .count();

    // 14 days of half-day requests
    assert_eq!(accepted, 28);
    let history = service.get_history("ABC").await.unwrap();
    assert_eq!(history.len(), accepted);
    assert_eq!(service.get_balance("ABC").await.unwrap().used_leave, 14.0);

    let ids: Vec<u64> = history.iter().map(|r| r.id).collect();
    assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
}
