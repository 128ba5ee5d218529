//! Integration tests for the scan ledger.
//!
//! Exercises [`ScanRepo::record_scan`] against a real database to verify:
//! - Eligibility checks run in order (membership, opt-in, duplicate)
//! - Rejected attempts leave no ledger row and can be retried
//! - Concurrent attempts on one key serve exactly once
//! - Concurrent attempts on different keys all serve

use assert_matches::assert_matches;
use chrono::NaiveDate;
use forge_core::meal::Meal;
use forge_core::scan::{MealKey, RejectionReason, ScanResult};
use forge_db::models::membership::CreateMembership;
use forge_db::repositories::{MembershipRepo, OptInRepo, ReportRepo, ScanRepo};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 5).unwrap()
}

fn lunch_key() -> MealKey {
    MealKey {
        user_id: Uuid::new_v4(),
        mess_id: Uuid::new_v4(),
        date: day(),
        meal: Meal::Lunch,
    }
}

async fn enrol(pool: &PgPool, key: &MealKey, from: NaiveDate, to: Option<NaiveDate>) {
    MembershipRepo::create(
        pool,
        &CreateMembership {
            user_id: key.user_id,
            mess_id: key.mess_id,
            active_from: from,
            active_to: to,
        },
    )
    .await
    .expect("enrolment should succeed");
}

/// Enrol and opt in so the key is fully eligible.
async fn make_eligible(pool: &PgPool, key: &MealKey) {
    enrol(pool, key, day(), None).await;
    OptInRepo::upsert(pool, key, true)
        .await
        .expect("opt-in should succeed");
}

async fn ledger_rows(pool: &PgPool, key: &MealKey) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM meal_scans
         WHERE user_id = $1 AND mess_id = $2 AND scan_date = $3 AND meal = $4",
    )
    .bind(key.user_id)
    .bind(key.mess_id)
    .bind(key.date)
    .bind(key.meal.as_str())
    .fetch_one(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Eligibility ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_member_rejected_even_when_opted_in(pool: PgPool) {
    let key = lunch_key();
    OptInRepo::upsert(&pool, &key, true).await.unwrap();

    let result = ScanRepo::record_scan(&pool, &key, key.user_id).await.unwrap();

    assert_eq!(result.rejection(), Some(RejectionReason::NotAMember));
    assert_eq!(ledger_rows(&pool, &key).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_member_without_opt_in_rejected(pool: PgPool) {
    let key = lunch_key();
    enrol(&pool, &key, day(), None).await;

    let result = ScanRepo::record_scan(&pool, &key, key.user_id).await.unwrap();

    assert_eq!(result.rejection(), Some(RejectionReason::NotOptedIn));
    assert_eq!(ledger_rows(&pool, &key).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_member_opted_out_rejected(pool: PgPool) {
    let key = lunch_key();
    enrol(&pool, &key, day(), None).await;
    OptInRepo::upsert(&pool, &key, false).await.unwrap();

    let result = ScanRepo::record_scan(&pool, &key, key.user_id).await.unwrap();

    assert_eq!(result.rejection(), Some(RejectionReason::NotOptedIn));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_membership_rejected(pool: PgPool) {
    let key = lunch_key();
    let start = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
    enrol(&pool, &key, start, Some(end)).await;
    OptInRepo::upsert(&pool, &key, true).await.unwrap();

    let result = ScanRepo::record_scan(&pool, &key, key.user_id).await.unwrap();

    assert_eq!(result.rejection(), Some(RejectionReason::NotAMember));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_membership_in_other_mess_does_not_count(pool: PgPool) {
    let key = lunch_key();
    let other_mess = MealKey {
        mess_id: Uuid::new_v4(),
        ..key
    };
    enrol(&pool, &other_mess, day(), None).await;
    OptInRepo::upsert(&pool, &key, true).await.unwrap();

    let result = ScanRepo::record_scan(&pool, &key, key.user_id).await.unwrap();

    assert_eq!(result.rejection(), Some(RejectionReason::NotAMember));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_eligible_scan_served_then_already_scanned(pool: PgPool) {
    let key = lunch_key();
    make_eligible(&pool, &key).await;

    let first = ScanRepo::record_scan(&pool, &key, key.user_id).await.unwrap();
    assert_matches!(first, ScanResult::Served { .. });

    let second = ScanRepo::record_scan(&pool, &key, key.user_id).await.unwrap();
    assert_eq!(second.rejection(), Some(RejectionReason::AlreadyScanned));

    assert_eq!(ledger_rows(&pool, &key).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejected_attempt_can_be_retried_after_opt_in(pool: PgPool) {
    let key = lunch_key();
    enrol(&pool, &key, day(), None).await;

    let rejected = ScanRepo::record_scan(&pool, &key, key.user_id).await.unwrap();
    assert_eq!(rejected.rejection(), Some(RejectionReason::NotOptedIn));

    OptInRepo::upsert(&pool, &key, true).await.unwrap();

    let retried = ScanRepo::record_scan(&pool, &key, key.user_id).await.unwrap();
    assert!(retried.is_served());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_served_row_records_operator(pool: PgPool) {
    let key = lunch_key();
    make_eligible(&pool, &key).await;
    let staff = Uuid::new_v4();

    let result = ScanRepo::record_scan(&pool, &key, staff).await.unwrap();
    let ScanResult::Served { served_at } = result else {
        panic!("expected served, got {result:?}");
    };

    let row = ScanRepo::find(&pool, &key).await.unwrap().expect("row must exist");
    assert_eq!(row.served_at, served_at);
    assert_eq!(row.scanned_by, Some(staff));
    assert_eq!(row.outcome, "served");
    assert_eq!(row.meal, "lunch");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ledger_rows_are_immutable(pool: PgPool) {
    let key = lunch_key();
    make_eligible(&pool, &key).await;
    ScanRepo::record_scan(&pool, &key, key.user_id).await.unwrap();

    let update = sqlx::query("UPDATE meal_scans SET meal = 'dinner'")
        .execute(&pool)
        .await;
    assert!(update.is_err(), "ledger rows must not be updatable");

    let delete = sqlx::query("DELETE FROM meal_scans").execute(&pool).await;
    assert!(delete.is_err(), "ledger rows must not be deletable");

    assert_eq!(ledger_rows(&pool, &key).await, 1);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_scans_on_one_key_serve_exactly_once(pool: PgPool) {
    const ATTEMPTS: usize = 8;

    let key = lunch_key();
    make_eligible(&pool, &key).await;

    let handles: Vec<_> = (0..ATTEMPTS)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move { ScanRepo::record_scan(&pool, &key, key.user_id).await })
        })
        .collect();

    let results: Vec<ScanResult> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").expect("scan should not error"))
        .collect();

    let served = results.iter().filter(|r| r.is_served()).count();
    let duplicates = results
        .iter()
        .filter(|r| r.rejection() == Some(RejectionReason::AlreadyScanned))
        .count();

    assert_eq!(served, 1, "exactly one attempt must be served: {results:?}");
    assert_eq!(duplicates, ATTEMPTS - 1);
    assert_eq!(ledger_rows(&pool, &key).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_scans_on_distinct_keys_all_serve(pool: PgPool) {
    let mess_id = Uuid::new_v4();
    let mut keys = Vec::new();
    for _ in 0..6 {
        let key = MealKey {
            user_id: Uuid::new_v4(),
            mess_id,
            date: day(),
            meal: Meal::Dinner,
        };
        make_eligible(&pool, &key).await;
        keys.push(key);
    }

    let handles: Vec<_> = keys
        .iter()
        .copied()
        .map(|key| {
            let pool = pool.clone();
            tokio::spawn(async move { ScanRepo::record_scan(&pool, &key, key.user_id).await })
        })
        .collect();

    for joined in futures::future::join_all(handles).await {
        let result = joined.expect("task panicked").expect("scan should not error");
        assert!(result.is_served(), "distinct keys must not collide: {result:?}");
    }

    let report = ReportRepo::daily(&pool, mess_id, day()).await.unwrap();
    assert_eq!(report.meal(Meal::Dinner).served_count, 6);
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_lists_only_served_rows(pool: PgPool) {
    let lunch = lunch_key();
    let dinner = MealKey {
        meal: Meal::Dinner,
        ..lunch
    };
    let breakfast = MealKey {
        meal: Meal::Breakfast,
        ..lunch
    };
    make_eligible(&pool, &lunch).await;
    OptInRepo::upsert(&pool, &dinner, true).await.unwrap();

    ScanRepo::record_scan(&pool, &lunch, lunch.user_id).await.unwrap();
    ScanRepo::record_scan(&pool, &dinner, lunch.user_id).await.unwrap();
    // Never opted in: rejected, leaves no row.
    ScanRepo::record_scan(&pool, &breakfast, lunch.user_id).await.unwrap();

    let history = ScanRepo::list_for_user(&pool, lunch.user_id, 50, 0).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|r| r.outcome == "served"));

    let day_rows = ScanRepo::list_for_mess_day(&pool, lunch.mess_id, day()).await.unwrap();
    assert_eq!(day_rows.len(), 2);

    let paged = ScanRepo::list_for_user(&pool, lunch.user_id, 1, 1).await.unwrap();
    assert_eq!(paged.len(), 1);
}
