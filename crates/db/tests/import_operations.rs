//! Integration tests for the import-operation journal.
//!
//! Exercises the full lifecycle against a real database: begin/complete/
//! fail round-trips, terminal-state immutability, synopsis truncation, and
//! newest-first listings.

use sqlx::PgPool;
use studygroup_core::import::ERROR_SUMMARY_MAX_CHARS;
use studygroup_db::models::import_operation::ImportStatus;
use studygroup_db::repositories::ImportOperationRepo;

#[sqlx::test]
async fn begin_creates_a_running_entry(pool: PgPool) {
    let op = ImportOperationRepo::create_running(&pool, "alice", "USER")
        .await
        .unwrap();

    assert_eq!(op.status, ImportStatus::Running);
    assert_eq!(op.username, "alice");
    assert_eq!(op.role, "USER");
    assert!(op.imported_count.is_none());
    assert!(op.error_message.is_none());
    assert!(op.finished_at.is_none());
}

#[sqlx::test]
async fn complete_round_trip(pool: PgPool) {
    let op = ImportOperationRepo::create_running(&pool, "alice", "USER")
        .await
        .unwrap();
    ImportOperationRepo::mark_completed(&pool, op.id, 7)
        .await
        .unwrap();

    let reloaded = ImportOperationRepo::find_by_id(&pool, op.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, ImportStatus::Completed);
    assert_eq!(reloaded.imported_count, Some(7));
    assert!(reloaded.error_message.is_none());
    assert!(reloaded.finished_at.is_some());
    assert_eq!(reloaded.created_at, op.created_at);
}

#[sqlx::test]
async fn fail_round_trip(pool: PgPool) {
    let op = ImportOperationRepo::create_running(&pool, "alice", "USER")
        .await
        .unwrap();
    ImportOperationRepo::mark_failed(&pool, op.id, "3 validation error(s)")
        .await
        .unwrap();

    let reloaded = ImportOperationRepo::find_by_id(&pool, op.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, ImportStatus::Failed);
    assert!(reloaded.imported_count.is_none());
    assert_eq!(reloaded.error_message.as_deref(), Some("3 validation error(s)"));
    assert!(reloaded.finished_at.is_some());
}

#[sqlx::test]
async fn failure_synopsis_is_truncated(pool: PgPool) {
    let op = ImportOperationRepo::create_running(&pool, "alice", "USER")
        .await
        .unwrap();
    let long = "e".repeat(ERROR_SUMMARY_MAX_CHARS + 500);
    ImportOperationRepo::mark_failed(&pool, op.id, &long)
        .await
        .unwrap();

    let reloaded = ImportOperationRepo::find_by_id(&pool, op.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        reloaded.error_message.unwrap().chars().count(),
        ERROR_SUMMARY_MAX_CHARS
    );
}

#[sqlx::test]
async fn terminal_states_are_immutable(pool: PgPool) {
    let op = ImportOperationRepo::create_running(&pool, "alice", "USER")
        .await
        .unwrap();
    ImportOperationRepo::mark_completed(&pool, op.id, 2)
        .await
        .unwrap();
    ImportOperationRepo::mark_failed(&pool, op.id, "late failure")
        .await
        .unwrap();

    let reloaded = ImportOperationRepo::find_by_id(&pool, op.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, ImportStatus::Completed);
    assert_eq!(reloaded.imported_count, Some(2));
    assert!(reloaded.error_message.is_none());
}

#[sqlx::test]
async fn finalizing_a_missing_entry_is_a_no_op(pool: PgPool) {
    ImportOperationRepo::mark_completed(&pool, 424242, 1)
        .await
        .unwrap();
    ImportOperationRepo::mark_failed(&pool, 424242, "nothing here")
        .await
        .unwrap();

    assert!(ImportOperationRepo::find_by_id(&pool, 424242)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
async fn listings_are_newest_first_and_filterable(pool: PgPool) {
    let first = ImportOperationRepo::create_running(&pool, "alice", "USER")
        .await
        .unwrap();
    let second = ImportOperationRepo::create_running(&pool, "bob", "USER")
        .await
        .unwrap();
    let third = ImportOperationRepo::create_running(&pool, "alice", "USER")
        .await
        .unwrap();

    let all = ImportOperationRepo::list_all(&pool).await.unwrap();
    let ids: Vec<_> = all.iter().map(|op| op.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);

    let alices = ImportOperationRepo::list_by_username(&pool, "alice")
        .await
        .unwrap();
    let ids: Vec<_> = alices.iter().map(|op| op.id).collect();
    assert_eq!(ids, vec![third.id, first.id]);
    assert!(alices.iter().all(|op| op.username == "alice"));
}
