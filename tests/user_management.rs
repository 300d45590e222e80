mod common;

use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, MockDatabase, Value};
use simple_erp_api::{
    dto::auth::UpdateProfileRequest,
    entity::users,
    error::AppError,
    services::user_service::{deactivate_user, list_users, update_profile, user_stats},
};

fn email(raw: &str) -> UpdateProfileRequest {
    UpdateProfileRequest { email: raw.into() }
}

#[tokio::test]
async fn same_email_is_a_no_op() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![common::user(1, "alice", "x")]])
        .into_connection();
    let state = common::state(orm);

    let resp = update_profile(&state, 1, email(" alice@example.com "))
        .await
        .unwrap();
    assert_eq!(resp.message, "Profile unchanged");
    assert_eq!(common::transaction_log(state).len(), 1);
}

#[tokio::test]
async fn email_owned_by_someone_else_is_a_duplicate() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![common::user(1, "alice", "x")]])
        .append_query_results([vec![common::user(2, "bob", "x")]])
        .into_connection();
    let state = common::state(orm);

    let err = update_profile(&state, 1, email("bob@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail));
}

#[tokio::test]
async fn email_change_is_saved() {
    let mut changed = common::user(1, "alice", "x");
    changed.email = "alice@new.example.com".into();

    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![common::user(1, "alice", "x")]])
        .append_query_results([Vec::<users::Model>::new()])
        .append_query_results([vec![changed]])
        .into_connection();
    let state = common::state(orm);

    let resp = update_profile(&state, 1, email("alice@new.example.com"))
        .await
        .unwrap();
    assert_eq!(resp.message, "Profile updated");
    assert_eq!(resp.data.email, "alice@new.example.com");
}

#[tokio::test]
async fn deactivating_a_missing_user_is_not_found() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<users::Model>::new()])
        .into_connection();
    let state = common::state(orm);

    let err = deactivate_user(&state, 77).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn deactivation_flips_the_flag() {
    let mut inactive = common::user(3, "carol", "x");
    inactive.is_active = false;

    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![common::user(3, "carol", "x")]])
        .append_query_results([vec![inactive]])
        .into_connection();
    let state = common::state(orm);

    let resp = deactivate_user(&state, 3).await.unwrap();
    assert!(!resp.data.is_active);
}

#[tokio::test]
async fn listing_hides_password_hashes() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            common::user(1, "alice", "$argon2id$a"),
            common::user(2, "bob", "$argon2id$b"),
        ]])
        .into_connection();
    let state = common::state(orm);

    let resp = list_users(&state).await.unwrap();
    assert_eq!(resp.data.count, 2);
    let json = serde_json::to_string(&resp).unwrap();
    assert!(!json.contains("argon2"));
    assert!(json.contains("\"isActive\":true"));
}

#[tokio::test]
async fn stats_split_active_and_inactive() {
    let count_row = |n: i64| BTreeMap::from([("num_items".to_string(), Value::BigInt(Some(n)))]);

    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(5)]])
        .append_query_results([vec![count_row(4)]])
        .append_query_results([vec![common::user(9, "zed", "x")]])
        .into_connection();
    let state = common::state(orm);

    let resp = user_stats(&state).await.unwrap();
    assert_eq!(resp.data.summary.total_users, 5);
    assert_eq!(resp.data.summary.active_users, 4);
    assert_eq!(resp.data.summary.inactive_users, 1);
    assert_eq!(resp.data.recent_users.len(), 1);
}
