// tests/postgres_store_tests.rs

//! Runs against a real Postgres from `DATABASE_URL`.
//! Every test returns early when the variable is unset.

use chrono::{Duration, Utc};
use quiz_platform::{
    error::AppError,
    models::{quiz_result::QuizResult, user::User},
    store::{
        ResultStore, UserStore,
        postgres::{PgResultStore, PgUserStore},
    },
};
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connects and migrates, or `None` when no database is configured.
async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping Postgres store test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    Some(pool)
}

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}

fn new_user(email: &str, total_score: i64) -> User {
    User {
        id: uuid::Uuid::new_v4().to_string(),
        username: unique("u"),
        email: email.to_string(),
        password: "not-a-real-hash".to_string(),
        total_score,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn add_to_total_score_returns_new_total() {
    let Some(pool) = test_pool().await else { return };
    let users = PgUserStore::new(pool);

    let user = users
        .insert(new_user(&format!("{}@example.com", unique("inc")), 10))
        .await
        .unwrap();

    assert_eq!(users.add_to_total_score(&user.id, 4).await.unwrap(), Some(14));
    assert_eq!(users.add_to_total_score(&user.id, 0).await.unwrap(), Some(14));

    let stored = users.find_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.total_score, 14);
}

#[tokio::test]
async fn add_to_total_score_unknown_user_is_none() {
    let Some(pool) = test_pool().await else { return };
    let users = PgUserStore::new(pool);

    let total = users
        .add_to_total_score(&unique("missing"), 3)
        .await
        .unwrap();

    assert_eq!(total, None);
}

#[tokio::test]
async fn concurrent_increments_are_not_lost() {
    let Some(pool) = test_pool().await else { return };
    let users = std::sync::Arc::new(PgUserStore::new(pool));

    let user = users
        .insert(new_user(&format!("{}@example.com", unique("race")), 0))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let users = users.clone();
        let id = user.id.clone();
        handles.push(tokio::spawn(async move {
            users.add_to_total_score(&id, 1).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stored = users.find_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.total_score, 20);
}

#[tokio::test]
async fn insert_duplicate_email_maps_to_duplicate_email() {
    let Some(pool) = test_pool().await else { return };
    let users = PgUserStore::new(pool);
    let email = format!("{}@example.com", unique("dup"));

    users.insert(new_user(&email, 0)).await.unwrap();
    let err = users.insert(new_user(&email, 0)).await.unwrap_err();

    assert!(matches!(err, AppError::DuplicateEmail(_)));
    assert!(users.find_by_email(&email).await.unwrap().is_some());
}

#[tokio::test]
async fn find_by_user_returns_newest_first() {
    let Some(pool) = test_pool().await else { return };
    let results = PgResultStore::new(pool);
    let user_id = unique("hist");
    let now = Utc::now();

    // Inserted out of order on purpose.
    for (score, age_minutes) in [(2, 30), (5, 1), (3, 10)] {
        results
            .insert(QuizResult {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user_id.clone(),
                subject: "math".to_string(),
                score,
                date_taken: now - Duration::minutes(age_minutes),
            })
            .await
            .unwrap();
    }

    let history = results.find_by_user(&user_id).await.unwrap();
    let scores: Vec<i64> = history.iter().map(|r| r.score).collect();

    assert_eq!(scores, vec![5, 3, 2]);
    assert!(results.find_by_user(&unique("nobody")).await.unwrap().is_empty());
}

#[tokio::test]
async fn lookups_on_closed_pool_are_storage_errors() {
    let Some(pool) = test_pool().await else { return };
    pool.close().await;

    let users = PgUserStore::new(pool.clone());
    let results = PgResultStore::new(pool);

    assert!(matches!(
        users.find_by_id("anyone").await,
        Err(AppError::StorageError(_))
    ));
    assert!(matches!(
        users.find_by_email("anyone@example.com").await,
        Err(AppError::StorageError(_))
    ));
    assert!(matches!(
        results.find_by_user("anyone").await,
        Err(AppError::StorageError(_))
    ));
}
