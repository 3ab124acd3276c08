// tests/scoring_tests.rs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use quiz_platform::{
    error::AppError,
    models::{question::Question, user::User},
    services::{Leaderboard, QuestionSampler, ScoringEngine},
    store::{QuestionStore, ResultStore, Stores, UserStore, memory::MemoryUserStore},
};
use sqlx::types::Json;

fn question(id: &str, subject: &str, answer: &str) -> Question {
    Question {
        id: id.to_string(),
        subject: subject.to_string(),
        question_text: format!("Question {}", id),
        options: Json(vec![answer.to_string(), "wrong".to_string()]),
        correct_answer: answer.to_string(),
    }
}

fn user(id: &str, total_score: i64) -> User {
    User {
        id: id.to_string(),
        username: id.to_string(),
        email: format!("{}@example.com", id),
        password: String::new(),
        total_score,
        created_at: chrono::Utc::now(),
    }
}

fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn engine(stores: &Stores) -> ScoringEngine {
    ScoringEngine::new(
        stores.questions.clone(),
        stores.results.clone(),
        stores.users.clone(),
    )
}

#[tokio::test]
async fn test_mixed_answers_score_one() {
    let stores = Stores::in_memory();
    stores.questions.insert(question("Q1", "math", "4")).await.unwrap();
    stores.questions.insert(question("Q2", "math", "Paris")).await.unwrap();

    let submission = engine(&stores)
        .submit("u1", "math", &answers(&[("Q1", "4"), ("Q2", "London")]))
        .await
        .unwrap();

    assert_eq!(submission.score, 1);
    assert_eq!(submission.result.subject, "math");
}

#[tokio::test]
async fn test_scores_against_whole_subject_pool() {
    let stores = Stores::in_memory();
    for i in 0..8 {
        stores
            .questions
            .insert(question(&format!("m{}", i), "math", "x"))
            .await
            .unwrap();
    }
    stores.questions.insert(question("h1", "history", "x")).await.unwrap();

    // Answers for all 8 math questions, although only 5 are ever handed out,
    // plus one from another subject.
    let mut all = answers(&[("h1", "x")]);
    for i in 0..8 {
        all.insert(format!("m{}", i), "X ".to_string());
    }

    let submission = engine(&stores).submit("u1", "math", &all).await.unwrap();
    assert_eq!(submission.score, 8);
}

#[tokio::test]
async fn test_empty_answers_score_zero_and_are_recorded() {
    let stores = Stores::in_memory();
    stores.questions.insert(question("Q1", "math", "4")).await.unwrap();
    stores.users.insert(user("u1", 12)).await.unwrap();

    let submission = engine(&stores)
        .submit("u1", "math", &HashMap::new())
        .await
        .unwrap();

    assert_eq!(submission.score, 0);
    assert_eq!(submission.new_total, Some(12));
    assert_eq!(stores.results.find_by_user("u1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_total_score_is_sum_of_results() {
    let stores = Stores::in_memory();
    stores.questions.insert(question("Q1", "math", "4")).await.unwrap();
    stores.questions.insert(question("Q2", "math", "9")).await.unwrap();
    stores.questions.insert(question("C1", "chem", "H2O")).await.unwrap();
    stores.users.insert(user("u1", 0)).await.unwrap();

    let scoring = engine(&stores);
    scoring
        .submit("u1", "math", &answers(&[("Q1", "4"), ("Q2", "9")]))
        .await
        .unwrap();
    scoring
        .submit("u1", "chem", &answers(&[("C1", "h2o")]))
        .await
        .unwrap();
    scoring
        .submit("u1", "math", &answers(&[("Q1", "5")]))
        .await
        .unwrap();

    let results = stores.results.find_by_user("u1").await.unwrap();
    let sum: i64 = results.iter().map(|r| r.score).sum();
    let total = stores.users.find_by_id("u1").await.unwrap().unwrap().total_score;

    assert_eq!(results.len(), 3);
    assert_eq!(sum, 3);
    assert_eq!(total, sum);
    // newest first
    assert_eq!(results[0].score, 0);
}

#[tokio::test]
async fn test_unknown_user_is_not_an_error() {
    let stores = Stores::in_memory();
    stores.questions.insert(question("Q1", "math", "4")).await.unwrap();

    let submission = engine(&stores)
        .submit("ghost", "math", &answers(&[("Q1", "4")]))
        .await
        .unwrap();

    assert_eq!(submission.score, 1);
    assert_eq!(submission.new_total, None);
    assert_eq!(stores.results.find_by_user("ghost").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_leaderboard_reflects_submission() {
    let stores = Stores::in_memory();
    stores.questions.insert(question("Q1", "math", "4")).await.unwrap();
    stores.users.insert(user("A", 30)).await.unwrap();
    stores.users.insert(user("B", 50)).await.unwrap();
    stores.users.insert(user("C", 10)).await.unwrap();

    let leaderboard = Leaderboard::new(stores.users.clone());
    let names = |entries: Vec<quiz_platform::models::quiz_result::LeaderboardEntry>| {
        entries.into_iter().map(|e| e.username).collect::<Vec<_>>()
    };

    assert_eq!(names(leaderboard.top_scorers(10).await.unwrap()), vec!["B", "A", "C"]);

    engine(&stores)
        .submit("C", "math", &answers(&[("Q1", "4")]))
        .await
        .unwrap();

    let top = leaderboard.top_scorers(10).await.unwrap();
    assert_eq!(top[2].username, "C");
    assert_eq!(top[2].total_score, 11);
}

#[tokio::test]
async fn test_sampler_returns_distinct_questions_of_subject() {
    let stores = Stores::in_memory();
    for i in 0..12 {
        stores
            .questions
            .insert(question(&format!("j{}", i), "java", "x"))
            .await
            .unwrap();
    }
    stores.questions.insert(question("o1", "os", "x")).await.unwrap();

    let sampler = QuestionSampler::new(stores.questions.clone());

    let picked = sampler.sample("java").await.unwrap();
    let mut ids: Vec<_> = picked.iter().map(|q| q.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
    assert!(picked.iter().all(|q| q.subject == "java"));

    assert_eq!(sampler.sample("os").await.unwrap().len(), 1);
    assert!(sampler.sample("art").await.unwrap().is_empty());
}

/// User store whose score update always fails.
struct BrokenUserStore {
    inner: MemoryUserStore,
}

#[async_trait]
impl UserStore for BrokenUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.inner.find_by_email(email).await
    }

    async fn insert(&self, user: User) -> Result<User, AppError> {
        self.inner.insert(user).await
    }

    async fn add_to_total_score(&self, _id: &str, _delta: i64) -> Result<Option<i64>, AppError> {
        Err(AppError::StorageError("connection reset".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        self.inner.list_all().await
    }
}

#[tokio::test]
async fn test_failed_credit_leaves_result_recorded() {
    let stores = Stores::in_memory();
    stores.questions.insert(question("Q1", "math", "4")).await.unwrap();
    let users = Arc::new(BrokenUserStore {
        inner: MemoryUserStore::default(),
    });
    users.insert(user("u1", 5)).await.unwrap();

    let scoring = ScoringEngine::new(stores.questions.clone(), stores.results.clone(), users.clone());
    let err = scoring
        .submit("u1", "math", &answers(&[("Q1", "4")]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::StorageError(_)));
    // Step 1 of the saga stays; step 2 never happened.
    assert_eq!(stores.results.find_by_user("u1").await.unwrap().len(), 1);
    assert_eq!(users.find_by_id("u1").await.unwrap().unwrap().total_score, 5);
}
