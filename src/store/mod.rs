// src/store/mod.rs

//! Record collections behind the services.
//!
//! Each collection is a trait so the services can run against Postgres in
//! production and against the in-memory implementation in tests or when no
//! database is configured.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{question::Question, quiz_result::QuizResult, user::User},
};

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All questions of a subject, in storage order.
    async fn find_by_subject(&self, subject: &str) -> Result<Vec<Question>, AppError>;

    async fn insert(&self, question: Question) -> Result<Question, AppError>;
}

/// Append-only: results are never updated or deleted.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn insert(&self, result: QuizResult) -> Result<QuizResult, AppError>;

    /// Results of one user, newest first.
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<QuizResult>, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Fails with `AppError::DuplicateEmail` when the email is taken.
    async fn insert(&self, user: User) -> Result<User, AppError>;

    /// Atomically adds `delta` to the user's total score.
    /// Returns the new total, or `None` when no user has this id.
    async fn add_to_total_score(&self, id: &str, delta: i64) -> Result<Option<i64>, AppError>;

    /// Every user, in registration order.
    async fn list_all(&self) -> Result<Vec<User>, AppError>;
}

/// The three store handles, shared by every service.
#[derive(Clone)]
pub struct Stores {
    pub questions: Arc<dyn QuestionStore>,
    pub results: Arc<dyn ResultStore>,
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            questions: Arc::new(postgres::PgQuestionStore::new(pool.clone())),
            results: Arc::new(postgres::PgResultStore::new(pool.clone())),
            users: Arc::new(postgres::PgUserStore::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            questions: Arc::new(memory::MemoryQuestionStore::default()),
            results: Arc::new(memory::MemoryResultStore::default()),
            users: Arc::new(memory::MemoryUserStore::default()),
        }
    }
}
