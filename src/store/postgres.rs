// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{question::Question, quiz_result::QuizResult, user::User},
};

use super::{QuestionStore, ResultStore, UserStore};

#[derive(Clone)]
pub struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn find_by_subject(&self, subject: &str) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT
                id,
                subject,
                question_text,
                options,
                correct_answer
            FROM questions
            WHERE subject = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(subject)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch questions for '{}': {:?}", subject, e);
            AppError::from(e)
        })?;

        Ok(questions)
    }

    async fn insert(&self, question: Question) -> Result<Question, AppError> {
        sqlx::query(
            r#"
            INSERT INTO questions (id, subject, question_text, options, correct_answer)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&question.id)
        .bind(&question.subject)
        .bind(&question.question_text)
        .bind(&question.options)
        .bind(&question.correct_answer)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert question: {:?}", e);
            AppError::from(e)
        })?;

        Ok(question)
    }
}

#[derive(Clone)]
pub struct PgResultStore {
    pool: PgPool,
}

impl PgResultStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for PgResultStore {
    async fn insert(&self, result: QuizResult) -> Result<QuizResult, AppError> {
        sqlx::query(
            r#"
            INSERT INTO quiz_results (id, user_id, subject, score, date_taken)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&result.id)
        .bind(&result.user_id)
        .bind(&result.subject)
        .bind(result.score)
        .bind(result.date_taken)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert quiz result: {:?}", e);
            AppError::from(e)
        })?;

        Ok(result)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<QuizResult>, AppError> {
        let results = sqlx::query_as::<_, QuizResult>(
            r#"
            SELECT id, user_id, subject, score, date_taken
            FROM quiz_results
            WHERE user_id = $1
            ORDER BY date_taken DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch results of user {}: {:?}", user_id, e);
            AppError::from(e)
        })?;

        Ok(results)
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, total_score, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user {}: {:?}", id, e);
            AppError::from(e)
        })?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, total_score, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user by email: {:?}", e);
            AppError::from(e)
        })?;

        Ok(user)
    }

    async fn insert(&self, user: User) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password, total_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, password, total_score, created_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.total_score)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::DuplicateEmail(format!("Email '{}' is already registered", user.email))
            }
            other => {
                tracing::error!("Failed to register user: {:?}", other);
                AppError::from(other)
            }
        })?;

        Ok(user)
    }

    async fn add_to_total_score(&self, id: &str, delta: i64) -> Result<Option<i64>, AppError> {
        // Single statement, so concurrent submissions cannot lose an update.
        let total = sqlx::query_as::<_, (i64,)>(
            "UPDATE users SET total_score = total_score + $1 WHERE id = $2 RETURNING total_score",
        )
        .bind(delta)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update total score of user {}: {:?}", id, e);
            AppError::from(e)
        })?;

        Ok(total.map(|(t,)| t))
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, total_score, created_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::from(e)
        })?;

        Ok(users)
    }
}
