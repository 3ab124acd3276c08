// src/store/memory.rs

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::{question::Question, quiz_result::QuizResult, user::User},
};

use super::{QuestionStore, ResultStore, UserStore};

/// Process-local stores. Vectors keep insertion order, which is the fetch
/// order the services see.
#[derive(Default)]
pub struct MemoryQuestionStore {
    questions: RwLock<Vec<Question>>,
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    async fn find_by_subject(&self, subject: &str) -> Result<Vec<Question>, AppError> {
        let questions = self.questions.read().await;
        Ok(questions
            .iter()
            .filter(|q| q.subject == subject)
            .cloned()
            .collect())
    }

    async fn insert(&self, question: Question) -> Result<Question, AppError> {
        self.questions.write().await.push(question.clone());
        Ok(question)
    }
}

#[derive(Default)]
pub struct MemoryResultStore {
    results: RwLock<Vec<QuizResult>>,
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn insert(&self, result: QuizResult) -> Result<QuizResult, AppError> {
        self.results.write().await.push(result.clone());
        Ok(result)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<QuizResult>, AppError> {
        let results = self.results.read().await;
        // Appended in time order, so reversing gives newest first.
        Ok(results
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn add_to_total_score(&self, id: &str, delta: i64) -> Result<Option<i64>, AppError> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.total_score += delta;
            user.total_score
        }))
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().await.clone())
    }
}
