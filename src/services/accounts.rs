// src/services/accounts.rs

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::AppError,
    models::user::{RegisterRequest, User},
    store::UserStore,
    utils::hash::{hash_password, verify_password},
};

/// Registration and login against the user store.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Creates a user with a zero total score.
    /// Rejects an email that is already registered.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::DuplicateEmail(format!(
                "Email '{}' is already registered",
                req.email
            )));
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: req.username,
            email: req.email,
            password: hash_password(&req.password)?,
            total_score: 0,
            created_at: Utc::now(),
        };

        // The store re-checks uniqueness, which covers two concurrent registrations.
        let user = self.users.insert(user).await?;
        tracing::info!("Registered user {} ({})", user.id, user.username);

        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::NotFound("User not found".to_string()))?;

        if !verify_password(password, &user.password)? {
            return Err(AppError::InvalidCredentials("Invalid credentials".to_string()));
        }

        Ok(user)
    }
}
