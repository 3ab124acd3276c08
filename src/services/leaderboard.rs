// src/services/leaderboard.rs

use std::sync::Arc;

use crate::{
    error::AppError,
    models::{quiz_result::LeaderboardEntry, user::User},
    store::UserStore,
};

/// Ranks users by lifetime total score.
#[derive(Clone)]
pub struct Leaderboard {
    users: Arc<dyn UserStore>,
}

impl Leaderboard {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn top_scorers(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, AppError> {
        let users = self.users.list_all().await?;
        Ok(rank(users, limit))
    }
}

/// Sorts descending by total score. The sort is stable, so ties keep the
/// store's order (registration order).
fn rank(mut users: Vec<User>, limit: usize) -> Vec<LeaderboardEntry> {
    users.sort_by(|a, b| b.total_score.cmp(&a.total_score));

    users
        .into_iter()
        .take(limit)
        .map(|u| LeaderboardEntry {
            username: u.username,
            total_score: u.total_score,
        })
        .collect()
}
