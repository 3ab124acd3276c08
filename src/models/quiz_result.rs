// src/models/quiz_result.rs

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Represents the 'quiz_results' table in the database.
/// Append-only log of scored submissions.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,
    /// Advisory reference to `users.id`; not enforced.
    pub user_id: String,
    pub subject: String,
    pub score: i64,
    pub date_taken: chrono::DateTime<chrono::Utc>,
}

/// Ranked row of the leaderboard.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub username: String,
    pub total_score: i64,
}

/// Query string of the leaderboard endpoint.
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<usize>,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub user_id: String,

    pub subject: String,

    /// User's answers map.
    /// Key: Question ID
    /// Value: Text of the selected option
    #[serde(deserialize_with = "string_answers")]
    pub answers: HashMap<String, String>,
}

/// Accepts any JSON object and keeps only the entries whose value is a string.
/// Anything that is not an object is a decoding error.
fn string_answers<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Map::<String, Value>::deserialize(deserializer)?;

    Ok(raw
        .into_iter()
        .filter_map(|(id, answer)| match answer {
            Value::String(text) => Some((id, text)),
            _ => None,
        })
        .collect())
}
