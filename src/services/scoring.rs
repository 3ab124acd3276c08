// src/services/scoring.rs

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::AppError,
    models::{question::Question, quiz_result::QuizResult},
    store::{QuestionStore, ResultStore, UserStore},
};

/// Outcome of a scored submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub score: i64,
    /// The persisted result record.
    pub result: QuizResult,
    /// New total of the user, `None` when the user id is unknown.
    pub new_total: Option<i64>,
}

/// Scores submissions and records them.
///
/// A submission is a two-step saga without a spanning transaction:
/// 1. append the `QuizResult`;
/// 2. add the score to the user's total.
///
/// If step 2 fails the result stays recorded without a credit. This is
/// logged and reported as a storage error; nothing is rolled back.
#[derive(Clone)]
pub struct ScoringEngine {
    questions: Arc<dyn QuestionStore>,
    results: Arc<dyn ResultStore>,
    users: Arc<dyn UserStore>,
}

impl ScoringEngine {
    pub fn new(
        questions: Arc<dyn QuestionStore>,
        results: Arc<dyn ResultStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            questions,
            results,
            users,
        }
    }

    /// Scores `answers` against every question of `subject`, not only the
    /// ones that were handed out. Answers for ids outside the subject are
    /// ignored.
    pub async fn submit(
        &self,
        user_id: &str,
        subject: &str,
        answers: &HashMap<String, String>,
    ) -> Result<Submission, AppError> {
        let questions = self.questions.find_by_subject(subject).await?;
        let score = score_answers(&questions, answers);

        // Step 1: record the result.
        let result = self
            .results
            .insert(QuizResult {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                subject: subject.to_string(),
                score,
                date_taken: Utc::now(),
            })
            .await?;

        // Step 2: credit the user.
        let new_total = self
            .users
            .add_to_total_score(user_id, score)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Quiz result {} recorded but total score of user {} not updated: {}",
                    result.id,
                    user_id,
                    e
                );
                e
            })?;

        if new_total.is_none() {
            tracing::warn!("Quiz result {} belongs to unknown user {}", result.id, user_id);
        }

        tracing::info!(
            "User {} scored {}/{} in '{}'",
            user_id,
            score,
            questions.len(),
            subject
        );

        Ok(Submission {
            score,
            result,
            new_total,
        })
    }
}

/// Counts the questions whose submitted answer matches the correct one.
fn score_answers(questions: &[Question], answers: &HashMap<String, String>) -> i64 {
    let mut score = 0;

    for question in questions {
        let selected = answers.get(&question.id);
        let correct = selected.is_some_and(|s| answers_match(s, &question.correct_answer));

        tracing::debug!(
            "Question {}: selected {:?}, expected {:?}, correct: {}",
            question.id,
            selected,
            question.correct_answer,
            correct
        );

        if correct {
            score += 1;
        }
    }

    score
}

/// Trimmed, case-insensitive comparison.
fn answers_match(selected: &str, correct: &str) -> bool {
    selected.trim().to_lowercase() == correct.trim().to_lowercase()
}
