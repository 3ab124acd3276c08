// src/services/sampler.rs

use std::sync::Arc;

use rand::{Rng, seq::SliceRandom};

use crate::{
    config::QUIZ_QUESTION_COUNT, error::AppError, models::question::Question, store::QuestionStore,
};

/// Picks the questions shown to a quiz taker.
#[derive(Clone)]
pub struct QuestionSampler {
    questions: Arc<dyn QuestionStore>,
    sample_size: usize,
}

impl QuestionSampler {
    pub fn new(questions: Arc<dyn QuestionStore>) -> Self {
        Self {
            questions,
            sample_size: QUIZ_QUESTION_COUNT,
        }
    }

    /// Returns up to `QUIZ_QUESTION_COUNT` questions of `subject` in random
    /// order. An unknown subject yields an empty list.
    pub async fn sample(&self, subject: &str) -> Result<Vec<Question>, AppError> {
        let pool = self.questions.find_by_subject(subject).await?;
        let total = pool.len();

        let picked = pick_random(pool, self.sample_size, &mut rand::thread_rng());
        tracing::debug!("Sampled {} of {} questions for '{}'", picked.len(), total, subject);

        Ok(picked)
    }
}

/// Uniform selection of `n` items without replacement, returned shuffled.
fn pick_random<T, R: Rng + ?Sized>(mut pool: Vec<T>, n: usize, rng: &mut R) -> Vec<T> {
    pool.shuffle(rng);
    pool.truncate(n);
    pool
}
