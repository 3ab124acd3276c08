// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,

    /// Category key the question belongs to (e.g. "java", "dbms").
    pub subject: String,

    pub question_text: String,

    /// List of options in display order.
    /// Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// Text of the correct option.
    pub correct_answer: String,
}

/// DTO for sending a question to a quiz taker (excludes the correct answer).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: String,
    pub subject: String,
    pub question_text: String,
    pub options: Json<Vec<String>>,
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            subject: q.subject,
            question_text: q.question_text,
            options: q.options,
        }
    }
}

/// One entry of the startup seed file.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SeedQuestion {
    #[validate(length(min = 1, max = 50))]
    pub subject: String,
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(length(min = 1, max = 500))]
    pub correct_answer: String,
}

impl SeedQuestion {
    /// Whether the correct answer is literally one of the options.
    pub fn answer_in_options(&self) -> bool {
        self.options.iter().any(|o| o == &self.correct_answer)
    }

    pub fn into_question(self) -> Question {
        Question {
            id: uuid::Uuid::new_v4().to_string(),
            subject: self.subject,
            question_text: self.question_text,
            options: Json(self.options),
            correct_answer: self.correct_answer,
        }
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new("options_cannot_be_empty"));
    }
    for opt in options {
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}
