// src/seed.rs

use std::collections::{HashMap, HashSet};

use validator::Validate;

use crate::{error::AppError, models::question::SeedQuestion, store::QuestionStore};

/// Loads questions from a JSON seed file into the store.
///
/// Subjects that already hold questions are left alone, so restarting with
/// the same file does not duplicate anything. Invalid entries are skipped.
/// Returns the number of inserted questions.
pub async fn seed_questions(store: &dyn QuestionStore, path: &str) -> Result<usize, AppError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::StorageError(format!("cannot read {}: {}", path, e)))?;

    let entries: Vec<SeedQuestion> = serde_json::from_str(&raw)?;
    insert_new_subjects(store, entries).await
}

async fn insert_new_subjects(
    store: &dyn QuestionStore,
    entries: Vec<SeedQuestion>,
) -> Result<usize, AppError> {
    let mut by_subject: HashMap<String, Vec<SeedQuestion>> = HashMap::new();
    for entry in entries {
        if let Err(e) = entry.validate() {
            tracing::warn!("Skipping seed question '{}': {}", entry.question_text, e);
            continue;
        }
        if !entry.answer_in_options() {
            tracing::warn!(
                "Seed question '{}' has an answer that is not one of its options",
                entry.question_text
            );
        }
        by_subject.entry(entry.subject.clone()).or_default().push(entry);
    }

    let mut inserted = 0;
    let mut skipped = HashSet::new();
    for (subject, entries) in by_subject {
        if !store.find_by_subject(&subject).await?.is_empty() {
            skipped.insert(subject);
            continue;
        }
        for entry in entries {
            store.insert(entry.into_question()).await?;
            inserted += 1;
        }
    }

    if !skipped.is_empty() {
        tracing::info!("Seed skipped subjects already present: {:?}", skipped);
    }

    Ok(inserted)
}
