// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};

use crate::{
    config::{Config, LEADERBOARD_DEFAULT_LIMIT, LEADERBOARD_MAX_LIMIT},
    error::AppError,
    models::{
        question::PublicQuestion,
        quiz_result::{LeaderboardParams, SubmitQuizRequest},
    },
    services::{Leaderboard, QuestionSampler, ScoringEngine},
    store::Stores,
};

/// Returns up to 5 random questions of a subject.
///
/// The correct answers are stripped unless `EXPOSE_CORRECT_ANSWERS` is set.
pub async fn get_questions(
    State(sampler): State<QuestionSampler>,
    State(config): State<Config>,
    Path(subject): Path<String>,
) -> Result<Response, AppError> {
    let questions = sampler.sample(&subject).await?;

    if config.expose_correct_answers {
        return Ok(Json(questions).into_response());
    }

    let public: Vec<PublicQuestion> = questions.into_iter().map(PublicQuestion::from).collect();
    Ok(Json(public).into_response())
}

/// Scores a submission, records the result and credits the user.
///
/// A body that cannot be decoded is rejected with 400; an unknown user id is
/// not an error.
pub async fn submit_quiz(
    State(scoring): State<ScoringEngine>,
    payload: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;

    let submission = scoring
        .submit(&req.user_id, &req.subject, &req.answers)
        .await?;

    Ok(Json(serde_json::json!({
        "message": "Quiz submitted successfully!",
        "subject": req.subject,
        "score": submission.score
    })))
}

/// Retrieves the top scorers, 10 unless `?limit=` says otherwise.
/// `limit` is capped at `LEADERBOARD_MAX_LIMIT`; `limit=0` yields an empty list.
pub async fn get_leaderboard(
    State(leaderboard): State<Leaderboard>,
    params: Result<Query<LeaderboardParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params?;
    let limit = params
        .limit
        .unwrap_or(LEADERBOARD_DEFAULT_LIMIT)
        .min(LEADERBOARD_MAX_LIMIT);

    let entries = leaderboard.top_scorers(limit).await?;

    Ok(Json(entries))
}

/// Lists a user's past results, newest first.
pub async fn get_results(
    State(stores): State<Stores>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let results = stores.results.find_by_user(&user_id).await?;

    Ok(Json(results))
}
