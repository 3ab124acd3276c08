// src/services/mod.rs

//! Stateless services built once at startup with injected store handles.

pub mod accounts;
pub mod leaderboard;
pub mod sampler;
pub mod scoring;

pub use accounts::AccountService;
pub use leaderboard::Leaderboard;
pub use sampler::QuestionSampler;
pub use scoring::{ScoringEngine, Submission};
