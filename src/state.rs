// src/state.rs

use axum::extract::FromRef;

use crate::{
    config::Config,
    services::{AccountService, Leaderboard, QuestionSampler, ScoringEngine},
    store::Stores,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub accounts: AccountService,
    pub sampler: QuestionSampler,
    pub scoring: ScoringEngine,
    pub leaderboard: Leaderboard,
    pub stores: Stores,
}

impl AppState {
    /// Wires every service to the same set of stores.
    pub fn new(config: Config, stores: Stores) -> Self {
        Self {
            accounts: AccountService::new(stores.users.clone()),
            sampler: QuestionSampler::new(stores.questions.clone()),
            scoring: ScoringEngine::new(
                stores.questions.clone(),
                stores.results.clone(),
                stores.users.clone(),
            ),
            leaderboard: Leaderboard::new(stores.users.clone()),
            config,
            stores,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for AccountService {
    fn from_ref(state: &AppState) -> Self {
        state.accounts.clone()
    }
}

impl FromRef<AppState> for QuestionSampler {
    fn from_ref(state: &AppState) -> Self {
        state.sampler.clone()
    }
}

impl FromRef<AppState> for ScoringEngine {
    fn from_ref(state: &AppState) -> Self {
        state.scoring.clone()
    }
}

impl FromRef<AppState> for Leaderboard {
    fn from_ref(state: &AppState) -> Self {
        state.leaderboard.clone()
    }
}

impl FromRef<AppState> for Stores {
    fn from_ref(state: &AppState) -> Self {
        state.stores.clone()
    }
}
