use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{game::RegistryStats, AppState};

/// Matchmaking queue depth and number of games in progress
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<RegistryStats> {
    Json(state.registry.stats())
}
