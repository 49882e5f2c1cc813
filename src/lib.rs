pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod routes;
pub mod websocket;

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use axum::{routing::get, Router};
use config::Config;
use game::GameRegistry;
use models::PlayerId;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use websocket::ConnectionHub;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    /// Sessions and the matchmaking queue
    pub registry: GameRegistry,
    /// Outbound channels of connected players
    pub hub: ConnectionHub,
    next_player: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: GameRegistry::new(),
            hub: ConnectionHub::new(),
            next_player: AtomicU64::new(1),
        }
    }

    /// Hand out a fresh anonymous player id
    pub fn next_player_id(&self) -> PlayerId {
        PlayerId(self.next_player.fetch_add(1, Ordering::Relaxed))
    }
}

/// Build the router with websocket, API routes, CORS and request tracing
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(websocket::handle_websocket))
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_ids_are_unique() {
        let state = AppState::new(Config::default());
        let first = state.next_player_id();
        let second = state.next_player_id();
        assert_ne!(first, second);
    }
}
