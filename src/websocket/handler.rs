use crate::{
    error::GameError,
    game::{GameEvent, Notification},
    models::PlayerId,
    websocket::{
        hub::Notifier,
        messages::{ClientMessage, ServerMessage},
    },
    AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// WebSocket upgrade handler. Every connection is a new anonymous player.
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let player = state.next_player_id();
    tracing::info!("WebSocket upgrade for player {}", player);
    ws.on_upgrade(move |socket| handle_socket(socket, state, player))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, player: PlayerId) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(state.config.game.outbound_buffer);

    state.hub.register(player, tx.clone());
    tracing::info!(
        "WebSocket connection established for player {} ({} connected)",
        player,
        state.hub.connected_count()
    );

    if tx
        .send(ServerMessage::Welcome { player_id: player })
        .await
        .is_err()
    {
        state.hub.unregister(player);
        return;
    }

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        handle_client_message(client_msg, &state_for_recv, &tx, player).await;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse message from player {}: {}", player, e);
                        let error_msg = ServerMessage::Error {
                            code: "invalid_message".to_string(),
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client disconnected: player {}", player);
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    // Any session the player was in stays as it is; abandoned games are not reclaimed
    state.hub.unregister(player);

    tracing::info!("WebSocket connection closed for player {}", player);
}

/// Run one registry operation and deliver what it produced.
///
/// The registry call is synchronous and returns before anything is sent, so
/// delivery never happens while the registry lock is held.
pub async fn handle_client_message(
    msg: ClientMessage,
    state: &AppState,
    tx: &mpsc::Sender<ServerMessage>,
    player: PlayerId,
) {
    let result: Result<Vec<Notification>, GameError> = match msg {
        ClientMessage::CreateGame => {
            tracing::info!("Player {} creating game", player);
            state
                .registry
                .create_game(player)
                .map(|created| created.notifications())
        }
        ClientMessage::FindGame => {
            tracing::info!("Player {} looking for a game", player);
            state
                .registry
                .find_game(player)
                .map(|pairing| pairing.notifications())
        }
        ClientMessage::MakeMove { cell } => {
            tracing::debug!("Player {} moving at cell {}", player, cell);
            state
                .registry
                .make_move(player, cell)
                .map(|result| result.notifications())
        }
        ClientMessage::GetState => state
            .registry
            .view(player)
            .map(|game| vec![Notification::new(player, GameEvent::State(game))]),
    };

    match result {
        Ok(notifications) => state.hub.dispatch(notifications).await,
        Err(e) => {
            tracing::warn!("Rejected request from player {}: {}", player, e);
            let _ = tx.send(ServerMessage::from(e)).await;
        }
    }
}
