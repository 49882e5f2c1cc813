use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::{game::Notification, models::PlayerId, websocket::messages::ServerMessage};

/// Delivers registry notifications to players.
///
/// Always called after the registry call has returned, never while its lock
/// is held, so a slow recipient only ever delays its own connection task.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient: PlayerId, message: ServerMessage);

    async fn dispatch(&self, notifications: Vec<Notification>) {
        for notification in notifications {
            self.notify(notification.recipient, notification.event.into())
                .await;
        }
    }
}

/// Outbound channels of every connected player, keyed by player id
#[derive(Debug, Default)]
pub struct ConnectionHub {
    senders: DashMap<PlayerId, mpsc::Sender<ServerMessage>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, player: PlayerId, tx: mpsc::Sender<ServerMessage>) {
        self.senders.insert(player, tx);
    }

    pub fn unregister(&self, player: PlayerId) {
        self.senders.remove(&player);
    }

    #[cfg(test)]
    pub fn is_connected(&self, player: PlayerId) -> bool {
        self.senders.contains_key(&player)
    }

    pub fn connected_count(&self) -> usize {
        self.senders.len()
    }
}

#[async_trait]
impl Notifier for ConnectionHub {
    async fn notify(&self, recipient: PlayerId, message: ServerMessage) {
        // Clone the sender so no map shard is locked across the await
        let Some(tx) = self.senders.get(&recipient).map(|entry| entry.clone()) else {
            tracing::debug!("Dropping message for disconnected player {}", recipient);
            return;
        };

        if tx.send(message).await.is_err() {
            tracing::warn!("Outbound channel closed for player {}", recipient);
        }
    }
}
