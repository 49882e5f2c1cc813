use std::collections::VecDeque;

use crate::{error::GameError, models::PlayerId};

/// FIFO of players waiting for an opponent. The longest-waiting player is
/// always matched first.
#[derive(Debug, Default)]
pub struct MatchmakingQueue {
    waiting: VecDeque<PlayerId>,
}

impl MatchmakingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, player: PlayerId) -> Result<(), GameError> {
        if self.contains(player) {
            return Err(GameError::AlreadyQueued);
        }
        self.waiting.push_back(player);
        Ok(())
    }

    pub fn dequeue(&mut self) -> Option<PlayerId> {
        self.waiting.pop_front()
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.waiting.contains(&player)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dequeue_in_enqueue_order() {
        let mut queue = MatchmakingQueue::new();
        for id in [3, 1, 2] {
            queue.enqueue(PlayerId(id)).unwrap();
        }

        assert_eq!(queue.dequeue(), Some(PlayerId(3)));
        assert_eq!(queue.dequeue(), Some(PlayerId(1)));
        assert_eq!(queue.dequeue(), Some(PlayerId(2)));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_duplicate_enqueue_rejected() {
        let mut queue = MatchmakingQueue::new();
        queue.enqueue(PlayerId(7)).unwrap();

        assert_eq!(queue.enqueue(PlayerId(7)), Err(GameError::AlreadyQueued));
        assert_eq!(queue.len(), 1);
        assert!(queue.contains(PlayerId(7)));
    }

    #[test]
    fn test_player_can_requeue_after_dequeue() {
        let mut queue = MatchmakingQueue::new();
        queue.enqueue(PlayerId(1)).unwrap();
        queue.dequeue();

        assert!(!queue.contains(PlayerId(1)));
        assert!(queue.enqueue(PlayerId(1)).is_ok());
    }

    #[test]
    fn test_concurrent_enqueue_dequeue_preserves_order() {
        // Each producer enqueues its own increasing sequence; whatever the
        // interleaving, every producer's players must come out in order.
        let queue = Arc::new(Mutex::new(MatchmakingQueue::new()));
        let producers: Vec<_> = (0..4u64)
            .map(|producer| {
                let queue = Arc::clone(&queue);
                std::thread::spawn(move || {
                    for seq in 0..250u64 {
                        queue
                            .lock()
                            .unwrap()
                            .enqueue(PlayerId(producer * 1_000 + seq))
                            .unwrap();
                    }
                })
            })
            .collect();

        let consumer = {
            let queue = Arc::clone(&queue);
            std::thread::spawn(move || {
                let mut seen = Vec::new();
                while seen.len() < 1_000 {
                    if let Some(player) = queue.lock().unwrap().dequeue() {
                        seen.push(player);
                    } else {
                        std::thread::yield_now();
                    }
                }
                seen
            })
        };

        for producer in producers {
            producer.join().unwrap();
        }
        let seen = consumer.join().unwrap();

        for producer in 0..4u64 {
            let sequence: Vec<u64> = seen
                .iter()
                .filter(|player| player.0 / 1_000 == producer)
                .map(|player| player.0 % 1_000)
                .collect();
            assert_eq!(sequence, (0..250).collect::<Vec<_>>());
        }
    }
}
