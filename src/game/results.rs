//! Registry operation results and the notifications they imply.
//!
//! Registry calls never deliver anything themselves. They return one of these
//! values, and the caller turns it into [`Notification`]s once the registry
//! lock has been released.
//!
//! Deliveries from different callers are not ordered with respect to each
//! other, so every board-carrying event has a `seq`: the number of moves
//! played in the session when it was produced. A client keeps the event with
//! the highest `seq` and drops anything older.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Board, Mark, Outcome, PlayerId, SessionStatus};

/// Something a player needs to hear about, independent of transport
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Created {
        game_id: Uuid,
    },
    /// The waiting host got an opponent
    OpponentJoined {
        game_id: Uuid,
        opponent: PlayerId,
        mark: Mark,
    },
    /// The guest was seated in a waiting session
    Joined {
        game_id: Uuid,
        opponent: PlayerId,
        mark: Mark,
    },
    YourTurn {
        board: Board,
        last_move: Option<usize>,
        seq: usize,
    },
    WaitForTurn {
        board: Board,
        seq: usize,
    },
    GameOver {
        game_id: Uuid,
        outcome: Outcome,
        winner: Option<PlayerId>,
        board: Board,
        seq: usize,
    },
    State(GameView),
}

impl GameEvent {
    /// Move counter of board-carrying events
    pub fn seq(&self) -> Option<usize> {
        match self {
            GameEvent::YourTurn { seq, .. }
            | GameEvent::WaitForTurn { seq, .. }
            | GameEvent::GameOver { seq, .. } => Some(*seq),
            _ => None,
        }
    }
}

/// An event addressed to one player
#[derive(Debug, Clone)]
pub struct Notification {
    pub recipient: PlayerId,
    pub event: GameEvent,
}

impl Notification {
    pub fn new(recipient: PlayerId, event: GameEvent) -> Self {
        Self { recipient, event }
    }
}

/// A new session is waiting for an opponent
#[derive(Debug, Clone)]
pub struct Created {
    pub game_id: Uuid,
    pub host: PlayerId,
}

impl Created {
    pub fn notifications(&self) -> Vec<Notification> {
        vec![Notification::new(
            self.host,
            GameEvent::Created {
                game_id: self.game_id,
            },
        )]
    }
}

/// A waiting host was matched with a newly arrived guest
#[derive(Debug, Clone)]
pub struct Pairing {
    pub game_id: Uuid,
    /// Waited in the queue, plays X and moves first
    pub host: PlayerId,
    /// Arrived via find, plays O
    pub guest: PlayerId,
    pub board: Board,
}

impl Pairing {
    /// Host hears that someone joined and that it is their turn;
    /// guest is told to wait.
    pub fn notifications(&self) -> Vec<Notification> {
        vec![
            Notification::new(
                self.host,
                GameEvent::OpponentJoined {
                    game_id: self.game_id,
                    opponent: self.guest,
                    mark: Mark::X,
                },
            ),
            Notification::new(
                self.host,
                GameEvent::YourTurn {
                    board: self.board.clone(),
                    last_move: None,
                    seq: 0,
                },
            ),
            Notification::new(
                self.guest,
                GameEvent::Joined {
                    game_id: self.game_id,
                    opponent: self.host,
                    mark: Mark::O,
                },
            ),
            Notification::new(
                self.guest,
                GameEvent::WaitForTurn {
                    board: self.board.clone(),
                    seq: 0,
                },
            ),
        ]
    }
}

/// Result of an accepted move
#[derive(Debug, Clone, PartialEq)]
pub enum MoveResult {
    /// Game continues with `opponent` to move
    Accepted {
        game_id: Uuid,
        mover: PlayerId,
        opponent: PlayerId,
        index: usize,
        next: Mark,
        board: Board,
        /// Moves played, this one included
        seq: usize,
    },
    /// Game is over and both players have left the registry
    Finished {
        game_id: Uuid,
        players: [PlayerId; 2],
        outcome: Outcome,
        winner: Option<PlayerId>,
        board: Board,
        seq: usize,
    },
}

impl MoveResult {
    pub fn notifications(&self) -> Vec<Notification> {
        match self {
            MoveResult::Accepted {
                mover,
                opponent,
                index,
                board,
                seq,
                ..
            } => vec![
                Notification::new(
                    *opponent,
                    GameEvent::YourTurn {
                        board: board.clone(),
                        last_move: Some(*index),
                        seq: *seq,
                    },
                ),
                Notification::new(
                    *mover,
                    GameEvent::WaitForTurn {
                        board: board.clone(),
                        seq: *seq,
                    },
                ),
            ],
            MoveResult::Finished {
                game_id,
                players,
                outcome,
                winner,
                board,
                seq,
            } => players
                .iter()
                .map(|&player| {
                    Notification::new(
                        player,
                        GameEvent::GameOver {
                            game_id: *game_id,
                            outcome: *outcome,
                            winner: *winner,
                            board: board.clone(),
                            seq: *seq,
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Read-only snapshot of a session from one participant's seat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub game_id: Uuid,
    pub mark: Mark,
    pub opponent: Option<PlayerId>,
    pub board: Board,
    pub turn: Mark,
    pub status: SessionStatus,
    pub your_turn: bool,
    /// Cells played so far, in order
    pub moves: Vec<usize>,
}

/// Counts exposed on the stats endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub waiting_players: usize,
    pub active_games: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_notifies_host_first() {
        let pairing = Pairing {
            game_id: Uuid::new_v4(),
            host: PlayerId(1),
            guest: PlayerId(2),
            board: Board::new(),
        };

        let notes = pairing.notifications();
        let recipients: Vec<_> = notes.iter().map(|n| n.recipient).collect();
        assert_eq!(
            recipients,
            vec![PlayerId(1), PlayerId(1), PlayerId(2), PlayerId(2)]
        );
        assert!(matches!(
            notes[1].event,
            GameEvent::YourTurn {
                last_move: None,
                seq: 0,
                ..
            }
        ));
        assert!(matches!(notes[3].event, GameEvent::WaitForTurn { seq: 0, .. }));
    }

    #[test]
    fn test_finished_notifies_both_players() {
        let result = MoveResult::Finished {
            game_id: Uuid::new_v4(),
            players: [PlayerId(1), PlayerId(2)],
            outcome: Outcome::Draw,
            winner: None,
            board: Board::new(),
            seq: 9,
        };

        let notes = result.notifications();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| matches!(
            n.event,
            GameEvent::GameOver {
                outcome: Outcome::Draw,
                winner: None,
                seq: 9,
                ..
            }
        )));
    }

    #[test]
    fn test_accepted_move_carries_seq_to_both_players() {
        let result = MoveResult::Accepted {
            game_id: Uuid::new_v4(),
            mover: PlayerId(1),
            opponent: PlayerId(2),
            index: 4,
            next: Mark::O,
            board: Board::new(),
            seq: 3,
        };

        let notes = result.notifications();
        assert_eq!(notes[0].recipient, PlayerId(2));
        assert_eq!(notes[1].recipient, PlayerId(1));
        assert!(notes.iter().all(|n| n.event.seq() == Some(3)));
        assert_eq!(
            Notification::new(PlayerId(1), GameEvent::Created { game_id: Uuid::nil() })
                .event
                .seq(),
            None
        );
    }
}
