use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::GameError,
    game::{GameEvent, GameView},
    models::{Board, Mark, Outcome, PlayerId},
};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    CreateGame,
    FindGame,
    MakeMove { cell: usize },
    GetState,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// First message on every connection
    Welcome {
        player_id: PlayerId,
    },
    GameCreated {
        game_id: Uuid,
    },
    /// Sent to the waiting host when a guest arrives
    OpponentJoined {
        game_id: Uuid,
        opponent: PlayerId,
        mark: Mark,
    },
    /// Sent to the guest after pairing
    GameJoined {
        game_id: Uuid,
        opponent: PlayerId,
        mark: Mark,
    },
    /// `seq` counts the moves on `board`; clients ignore anything older
    /// than the last board-carrying message they applied
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
    GameState {
        game: GameView,
    },
    Error {
        code: String,
        message: String,
    },
}

impl From<GameEvent> for ServerMessage {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Created { game_id } => ServerMessage::GameCreated { game_id },
            GameEvent::OpponentJoined {
                game_id,
                opponent,
                mark,
            } => ServerMessage::OpponentJoined {
                game_id,
                opponent,
                mark,
            },
            GameEvent::Joined {
                game_id,
                opponent,
                mark,
            } => ServerMessage::GameJoined {
                game_id,
                opponent,
                mark,
            },
            GameEvent::YourTurn {
                board,
                last_move,
                seq,
            } => ServerMessage::YourTurn {
                board,
                last_move,
                seq,
            },
            GameEvent::WaitForTurn { board, seq } => ServerMessage::WaitForTurn { board, seq },
            GameEvent::GameOver {
                game_id,
                outcome,
                winner,
                board,
                seq,
            } => ServerMessage::GameOver {
                game_id,
                outcome,
                winner,
                board,
                seq,
            },
            GameEvent::State(game) => ServerMessage::GameState { game },
        }
    }
}

impl From<GameError> for ServerMessage {
    fn from(e: GameError) -> Self {
        ServerMessage::Error {
            code: e.code().to_string(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_client_messages() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"make_move","cell":4}"#).unwrap();
        assert!(matches!(msg, ClientMessage::MakeMove { cell: 4 }));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"find_game"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::FindGame));
    }

    #[test]
    fn test_negative_cell_is_a_parse_error() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"make_move","cell":-1}"#).is_err());
    }

    #[test]
    fn test_turn_event_serializes_with_seq() {
        let message = ServerMessage::from(GameEvent::WaitForTurn {
            board: Board::new(),
            seq: 4,
        });
        let json = serde_json::to_value(message).unwrap();
        assert_eq!(json["type"], "wait_for_turn");
        assert_eq!(json["seq"], 4);
        assert_eq!(json["board"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn test_error_message_from_game_error() {
        let json = serde_json::to_value(ServerMessage::from(GameError::CellOccupied(3))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "error",
                "code": "cell_occupied",
                "message": "Cell 3 is already taken"
            })
        );
    }
}
