//! Recoverable game errors reported back to the requesting player.

use thiserror::Error;

/// Errors raised by the registry, the matchmaking queue, or a session.
/// None of them mutate state; they are surfaced to the originating caller only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// Player already holds a registry entry
    #[error("You are already in a game")]
    AlreadyInGame,

    /// Player is already waiting in the matchmaking queue
    #[error("You are already waiting for an opponent")]
    AlreadyQueued,

    /// Session already has a second player
    #[error("This game already has two players")]
    AlreadyPaired,

    /// Nobody is waiting for an opponent
    #[error("No games available, try again later")]
    NoGameAvailable,

    /// Player has no registry entry
    #[error("You are not in a game")]
    NotInGame,

    /// Player does not own the current turn
    #[error("It is not your turn")]
    NotYourTurn,

    /// Cell index outside 0..=8
    #[error("Cell {0} is off the board")]
    OutOfRange(usize),

    /// Cell already holds a mark
    #[error("Cell {0} is already taken")]
    CellOccupied(usize),

    /// Session has already finished
    #[error("The game is over")]
    GameOver,
}

impl GameError {
    /// Stable machine-readable code sent to clients alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            GameError::AlreadyInGame => "already_in_game",
            GameError::AlreadyQueued => "already_queued",
            GameError::AlreadyPaired => "already_paired",
            GameError::NoGameAvailable => "no_game_available",
            GameError::NotInGame => "not_in_game",
            GameError::NotYourTurn => "not_your_turn",
            GameError::OutOfRange(_) => "out_of_range",
            GameError::CellOccupied(_) => "cell_occupied",
            GameError::GameOver => "game_over",
        }
    }
}
