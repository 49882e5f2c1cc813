use std::time::Instant;

use uuid::Uuid;

use crate::{
    error::GameError,
    game::WinDetector,
    models::{Board, Mark, Outcome, PlayerId, SessionStatus, BOARD_SIZE},
};

/// Result of an accepted move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Game continues; `next` now owns the turn
    Continue { next: Mark },
    /// Move ended the game
    Finished(Outcome),
}

/// A single match between two players.
///
/// Created waiting for an opponent, moves to `InProgress` once paired, and
/// ends in `Finished`. There is no way back from `Finished`.
#[derive(Debug, Clone)]
pub struct GameSession {
    game_id: Uuid,
    player_x: PlayerId,
    player_o: Option<PlayerId>,
    board: Board,
    turn: Mark,
    status: SessionStatus,
    /// Cell indices in the order they were played
    history: Vec<usize>,
    created_at: Instant,
}

impl GameSession {
    /// Open a new session hosted by `host`, who plays X
    pub fn new(host: PlayerId) -> Self {
        Self {
            game_id: Uuid::new_v4(),
            player_x: host,
            player_o: None,
            board: Board::new(),
            turn: Mark::X,
            status: SessionStatus::WaitingForOpponent,
            history: Vec::with_capacity(BOARD_SIZE),
            created_at: Instant::now(),
        }
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn player_x(&self) -> PlayerId {
        self.player_x
    }

    pub fn player_o(&self) -> Option<PlayerId> {
        self.player_o
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Mark played by `player`, if they take part in this session
    pub fn mark_of(&self, player: PlayerId) -> Option<Mark> {
        if player == self.player_x {
            Some(Mark::X)
        } else if Some(player) == self.player_o {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Player holding `mark`. O is unset until the session is paired.
    pub fn player_for(&self, mark: Mark) -> Option<PlayerId> {
        match mark {
            Mark::X => Some(self.player_x),
            Mark::O => self.player_o,
        }
    }

    /// The other participant, if any
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        self.mark_of(player)
            .and_then(|mark| self.player_for(mark.opponent()))
    }

    /// Player who may move next, only while the game is in progress
    pub fn turn_owner(&self) -> Option<PlayerId> {
        match self.status {
            SessionStatus::InProgress => self.player_for(self.turn),
            _ => None,
        }
    }

    /// Seat `opponent` as O and start the game with X to move
    pub fn pair_with(&mut self, opponent: PlayerId) -> Result<(), GameError> {
        if self.status != SessionStatus::WaitingForOpponent {
            return Err(GameError::AlreadyPaired);
        }

        self.player_o = Some(opponent);
        self.turn = Mark::X;
        self.status = SessionStatus::InProgress;
        Ok(())
    }

    /// Validate and apply a move for `player` at `index`.
    ///
    /// Checks run in order: turn ownership, board bounds, cell occupancy.
    /// A rejected move leaves the session untouched.
    pub fn apply_move(&mut self, player: PlayerId, index: usize) -> Result<MoveOutcome, GameError> {
        match self.status {
            SessionStatus::InProgress => {}
            // Nobody owns a turn until an opponent arrives
            SessionStatus::WaitingForOpponent => return Err(GameError::NotYourTurn),
            SessionStatus::Finished(_) => return Err(GameError::GameOver),
        }

        if self.player_for(self.turn) != Some(player) {
            return Err(GameError::NotYourTurn);
        }
        if index >= BOARD_SIZE {
            return Err(GameError::OutOfRange(index));
        }
        if !self.board.place(index, self.turn) {
            return Err(GameError::CellOccupied(index));
        }
        self.history.push(index);

        match WinDetector::evaluate(&self.board) {
            Some(outcome) => {
                self.status = SessionStatus::Finished(outcome);
                Ok(MoveOutcome::Finished(outcome))
            }
            None => {
                self.turn = self.turn.opponent();
                Ok(MoveOutcome::Continue { next: self.turn })
            }
        }
    }
}
