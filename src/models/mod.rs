pub mod game;

pub use game::{Board, Cell, Mark, Outcome, PlayerId, SessionStatus, BOARD_SIZE};
