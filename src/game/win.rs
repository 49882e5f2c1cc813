use crate::models::{Board, Cell, Outcome};

/// Rows, columns, then diagonals. Scan order matters only for malformed
/// boards where both marks complete a line.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub struct WinDetector;

impl WinDetector {
    /// Evaluate a board.
    ///
    /// Returns `Some(Outcome::Win(mark))` for the first completed line,
    /// `Some(Outcome::Draw)` when the board is full with no line, and `None`
    /// while the game can still continue.
    pub fn evaluate(board: &Board) -> Option<Outcome> {
        let cells = board.cells();

        for [a, b, c] in LINES {
            if let Cell::Marked(mark) = cells[a] {
                if cells[b] == cells[a] && cells[c] == cells[a] {
                    return Some(Outcome::Win(mark));
                }
            }
        }

        if board.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}
