//! Terminal condition checks for Tic-Tac-Toe

use super::{Board, Player};

/// Winning lines as `(row, col)` triples
pub const WINNING_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)], // rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)], // columns
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)], // diagonals
];

/// Check if `player` occupies every cell of any row, column or diagonal.
pub fn check_winner(board: &Board, player: Player) -> bool {
    let target = player.to_cell();
    let cells = board.cells();
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&(row, col)| cells[row][col] == target))
}

/// Check if no empty cell remains.
///
/// A full board with a completed line is a win, so callers check
/// [`check_winner`] first.
pub fn is_draw(board: &Board) -> bool {
    board.cells().iter().flatten().all(|cell| !cell.is_empty())
}
