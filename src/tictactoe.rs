//! Tic-Tac-Toe board logic

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Action, Board, Cell, Player};
pub use game::GameOutcome;
pub use lines::{WINNING_LINES, check_winner, is_draw};
