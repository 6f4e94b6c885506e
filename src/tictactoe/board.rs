//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines;
use crate::types::{BOARD_DIM, EMPTY_SYMBOL, StateKey};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// Symbol used in state keys (`_` for empty).
    pub fn to_key_char(self) -> char {
        match self {
            Cell::Empty => EMPTY_SYMBOL,
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Symbol used when rendering the board (space for empty).
    pub fn to_display_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A player in the game, identified by the mark it places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A `(row, col)` coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    /// Create a new action, validating it's within board bounds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidCoordinate`] if either index is >= 3.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < BOARD_DIM && col < BOARD_DIM {
            Ok(Action { row, col })
        } else {
            Err(crate::Error::InvalidCoordinate { row, col })
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A 3x3 grid of cells.
///
/// The board does not track whose turn it is; the drivers alternate players
/// themselves. It is `Copy`, so pre-move snapshots are plain assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_DIM]; BOARD_DIM],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from explicit rows.
    pub fn from_cells(cells: [[Cell; BOARD_DIM]; BOARD_DIM]) -> Self {
        Board { cells }
    }

    /// Create a board from a state key.
    pub fn from_key(key: &StateKey) -> Self {
        let mut board = Board::new();
        for (i, symbol) in key.as_str().chars().enumerate() {
            board.cells[i / BOARD_DIM][i % BOARD_DIM] = match symbol {
                'X' => Cell::X,
                'O' => Cell::O,
                _ => Cell::Empty,
            };
        }
        board
    }

    pub fn cells(&self) -> &[[Cell; BOARD_DIM]; BOARD_DIM] {
        &self.cells
    }

    /// Get the cell at an action's coordinate
    pub fn get(&self, action: Action) -> Cell {
        self.cells[action.row][action.col]
    }

    /// Check whether the cell at `action` is empty.
    pub fn is_empty_at(&self, action: Action) -> bool {
        self.get(action).is_empty()
    }

    /// Place `player`'s mark at `action`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CellOccupied`] if the cell already holds a mark;
    /// the board is left unchanged.
    pub fn place(&mut self, action: Action, player: Player) -> Result<(), crate::Error> {
        if !self.is_empty_at(action) {
            return Err(crate::Error::CellOccupied {
                row: action.row,
                col: action.col,
            });
        }
        self.cells[action.row][action.col] = player.to_cell();
        Ok(())
    }

    /// All empty coordinates in row-major order.
    pub fn legal_moves(&self) -> Vec<Action> {
        (0..BOARD_DIM)
            .flat_map(|row| (0..BOARD_DIM).map(move |col| Action { row, col }))
            .filter(|&action| self.is_empty_at(action))
            .collect()
    }

    /// Encode the board as a state key.
    pub fn state_key(&self) -> StateKey {
        StateKey::from_symbols(self.cells.iter().flatten().map(|c| c.to_key_char()))
    }

    /// Number of marks on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| !c.is_empty()).count()
    }

    /// Check whether `player` holds a full line
    pub fn has_won(&self, player: Player) -> bool {
        lines::check_winner(self, player)
    }

    /// The player holding a full line, if any.
    pub fn winner(&self) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&player| self.has_won(player))
    }

    /// Check whether every cell is filled (win state is not considered).
    pub fn is_full(&self) -> bool {
        lines::is_draw(self)
    }

    /// Terminal outcome of the position; a win takes precedence over a full board.
    pub fn outcome(&self) -> Option<super::GameOutcome> {
        if let Some(winner) = self.winner() {
            Some(super::GameOutcome::Win(winner))
        } else if self.is_full() {
            Some(super::GameOutcome::Draw)
        } else {
            None
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let rendered: Vec<String> = row
                .iter()
                .map(|c| c.to_display_char().to_string())
                .collect();
            writeln!(f, "{}", rendered.join(" | "))?;
            writeln!(f, "{}", "-".repeat(9))?;
        }
        Ok(())
    }
}
