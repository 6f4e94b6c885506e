//! Newtype wrappers and shared constants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const BOARD_DIM: usize = 3;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = BOARD_DIM * BOARD_DIM;

/// Placeholder symbol for an empty cell in a state key.
pub const EMPTY_SYMBOL: char = '_';

/// Default rewards used by the self-play trainer.
pub mod reward {
    /// Magnitude of the terminal reward for a won episode.
    pub const WIN: f64 = 1.0;

    /// Reward applied to every move of a drawn episode.
    pub const DRAW: f64 = 0.5;
}

/// A board encoding used to index the value table.
///
/// Nine symbols in row-major order, one per cell: `X`, `O`, or `_` for empty.
/// Two boards with the same cell contents always produce the same key.
///
/// # Examples
///
/// ```
/// use qtictactoe::tictactoe::Board;
/// use qtictactoe::types::StateKey;
///
/// let key = Board::new().state_key();
/// assert_eq!(key.as_str(), "_________");
///
/// let parsed = StateKey::parse("X___O____").unwrap();
/// assert_eq!(parsed.as_str().len(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    /// Parse and validate a state key from a string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidStateKey`] if the string is not exactly
    /// nine symbols drawn from `X`, `O` and `_`.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let len = s.chars().count();
        if len != BOARD_SIZE {
            return Err(crate::Error::InvalidStateKey {
                key: s.to_string(),
                reason: format!("expected {BOARD_SIZE} symbols, got {len}"),
            });
        }
        if let Some((position, symbol)) = s
            .chars()
            .enumerate()
            .find(|&(_, c)| !matches!(c, 'X' | 'O' | EMPTY_SYMBOL))
        {
            return Err(crate::Error::InvalidStateKey {
                key: s.to_string(),
                reason: format!("invalid symbol '{symbol}' at position {position}"),
            });
        }
        Ok(StateKey(s.to_string()))
    }

    /// Build a key from symbols already known to be valid.
    pub(crate) fn from_symbols<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        StateKey(symbols.into_iter().collect())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
