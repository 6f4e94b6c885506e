//! Observer port - abstraction for monitoring self-play training
//!
//! Observers receive training events without the trainer knowing how they are
//! displayed or recorded.

use std::path::Path;

use crate::{Result, tictactoe::GameOutcome};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode: `on_episode_end(episode, outcome, moves)`, followed by
///    `on_checkpoint(episode, path)` whenever the table is saved
/// 3. `on_training_end()` - Once at the end
///
/// Every method defaults to doing nothing.
///
/// # Examples
///
/// ```
/// use qtictactoe::{ports::Observer, tictactoe::GameOutcome};
///
/// struct DrawCounter {
///     draws: usize,
/// }
///
/// impl Observer for DrawCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         outcome: Option<GameOutcome>,
///         _moves: usize,
///     ) -> qtictactoe::Result<()> {
///         if outcome == Some(GameOutcome::Draw) {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode (1-based).
    ///
    /// `outcome` is `None` when the episode was abandoned because no action
    /// was available.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _outcome: Option<GameOutcome>,
        _moves: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after the table has been written to `path`.
    fn on_checkpoint(&mut self, _episode: usize, _path: &Path) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode and final save.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
