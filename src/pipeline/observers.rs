//! Observer implementations for training runs

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{GameOutcome, Player},
};

/// Running outcome counts shared by the observers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl OutcomeCounts {
    fn record(&mut self, outcome: Option<GameOutcome>) {
        match outcome {
            Some(GameOutcome::Win(Player::X)) => self.x_wins += 1,
            Some(GameOutcome::Win(Player::O)) => self.o_wins += 1,
            Some(GameOutcome::Draw) => self.draws += 1,
            None => {}
        }
    }

    fn summary(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    counts: OutcomeCounts,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            counts: OutcomeCounts::default(),
        }
    }

    pub fn counts(&self) -> OutcomeCounts {
        self.counts
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: Option<GameOutcome>,
        _moves: usize,
    ) -> Result<()> {
        self.counts.record(outcome);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64);
            if episode % 100 == 0 {
                pb.set_message(self.counts.summary());
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.counts.summary());
        }
        Ok(())
    }
}

/// Log observer - Reports progress through the `log` facade
///
/// Used in place of the progress bar when output is not interactive.
pub struct LogObserver {
    interval: usize,
    total_episodes: usize,
    counts: OutcomeCounts,
}

impl LogObserver {
    /// Log a summary line every `interval` episodes (0 disables periodic lines)
    pub fn new(interval: usize) -> Self {
        Self {
            interval,
            total_episodes: 0,
            counts: OutcomeCounts::default(),
        }
    }

    pub fn counts(&self) -> OutcomeCounts {
        self.counts
    }
}

impl Observer for LogObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.total_episodes = total_episodes;
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        outcome: Option<GameOutcome>,
        _moves: usize,
    ) -> Result<()> {
        self.counts.record(outcome);
        if self.interval > 0 && episode % self.interval == 0 {
            log::info!(
                "episode {episode}/{} {}",
                self.total_episodes,
                self.counts.summary()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_observer_counts_outcomes() {
        let mut observer = ProgressObserver::new();
        observer.on_training_start(4).unwrap();
        observer
            .on_episode_end(1, Some(GameOutcome::Win(Player::X)), 5)
            .unwrap();
        observer
            .on_episode_end(2, Some(GameOutcome::Win(Player::O)), 6)
            .unwrap();
        observer.on_episode_end(3, Some(GameOutcome::Draw), 9).unwrap();
        observer.on_episode_end(4, None, 9).unwrap();
        observer.on_training_end().unwrap();

        assert_eq!(
            observer.counts(),
            OutcomeCounts {
                x_wins: 1,
                o_wins: 1,
                draws: 1
            }
        );
    }

    #[test]
    fn test_log_observer_counts_outcomes() {
        let mut observer = LogObserver::new(2);
        observer.on_training_start(3).unwrap();
        for (episode, outcome) in [
            Some(GameOutcome::Draw),
            Some(GameOutcome::Draw),
            Some(GameOutcome::Win(Player::X)),
        ]
        .into_iter()
        .enumerate()
        {
            observer.on_episode_end(episode + 1, outcome, 9).unwrap();
        }

        assert_eq!(observer.counts().draws, 2);
        assert_eq!(observer.counts().x_wins, 1);
        assert_eq!(OutcomeCounts::default().summary(), "X:0 O:0 D:0");
    }
}
