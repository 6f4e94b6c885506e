//! Self-play training pipeline

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    adapters::MsgPackRepository,
    ports::{Observer, TableRepository},
    q_learning::QLearningAgent,
    tictactoe::{Action, Board, GameOutcome, Player},
    types::{BOARD_SIZE, reward},
};

/// Terminal rewards used during self-play
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    /// Magnitude of the win reward; positive when X wins, negative when O wins
    pub win: f64,
    /// Reward given to every move of a drawn episode
    pub draw: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            win: reward::WIN,
            draw: reward::DRAW,
        }
    }
}

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub episodes: usize,

    /// Save the table every this many episodes (0 saves only at the end)
    pub save_interval: usize,

    /// Where the table is persisted; `None` keeps training in memory
    pub table_path: Option<PathBuf>,

    /// Load an existing table from `table_path` before the first episode
    pub resume: bool,

    pub rewards: Rewards,
}

impl TrainingConfig {
    pub const DEFAULT_EPISODES: usize = 50_000;
    pub const DEFAULT_SAVE_INTERVAL: usize = 1_000;

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_save_interval(mut self, save_interval: usize) -> Self {
        self.save_interval = save_interval;
        self
    }

    pub fn with_table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.table_path = Some(path.into());
        self
    }

    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    pub fn with_rewards(mut self, rewards: Rewards) -> Self {
        self.rewards = rewards;
        self
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: Self::DEFAULT_EPISODES,
            save_interval: Self::DEFAULT_SAVE_INTERVAL,
            table_path: None,
            resume: true,
            rewards: Rewards::default(),
        }
    }
}

/// Record of a single self-play episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeReport {
    /// `None` if the episode was abandoned for lack of a legal action
    pub outcome: Option<GameOutcome>,
    /// Pre-move board and action for every move, in play order
    pub history: Vec<(Board, Action)>,
    pub final_board: Board,
}

impl EpisodeReport {
    pub fn moves(&self) -> usize {
        self.history.len()
    }
}

/// Play one episode of the agent against itself and learn from the result.
///
/// X always opens. On a win the reward (positive for X, negative for O) is
/// propagated from the last move backwards, flipping sign at every step. On a
/// draw every move receives the draw reward in play order.
pub fn play_episode(agent: &mut QLearningAgent, rewards: Rewards) -> Result<EpisodeReport> {
    let mut board = Board::new();
    let mut player = Player::X;
    let mut history: Vec<(Board, Action)> = Vec::with_capacity(BOARD_SIZE);

    loop {
        let Some(action) = agent.choose_action(&board) else {
            log::warn!("no legal action on {}, abandoning episode", board.state_key());
            return Ok(EpisodeReport {
                outcome: None,
                history,
                final_board: board,
            });
        };

        let before = board;
        board.place(action, player)?;
        history.push((before, action));

        if board.has_won(player) {
            let mut reward = match player {
                Player::X => rewards.win,
                Player::O => -rewards.win,
            };
            for (snapshot, mv) in history.iter().rev() {
                agent.update(snapshot, *mv, reward, &board);
                reward = -reward;
            }
            return Ok(EpisodeReport {
                outcome: Some(GameOutcome::Win(player)),
                history,
                final_board: board,
            });
        }

        if board.is_full() {
            for (snapshot, mv) in &history {
                agent.update(snapshot, *mv, rewards.draw, &board);
            }
            return Ok(EpisodeReport {
                outcome: Some(GameOutcome::Draw),
                history,
                final_board: board,
            });
        }

        player = player.opponent();
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    /// Episodes that ended without an outcome
    pub abandoned: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
    /// Mean number of moves per episode
    pub average_moves: f64,
    /// Q-values stored after the run
    pub table_size: usize,
}

impl TrainingResult {
    fn from_tally(tally: &Tally, table_size: usize) -> Self {
        let rate = |count: usize| {
            if tally.episodes > 0 {
                count as f64 / tally.episodes as f64
            } else {
                0.0
            }
        };

        Self {
            total_episodes: tally.episodes,
            x_wins: tally.x_wins,
            o_wins: tally.o_wins,
            draws: tally.draws,
            abandoned: tally.abandoned,
            x_win_rate: rate(tally.x_wins),
            o_win_rate: rate(tally.o_wins),
            draw_rate: rate(tally.draws),
            average_moves: rate(tally.moves),
            table_size,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| crate::Error::Io {
            operation: format!("create file {path:?}"),
            source: e,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| crate::Error::Io {
            operation: format!("open file {path:?}"),
            source: e,
        })?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

#[derive(Debug, Default)]
struct Tally {
    episodes: usize,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    abandoned: usize,
    moves: usize,
}

impl Tally {
    fn record(&mut self, report: &EpisodeReport) {
        self.episodes += 1;
        self.moves += report.moves();
        match report.outcome {
            Some(GameOutcome::Win(Player::X)) => self.x_wins += 1,
            Some(GameOutcome::Win(Player::O)) => self.o_wins += 1,
            Some(GameOutcome::Draw) => self.draws += 1,
            None => self.abandoned += 1,
        }
    }
}

/// Self-play training pipeline
///
/// # Examples
///
/// ```no_run
/// use qtictactoe::pipeline::{ProgressObserver, TrainingConfig, TrainingPipeline};
/// use qtictactoe::q_learning::{AgentConfig, QLearningAgent};
///
/// let mut agent = QLearningAgent::new(AgentConfig::default())?;
/// let config = TrainingConfig::default().with_table_path("q_table.msgpack");
/// let result = TrainingPipeline::new(config)
///     .with_observer(Box::new(ProgressObserver::new()))
///     .run(&mut agent)?;
/// println!("{} draws", result.draws);
/// # Ok::<(), qtictactoe::Error>(())
/// ```
pub struct TrainingPipeline {
    config: TrainingConfig,
    repository: Box<dyn TableRepository>,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a pipeline that persists to MessagePack files
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            repository: Box::new(MsgPackRepository),
            observers: Vec::new(),
        }
    }

    /// Use a different storage backend for checkpoints
    pub fn with_repository(mut self, repository: impl TableRepository + 'static) -> Self {
        self.repository = Box::new(repository);
        self
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run the configured number of self-play episodes
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<TrainingResult> {
        if let (Some(path), true) = (&self.config.table_path, self.config.resume) {
            if agent.load_from(self.repository.as_ref(), path)? {
                log::info!(
                    "resuming from {} ({} Q-values, {} episodes)",
                    path.display(),
                    agent.table_size(),
                    agent.episodes_trained()
                );
            }
        }

        log::info!("beginning self-play training ({} episodes)", self.config.episodes);
        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut tally = Tally::default();
        for episode in 1..=self.config.episodes {
            let report = play_episode(agent, self.config.rewards)?;
            agent.record_episode();
            tally.record(&report);

            for observer in &mut self.observers {
                observer.on_episode_end(episode, report.outcome, report.moves())?;
            }

            if self.config.save_interval > 0 && episode % self.config.save_interval == 0 {
                self.checkpoint(agent, episode)?;
            }
        }

        self.checkpoint(agent, self.config.episodes)?;

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult::from_tally(&tally, agent.table_size());
        log::info!(
            "training complete: X {} / O {} / draw {} ({} Q-values)",
            result.x_wins,
            result.o_wins,
            result.draws,
            result.table_size
        );
        Ok(result)
    }

    fn checkpoint(&mut self, agent: &QLearningAgent, episode: usize) -> Result<()> {
        let Some(path) = &self.config.table_path else {
            return Ok(());
        };

        agent.save_to(self.repository.as_ref(), path)?;
        log::info!(
            "episode {episode}/{}: saved {} Q-values to {}",
            self.config.episodes,
            agent.table_size(),
            path.display()
        );

        for observer in &mut self.observers {
            observer.on_checkpoint(episode, path)?;
        }
        Ok(())
    }
}
