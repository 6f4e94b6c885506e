//! Q-learning agent
//!
//! Tabular off-policy TD control with ε-greedy action selection. Both players
//! of a self-play game share one agent and therefore one table.

use std::path::Path;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Result,
    adapters::MsgPackRepository,
    ports::TableRepository,
    q_learning::{AgentConfig, QTable, SavedQTable, TrainingMetadata, config::validate_epsilon},
    tictactoe::{Action, Board},
    types::StateKey,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Owns the value table and the single random source used for exploration
/// and tie-breaking, so a seeded agent is fully reproducible.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    config: AgentConfig,
    rng: StdRng,
    episodes_trained: usize,
}

impl QLearningAgent {
    /// Create an agent with an empty table
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if a hyperparameter is
    /// out of range.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            q_table: QTable::new(),
            config,
            rng: build_rng(config.seed),
            episodes_trained: 0,
        })
    }

    /// Replace the agent's table.
    pub fn with_table(mut self, q_table: QTable) -> Self {
        self.q_table = q_table;
        self
    }

    /// Encode a board as a table index.
    pub fn state_key(board: &Board) -> StateKey {
        board.state_key()
    }

    /// All empty coordinates of `board`.
    pub fn legal_moves(board: &Board) -> Vec<Action> {
        board.legal_moves()
    }

    /// ε-greedy action selection
    ///
    /// Returns `None` when the board has no empty cell. Ties among the best
    /// moves are broken uniformly at random.
    pub fn choose_action(&mut self, board: &Board) -> Option<Action> {
        let legal_moves = Self::legal_moves(board);
        if legal_moves.is_empty() {
            return None;
        }

        if self.rng.random::<f64>() < self.config.epsilon {
            // Explore: random action
            return legal_moves.choose(&mut self.rng).copied();
        }

        let state = Self::state_key(board);
        let best = self.q_table.best_actions(&state, &legal_moves);
        best.choose(&mut self.rng).copied()
    }

    /// Q-learning update
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The max term is 0.0 when `new_board` has no legal moves. Returns the
    /// stored value.
    pub fn update(
        &mut self,
        old_board: &Board,
        action: Action,
        reward: f64,
        new_board: &Board,
    ) -> f64 {
        let state = Self::state_key(old_board);
        let next_state = Self::state_key(new_board);

        let max_next_q = self.q_table.max_q(&next_state, &Self::legal_moves(new_board));
        let current_q = self.q_table.get(&state, action);
        let td_target = reward + self.config.discount_factor * max_next_q;
        let new_q = current_q + self.config.learning_rate * (td_target - current_q);

        self.q_table.set(&state, action, new_q);
        new_q
    }

    /// Current estimate for `action` on `board`.
    pub fn q_value(&self, board: &Board, action: Action) -> f64 {
        self.q_table.get(&Self::state_key(board), action)
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn table_size(&self) -> usize {
        self.q_table.size()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Change the exploration rate, e.g. to play greedily after training.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `epsilon` is outside [0, 1].
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        validate_epsilon(epsilon)?;
        self.config.epsilon = epsilon;
        Ok(())
    }

    pub fn episodes_trained(&self) -> usize {
        self.episodes_trained
    }

    pub(crate) fn record_episode(&mut self) {
        self.episodes_trained += 1;
    }

    /// Snapshot of the table and its training metadata.
    pub fn snapshot(&self) -> SavedQTable {
        SavedQTable::new(
            self.q_table.clone(),
            TrainingMetadata {
                episodes_trained: self.episodes_trained,
                config: Some(self.config),
            },
        )
    }

    /// Save the table through `repo`.
    pub fn save_to<R: TableRepository + ?Sized>(&self, repo: &R, path: &Path) -> Result<()> {
        repo.save(&self.snapshot(), path)
    }

    /// Replace the table with the snapshot at `path`.
    ///
    /// A missing snapshot leaves the agent with an empty table. Returns whether
    /// a snapshot was found.
    pub fn load_from<R: TableRepository + ?Sized>(
        &mut self,
        repo: &R,
        path: &Path,
    ) -> Result<bool> {
        match repo.load(path)? {
            Some(snapshot) => {
                let (q_table, metadata) = snapshot.into_parts()?;
                log::debug!(
                    "loaded {} Q-values ({} episodes) from {}",
                    q_table.size(),
                    metadata.episodes_trained,
                    path.display()
                );
                self.q_table = q_table;
                self.episodes_trained = metadata.episodes_trained;
                Ok(true)
            }
            None => {
                log::debug!("no Q-table at {}, starting empty", path.display());
                self.q_table.clear();
                self.episodes_trained = 0;
                Ok(false)
            }
        }
    }

    /// Save the table as a MessagePack file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_to(&MsgPackRepository, path.as_ref())
    }

    /// Load the table from a MessagePack file; a missing file yields an empty table.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<bool> {
        self.load_from(&MsgPackRepository, path.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tempfile::TempDir;

    use super::*;
    use crate::tictactoe::{Cell, Player};

    fn agent(epsilon: f64, seed: u64) -> QLearningAgent {
        QLearningAgent::new(AgentConfig::default().with_epsilon(epsilon).with_seed(seed)).unwrap()
    }

    fn action(row: usize, col: usize) -> Action {
        Action::new(row, col).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = QLearningAgent::new(AgentConfig::default().with_learning_rate(0.0));
        assert!(matches!(result, Err(crate::Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_state_key_and_legal_moves() {
        let mut board = Board::new();
        board.place(action(0, 0), Player::X).unwrap();
        board.place(action(1, 1), Player::O).unwrap();

        assert_eq!(QLearningAgent::state_key(&board).as_str(), "X___O____");
        let moves = QLearningAgent::legal_moves(&board);
        assert_eq!(moves.len(), 7);
        assert_eq!(moves[0], action(0, 1));
        assert!(!moves.contains(&action(1, 1)));
    }

    #[test]
    fn test_choose_action_none_on_full_board() {
        let mut agent = agent(0.5, 1);
        let board = Board::from_cells([
            [Cell::X, Cell::O, Cell::X],
            [Cell::X, Cell::O, Cell::O],
            [Cell::O, Cell::X, Cell::X],
        ]);
        assert_eq!(agent.choose_action(&board), None);
    }

    #[test]
    fn test_choose_action_only_picks_empty_cells() {
        let mut agent = agent(0.5, 7);
        for _ in 0..200 {
            let mut board = Board::new();
            let mut player = Player::X;
            while board.outcome().is_none() {
                let chosen = agent.choose_action(&board).expect("board has empty cells");
                assert!(board.is_empty_at(chosen), "{chosen} is occupied");
                board.place(chosen, player).unwrap();
                player = player.opponent();
            }
        }
    }

    #[test]
    fn test_greedy_picks_highest_value() {
        let mut agent = agent(0.0, 3);
        let board = Board::new();
        let state = board.state_key();
        let mut table = QTable::new();
        table.set(&state, action(2, 0), 0.9);
        table.set(&state, action(1, 1), 0.4);
        let mut agent_with_table = agent.clone().with_table(table);

        for _ in 0..20 {
            assert_eq!(agent_with_table.choose_action(&board), Some(action(2, 0)));
        }
        // Empty table: every move ties at zero
        assert!(agent.choose_action(&board).is_some());
    }

    #[test]
    fn test_ties_are_broken_randomly() {
        let mut agent = agent(0.0, 11);
        let board = Board::new();
        let chosen: HashSet<Action> = (0..500)
            .filter_map(|_| agent.choose_action(&board))
            .collect();
        assert_eq!(chosen.len(), 9);
    }

    #[test]
    fn test_seeded_agents_are_reproducible() {
        let mut a = agent(0.3, 99);
        let mut b = agent(0.3, 99);
        let board = Board::new();
        for _ in 0..50 {
            assert_eq!(a.choose_action(&board), b.choose_action(&board));
        }
    }

    #[test]
    fn test_update_uses_max_future_value() {
        let mut agent = QLearningAgent::new(
            AgentConfig::default()
                .with_learning_rate(0.5)
                .with_discount_factor(0.9)
                .with_seed(0),
        )
        .unwrap();

        let old_board = Board::new();
        let mut new_board = old_board;
        new_board.place(action(1, 1), Player::X).unwrap();

        let mut table = QTable::new();
        table.set(&new_board.state_key(), action(0, 0), 1.0);
        table.set(&new_board.state_key(), action(0, 1), -2.0);
        let mut agent_with_table = agent.clone().with_table(table);

        // 0 + 0.5 * (0 + 0.9 * 1.0 - 0) = 0.45
        let updated = agent_with_table.update(&old_board, action(1, 1), 0.0, &new_board);
        assert!((updated - 0.45).abs() < 1e-12);
        assert_eq!(agent_with_table.q_value(&old_board, action(1, 1)), updated);

        // Without stored values the future term is 0
        let updated = agent.update(&old_board, action(1, 1), 1.0, &new_board);
        assert!((updated - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_update_on_terminal_board_ignores_future() {
        let mut agent = agent(0.0, 0);
        let full = Board::from_cells([
            [Cell::X, Cell::O, Cell::X],
            [Cell::X, Cell::O, Cell::O],
            [Cell::O, Cell::X, Cell::Empty],
        ]);
        let mut after = full;
        after.place(action(2, 2), Player::X).unwrap();

        let updated = agent.update(&full, action(2, 2), 0.5, &after);
        assert!((updated - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_repeated_update_moves_toward_target() {
        let mut agent = agent(0.0, 0);
        let board = Board::new();
        let mut after = board;
        after.place(action(0, 0), Player::X).unwrap();

        // Future value is 0 so the target is the reward itself
        let target = 1.0;
        let mut previous_gap = (target - agent.q_value(&board, action(0, 0))).abs();
        for _ in 0..25 {
            let value = agent.update(&board, action(0, 0), target, &after);
            let gap = (target - value).abs();
            assert!(gap < previous_gap);
            assert!(value < target);
            previous_gap = gap;
        }
    }

    #[test]
    fn test_scripted_win_raises_final_action() {
        let mut agent = agent(0.0, 0);
        // X: (0,0) (0,1) (0,2); O: (1,0) (1,1)
        let script = [
            (action(0, 0), Player::X),
            (action(1, 0), Player::O),
            (action(0, 1), Player::X),
            (action(1, 1), Player::O),
            (action(0, 2), Player::X),
        ];
        let mut board = Board::new();
        let mut history = Vec::new();
        for (mv, player) in script {
            history.push((board, mv));
            board.place(mv, player).unwrap();
        }
        assert!(board.has_won(Player::X));

        let mut reward = 1.0;
        for (snapshot, mv) in history.iter().rev() {
            agent.update(snapshot, *mv, reward, &board);
            reward = -reward;
        }

        let (last_board, last_move) = history[history.len() - 1];
        assert!(agent.q_value(&last_board, last_move) > 0.0);
        for alternative in last_board.legal_moves() {
            if alternative != last_move {
                assert_eq!(agent.q_value(&last_board, alternative), 0.0);
            }
        }
        // O's final move was punished
        let (o_board, o_move) = history[history.len() - 2];
        assert!(agent.q_value(&o_board, o_move) < 0.0);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("q_table.msgpack");

        let mut trained = agent(0.2, 5);
        let board = Board::new();
        let mut after = board;
        after.place(action(1, 1), Player::X).unwrap();
        trained.update(&board, action(1, 1), 0.3, &after);
        trained.update(&after, action(0, 0), -0.7, &after);
        trained.record_episode();
        trained.save(&path).unwrap();

        let mut fresh = agent(0.2, 6);
        assert!(fresh.load(&path).unwrap());
        assert_eq!(fresh.q_table(), trained.q_table());
        assert_eq!(fresh.episodes_trained(), 1);
    }

    #[test]
    fn test_load_missing_file_yields_empty_table() {
        let temp_dir = TempDir::new().unwrap();
        let mut agent = agent(0.2, 5);
        let board = Board::new();
        agent.update(&board, action(0, 0), 1.0, &board);

        let found = agent.load(temp_dir.path().join("absent.msgpack")).unwrap();
        assert!(!found);
        assert_eq!(agent.table_size(), 0);
    }

    #[test]
    fn test_set_epsilon_validates() {
        let mut agent = agent(0.2, 0);
        agent.set_epsilon(0.0).unwrap();
        assert_eq!(agent.config().epsilon, 0.0);
        assert!(agent.set_epsilon(2.0).is_err());
        assert_eq!(agent.config().epsilon, 0.0);
    }
}
