//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{tictactoe::Action, types::StateKey};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Unseen pairs read as 0.0. Entries are only created by [`QTable::set`], so
/// the table grows with the state-action space actually visited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    /// Q-values: (state_key, action) -> Q-value
    q_values: HashMap<(String, Action), f64>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get Q-value for a state-action pair, defaulting to 0.0
    pub fn get(&self, state: &StateKey, action: Action) -> f64 {
        self.q_values
            .get(&(state.as_str().to_string(), action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: &StateKey, action: Action, value: f64) {
        self.q_values.insert((state.as_str().to_string(), action), value);
    }

    /// Get maximum Q-value over legal actions, or 0.0 when there are none
    pub fn max_q(&self, state: &StateKey, legal_actions: &[Action]) -> f64 {
        legal_actions
            .iter()
            .map(|&action| self.get(state, action))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// All legal actions sharing the highest Q-value, in input order
    pub fn best_actions(&self, state: &StateKey, legal_actions: &[Action]) -> Vec<Action> {
        let max = self.max_q(state, legal_actions);
        legal_actions
            .iter()
            .copied()
            .filter(|&action| self.get(state, action) == max)
            .collect()
    }

    /// Iterate over stored entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, Action, f64)> {
        self.q_values
            .iter()
            .map(|((state, action), &value)| (state.as_str(), *action, value))
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.q_values.clear();
    }

    /// Get total number of Q-values stored
    pub fn size(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).unwrap()
    }

    fn action(row: usize, col: usize) -> Action {
        Action::new(row, col).unwrap()
    }

    #[test]
    fn test_qtable_defaults_to_zero() {
        let qtable = QTable::new();
        assert_eq!(qtable.get(&key("_________"), action(0, 0)), 0.0);
        assert!(qtable.is_empty());
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new();
        let state = key("_________");
        qtable.set(&state, action(1, 1), 1.5);
        assert_eq!(qtable.get(&state, action(1, 1)), 1.5);
        assert_eq!(qtable.get(&key("X________"), action(1, 1)), 0.0);
        assert_eq!(qtable.size(), 1);
    }

    #[test]
    fn test_max_q() {
        let mut qtable = QTable::new();
        let state = key("_________");
        qtable.set(&state, action(0, 0), 0.5);
        qtable.set(&state, action(0, 1), 1.5);
        qtable.set(&state, action(0, 2), 0.8);

        let legal = vec![action(0, 0), action(0, 1), action(0, 2)];
        assert_eq!(qtable.max_q(&state, &legal), 1.5);
    }

    #[test]
    fn test_max_q_uses_default_for_unseen() {
        let mut qtable = QTable::new();
        let state = key("_________");
        qtable.set(&state, action(0, 0), -0.5);

        let legal = vec![action(0, 0), action(2, 2)];
        assert_eq!(qtable.max_q(&state, &legal), 0.0);
        assert_eq!(qtable.max_q(&state, &[]), 0.0);
    }

    #[test]
    fn test_best_actions_collects_ties() {
        let mut qtable = QTable::new();
        let state = key("_________");
        qtable.set(&state, action(0, 0), 0.7);
        qtable.set(&state, action(1, 1), 0.7);
        qtable.set(&state, action(2, 2), 0.2);

        let legal = vec![action(0, 0), action(1, 1), action(2, 2)];
        assert_eq!(
            qtable.best_actions(&state, &legal),
            vec![action(0, 0), action(1, 1)]
        );
    }
}
