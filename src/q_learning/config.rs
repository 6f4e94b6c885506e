//! Hyperparameters for the Q-learning agent.

use serde::{Deserialize, Serialize};

/// Configuration for creating a [`QLearningAgent`](super::QLearningAgent).
///
/// # Examples
///
/// ```
/// use qtictactoe::q_learning::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_learning_rate(0.2)
///     .with_epsilon(0.1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
    pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;
    pub const DEFAULT_EPSILON: f64 = 0.2;

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every hyperparameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if α is outside (0, 1],
    /// or γ or ε is outside [0, 1].
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("learning rate must be in (0, 1], got {}", self.learning_rate),
            });
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "discount factor must be in [0, 1], got {}",
                    self.discount_factor
                ),
            });
        }
        validate_epsilon(self.epsilon)
    }
}

pub(crate) fn validate_epsilon(epsilon: f64) -> Result<(), crate::Error> {
    if (0.0..=1.0).contains(&epsilon) {
        Ok(())
    } else {
        Err(crate::Error::InvalidConfiguration {
            message: format!("epsilon must be in [0, 1], got {epsilon}"),
        })
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: Self::DEFAULT_LEARNING_RATE,
            discount_factor: Self::DEFAULT_DISCOUNT_FACTOR,
            epsilon: Self::DEFAULT_EPSILON,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AgentConfig::default();
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.discount_factor, 0.9);
        assert_eq!(config.epsilon, 0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(AgentConfig::default().with_learning_rate(0.0).validate().is_err());
        assert!(AgentConfig::default().with_learning_rate(1.5).validate().is_err());
        assert!(AgentConfig::default().with_discount_factor(-0.1).validate().is_err());
        assert!(AgentConfig::default().with_epsilon(1.1).validate().is_err());
        assert!(AgentConfig::default().with_epsilon(f64::NAN).validate().is_err());
    }
}
