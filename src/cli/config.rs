//! Shared argument groups for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    adapters::DEFAULT_TABLE_PATH,
    interactive::PlayConfig,
    q_learning::{AgentConfig, QLearningAgent},
};

/// Agent hyperparameters and table location
#[derive(Args, Debug, Clone)]
pub struct AgentArgs {
    /// Path of the persisted Q-table
    #[arg(long, short = 't', default_value = DEFAULT_TABLE_PATH)]
    pub table: PathBuf,

    /// Learning rate α
    #[arg(long, default_value_t = AgentConfig::DEFAULT_LEARNING_RATE)]
    pub alpha: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = AgentConfig::DEFAULT_DISCOUNT_FACTOR)]
    pub gamma: f64,

    /// Exploration rate ε used during training
    #[arg(long, default_value_t = AgentConfig::DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AgentArgs {
    pub fn agent_config(&self) -> AgentConfig {
        let config = AgentConfig::default()
            .with_learning_rate(self.alpha)
            .with_discount_factor(self.gamma)
            .with_epsilon(self.epsilon);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// Build an agent with an empty table
    pub fn build_agent(&self) -> Result<QLearningAgent> {
        QLearningAgent::new(self.agent_config()).context("invalid agent configuration")
    }
}

/// Interactive session options
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Exploration rate ε the AI uses while playing against you
    #[arg(long, default_value_t = 0.0)]
    pub play_epsilon: f64,

    /// Let the AI open the game (the opener plays X)
    #[arg(long, default_value_t = false)]
    pub ai_first: bool,
}

impl SessionArgs {
    pub fn play_config(&self) -> PlayConfig {
        PlayConfig {
            human_first: !self.ai_first,
            epsilon: self.play_epsilon,
        }
    }
}
