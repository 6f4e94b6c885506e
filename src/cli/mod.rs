//! CLI infrastructure for training and playing against the Q-learning agent

pub mod commands;
pub mod config;
pub mod output;
