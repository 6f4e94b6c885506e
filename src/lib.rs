//! Tabular Q-learning for tic-tac-toe
//!
//! This crate provides:
//! - Tic-tac-toe board logic with string state keys
//! - A Q-learning agent with ε-greedy action selection
//! - Self-play training with periodic MessagePack checkpoints
//! - An interactive console session against a trained agent

pub mod adapters;
pub mod cli;
pub mod error;
pub mod interactive;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use types::StateKey;
