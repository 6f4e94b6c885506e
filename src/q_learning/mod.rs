//! Tabular Q-learning
//!
//! The agent keeps one value estimate per visited (state, action) pair and
//! improves it with the off-policy temporal-difference rule
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! Moves are picked ε-greedily: a uniformly random legal move with
//! probability ε, otherwise one of the highest-valued moves.
//!
//! ## Usage Example
//!
//! ```no_run
//! use qtictactoe::q_learning::{AgentConfig, QLearningAgent};
//! use qtictactoe::tictactoe::Board;
//!
//! let mut agent = QLearningAgent::new(
//!     AgentConfig::default()
//!         .with_learning_rate(0.1)   // α
//!         .with_discount_factor(0.9) // γ
//!         .with_epsilon(0.2)         // ε
//!         .with_seed(42),
//! )?;
//! agent.load("q_table.msgpack")?;
//!
//! let board = Board::new();
//! if let Some(action) = agent.choose_action(&board) {
//!     println!("agent plays {action}");
//! }
//! # Ok::<(), qtictactoe::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::QLearningAgent;
pub use config::AgentConfig;
pub use q_table::QTable;
pub use serialization::{SavedQTable, TrainingMetadata};
