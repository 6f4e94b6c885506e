//! Self-play training pipeline
//!
//! The agent plays both sides of every episode and learns from the final
//! outcome. Observers watch the run without the trainer depending on how
//! progress is displayed.

pub mod observers;
pub mod training;

pub use observers::{LogObserver, OutcomeCounts, ProgressObserver};
pub use training::{
    EpisodeReport, Rewards, TrainingConfig, TrainingPipeline, TrainingResult, play_episode,
};

pub use crate::ports::Observer;
