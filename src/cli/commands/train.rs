//! Train command - Self-play training of the Q-learning agent

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{config::AgentArgs, output},
    pipeline::{
        LogObserver, ProgressObserver, Rewards, TrainingConfig, TrainingPipeline, TrainingResult,
    },
    q_learning::{AgentConfig, QLearningAgent},
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    training: &'a TrainingResult,
    agent: AgentConfig,
    table: &'a Path,
    episodes_trained: usize,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Trailing separator or missing filename means a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(allow_negative_numbers = true)]
pub struct TrainArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Number of self-play episodes
    #[arg(long, short = 'n', default_value_t = TrainingConfig::DEFAULT_EPISODES)]
    pub episodes: usize,

    /// Save the table every N episodes (0 saves only at the end)
    #[arg(long, default_value_t = TrainingConfig::DEFAULT_SAVE_INTERVAL)]
    pub save_interval: usize,

    /// Reward magnitude for a won episode (positive for X, negative for O)
    #[arg(long, default_value_t = Rewards::default().win)]
    pub win_reward: f64,

    /// Reward given to every move of a drawn episode
    #[arg(long, default_value_t = Rewards::default().draw)]
    pub draw_reward: f64,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Ignore any existing table and start from scratch
    #[arg(long, default_value_t = false)]
    pub fresh: bool,

    /// Log periodic summaries instead of drawing a progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl TrainArgs {
    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig::default()
            .with_episodes(self.episodes)
            .with_save_interval(self.save_interval)
            .with_table_path(&self.agent.table)
            .with_resume(!self.fresh)
            .with_rewards(Rewards {
                win: self.win_reward,
                draw: self.draw_reward,
            })
    }
}

/// Train `agent` as configured by `args`, printing a summary when done
pub fn train(args: &TrainArgs, agent: &mut QLearningAgent) -> Result<TrainingResult> {
    let summary_spec = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    println!("Training the AI...");

    let mut pipeline = TrainingPipeline::new(args.training_config());
    pipeline = if args.no_progress {
        pipeline.with_observer(Box::new(LogObserver::new(args.save_interval)))
    } else {
        pipeline.with_observer(Box::new(ProgressObserver::new()))
    };

    let result = pipeline
        .run(agent)
        .with_context(|| format!("training failed (table at {})", args.agent.table.display()))?;

    output::print_training_summary(&result);
    output::print_kv("Table", &args.agent.table.display().to_string());

    if let Some((summary_path, normalized)) = summary_spec {
        if normalized {
            println!("\nNormalizing summary path to {}", summary_path.display());
        }
        if let Some(parent) = summary_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let summary = TrainingSummaryFile {
            training: &result,
            agent: *agent.config(),
            table: &args.agent.table,
            episodes_trained: agent.episodes_trained(),
        };
        let file = File::create(&summary_path)
            .with_context(|| format!("cannot create {}", summary_path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(result)
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut agent = args.agent.build_agent()?;
    train(&args, &mut agent)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.json")),
            PathBuf::from("out/run.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run")),
            PathBuf::from("out/run.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.txt")),
            PathBuf::from("out/run.json")
        );
        let dir = format!("out{}", std::path::MAIN_SEPARATOR);
        assert_eq!(
            sanitize_summary_path(Path::new(&dir)),
            PathBuf::from("out").join("training_summary.json")
        );
    }

    #[test]
    fn test_defaults() {
        let args = TrainArgs::parse_from(["train"]);
        assert_eq!(args.episodes, 50_000);
        assert_eq!(args.save_interval, 1_000);
        assert_eq!(args.agent.table, PathBuf::from("q_table.msgpack"));
        assert!(!args.fresh);

        let config = args.training_config();
        assert!(config.resume);
        assert_eq!(config.table_path.as_deref(), Some(Path::new("q_table.msgpack")));
        assert_eq!(config.rewards, Rewards::default());
    }

    #[test]
    fn test_reward_flags() {
        let args = TrainArgs::parse_from(["train", "--win-reward", "3", "--draw-reward", "-0.5"]);
        let config = args.training_config();
        assert_eq!(
            config.rewards,
            Rewards {
                win: 3.0,
                draw: -0.5
            }
        );
    }
}
