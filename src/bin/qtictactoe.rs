//! Q-learning tic-tac-toe CLI
//!
//! With no subcommand the agent trains by self-play and then plays a game
//! against the console user.

use anyhow::Result;
use clap::{Parser, Subcommand};
use qtictactoe::cli::commands::{
    play::{self, PlayArgs},
    run::{self, RunArgs},
    train::{self, TrainArgs},
};

#[derive(Parser)]
#[command(name = "qtictactoe")]
#[command(version, about = "Tic-tac-toe agent trained by tabular Q-learning", long_about = None)]
#[command(args_conflicts_with_subcommands = true, allow_negative_numbers = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent by self-play and save its table
    Train(Box<TrainArgs>),

    /// Play against a saved agent
    Play(PlayArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Train(args)) => train::execute(*args),
        Some(Commands::Play(args)) => play::execute(args),
        None => run::execute(cli.run),
    }
}
