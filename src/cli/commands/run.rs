//! Default command - Train, then play against the result

use std::io;

use anyhow::Result;
use clap::Args;

use crate::cli::{
    commands::{
        play::play_session,
        train::{TrainArgs, train},
    },
    config::SessionArgs,
};

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    #[command(flatten)]
    pub session: SessionArgs,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let mut agent = args.train.agent.build_agent()?;
    train(&args.train, &mut agent)?;

    println!("\nTraining complete! Now you can play against the AI.");

    let stdin = io::stdin();
    play_session(&args.session, &mut agent, stdin.lock(), io::stdout())?;
    Ok(())
}
