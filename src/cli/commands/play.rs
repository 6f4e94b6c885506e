//! Play command - Human vs agent on the console

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::config::{AgentArgs, SessionArgs},
    interactive::InteractiveSession,
    q_learning::QLearningAgent,
    tictactoe::GameOutcome,
};

#[derive(Parser, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    #[command(flatten)]
    pub session: SessionArgs,
}

/// Play one game between the console user and `agent`
pub fn play_session<R: BufRead, W: Write>(
    session: &SessionArgs,
    agent: &mut QLearningAgent,
    input: R,
    output: W,
) -> Result<Option<GameOutcome>> {
    let outcome = InteractiveSession::new(agent, input, output)
        .with_config(session.play_config())
        .run()
        .context("interactive session failed")?;
    Ok(outcome)
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut agent = args.agent.build_agent()?;
    let found = agent
        .load(&args.agent.table)
        .with_context(|| format!("cannot load {}", args.agent.table.display()))?;

    if found {
        log::info!(
            "loaded {} Q-values from {}",
            agent.table_size(),
            args.agent.table.display()
        );
    } else {
        println!(
            "No table found at {}; the AI will play without experience.",
            args.agent.table.display()
        );
    }

    let stdin = io::stdin();
    play_session(&args.session, &mut agent, stdin.lock(), io::stdout())?;
    Ok(())
}
