//! Console play against a trained, persisted agent

use clap::Parser;
use qtictactoe::{
    cli::commands::play::{PlayArgs, play_session},
    interactive::{CELL_TAKEN, INVALID_INPUT},
    pipeline::{TrainingConfig, TrainingPipeline},
    q_learning::{AgentConfig, QLearningAgent},
};
use tempfile::tempdir;

/// Input that tries every cell in row-major order, including taken ones.
fn scan_input() -> String {
    (0..3)
        .flat_map(|row| (0..3).map(move |col| format!("{row}\n{col}\n")))
        .collect()
}

#[test]
fn test_play_against_saved_table() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("q_table.msgpack");

    let mut trainer = QLearningAgent::new(AgentConfig::default().with_seed(21)).unwrap();
    TrainingPipeline::new(
        TrainingConfig::default()
            .with_episodes(300)
            .with_table_path(&path),
    )
    .run(&mut trainer)
    .unwrap();

    let args = PlayArgs::parse_from([
        "play",
        "--table",
        path.to_str().unwrap(),
        "--seed",
        "5",
    ]);
    let mut agent = args.agent.build_agent().unwrap();
    assert!(agent.load(&args.agent.table).unwrap());
    let before = agent.q_table().clone();

    let mut output = Vec::new();
    let outcome = play_session(&args.session, &mut agent, scan_input().as_bytes(), &mut output)
        .unwrap();

    assert!(outcome.is_some());
    assert_eq!(agent.q_table(), &before);

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("AI is making a move..."));
    assert!(text.contains(CELL_TAKEN));
    assert!(!text.contains(INVALID_INPUT));
}

#[test]
fn test_ai_first_session_opens_with_agent_move() {
    let args = PlayArgs::parse_from(["play", "--ai-first", "--seed", "9"]);
    let mut agent = args.agent.build_agent().unwrap();

    let mut output = Vec::new();
    play_session(&args.session, &mut agent, "".as_bytes(), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    let first_prompt = text.find("Enter row").unwrap();
    let ai_move = text.find("AI is making a move...").unwrap();
    assert!(ai_move < first_prompt);
    assert!(text.contains('X'));
}
