//! Human vs agent play over a text console
//!
//! The session reads from any `BufRead` and writes to any `Write`, so the
//! binary wires it to stdin/stdout while tests drive it with byte buffers.
//! The agent only chooses moves here; its table is never updated.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    q_learning::QLearningAgent,
    tictactoe::{Action, Board, GameOutcome, Player},
};

pub const ROW_PROMPT: &str = "Enter row (0, 1, 2): ";
pub const COLUMN_PROMPT: &str = "Enter column (0, 1, 2): ";
pub const INVALID_INPUT: &str = "Invalid input! Enter numbers between 0 and 2.";
pub const CELL_TAKEN: &str = "Invalid move! Cell already taken.";

/// Interactive session settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Whether the human opens the game. The opener always plays X.
    pub human_first: bool,
    /// Exploration rate the agent uses while playing
    pub epsilon: f64,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            human_first: true,
            epsilon: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Human,
    Ai,
}

impl Side {
    fn other(self) -> Side {
        match self {
            Side::Human => Side::Ai,
            Side::Ai => Side::Human,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Side::Human => "Human",
            Side::Ai => "AI",
        }
    }
}

enum HumanInput {
    Move(Action),
    Retry,
    Closed,
}

/// One game between a human and the agent
pub struct InteractiveSession<'a, R, W> {
    agent: &'a mut QLearningAgent,
    input: R,
    output: W,
    config: PlayConfig,
    board: Board,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(agent: &'a mut QLearningAgent, input: R, output: W) -> Self {
        Self {
            agent,
            input,
            output,
            config: PlayConfig::default(),
            board: Board::new(),
        }
    }

    pub fn with_config(mut self, config: PlayConfig) -> Self {
        self.config = config;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Play until a win, a draw, or the end of input.
    ///
    /// Returns `None` if the game ended without an outcome. The agent's
    /// exploration rate is restored afterwards.
    pub fn run(&mut self) -> Result<Option<GameOutcome>> {
        let training_epsilon = self.agent.config().epsilon;
        self.agent.set_epsilon(self.config.epsilon)?;
        let outcome = self.play();
        self.agent.set_epsilon(training_epsilon)?;
        outcome
    }

    fn mark_of(&self, side: Side) -> Player {
        let opener = if self.config.human_first {
            Side::Human
        } else {
            Side::Ai
        };
        if side == opener { Player::X } else { Player::O }
    }

    fn play(&mut self) -> Result<Option<GameOutcome>> {
        let mut side = if self.config.human_first {
            Side::Human
        } else {
            Side::Ai
        };

        loop {
            write!(self.output, "{}", self.board)?;

            let action = match side {
                Side::Human => match self.read_human_move()? {
                    HumanInput::Move(action) => action,
                    HumanInput::Retry => continue,
                    HumanInput::Closed => {
                        writeln!(self.output, "Input closed, ending game.")?;
                        return Ok(None);
                    }
                },
                Side::Ai => {
                    writeln!(self.output, "AI is making a move...")?;
                    match self.agent.choose_action(&self.board) {
                        Some(action) => action,
                        None => return Ok(None),
                    }
                }
            };

            let mark = self.mark_of(side);
            self.board.place(action, mark)?;

            if self.board.has_won(mark) {
                write!(self.output, "{}", self.board)?;
                writeln!(self.output, "{} wins!", side.label())?;
                return Ok(Some(GameOutcome::Win(mark)));
            }

            if self.board.is_full() {
                write!(self.output, "{}", self.board)?;
                writeln!(self.output, "It's a draw!")?;
                return Ok(Some(GameOutcome::Draw));
            }

            side = side.other();
        }
    }

    fn read_human_move(&mut self) -> Result<HumanInput> {
        let Some(row) = self.prompt(ROW_PROMPT)? else {
            return Ok(HumanInput::Closed);
        };
        let Ok(row) = row.parse::<usize>() else {
            writeln!(self.output, "{INVALID_INPUT}")?;
            return Ok(HumanInput::Retry);
        };

        let Some(col) = self.prompt(COLUMN_PROMPT)? else {
            return Ok(HumanInput::Closed);
        };
        let Ok(col) = col.parse::<usize>() else {
            writeln!(self.output, "{INVALID_INPUT}")?;
            return Ok(HumanInput::Retry);
        };

        let Ok(action) = Action::new(row, col) else {
            writeln!(self.output, "{INVALID_INPUT}")?;
            return Ok(HumanInput::Retry);
        };

        if !self.board.is_empty_at(action) {
            writeln!(self.output, "{CELL_TAKEN}")?;
            return Ok(HumanInput::Retry);
        }

        Ok(HumanInput::Move(action))
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
