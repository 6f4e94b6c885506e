//! CLI subcommands

pub mod play;
pub mod run;
pub mod train;
