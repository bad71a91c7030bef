//! Subcommand implementations

pub mod puzzle;
pub mod queens;
pub mod tictactoe;
