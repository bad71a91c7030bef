//! CLI infrastructure for the ailab exercises
//!
//! Each subcommand builds a problem or game, runs one of the engines and
//! prints the result.

pub mod commands;
pub mod output;
