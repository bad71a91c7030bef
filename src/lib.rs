//! Classical AI search and game playing
//!
//! This crate provides:
//! - Best-first informed search (A*, greedy) over any [`search::SearchProblem`]
//! - Local search: hill climbing, simulated annealing and genetic search
//! - Fixed-depth negamax with alpha-beta pruning over any [`game::Game`]
//! - The classic exercises built on them: the 8-puzzle, N-queens and
//!   Tic-Tac-Toe

pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod problems;
pub mod search;
pub mod tictactoe;

pub use error::{Error, Result};
