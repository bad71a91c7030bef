//! Concrete search problems

pub mod eight_puzzle;
pub mod queens;

pub use eight_puzzle::{EightPuzzle, Slide, Tiles};
pub use queens::{QueenMove, QueensLocal, QueensPlacement};
