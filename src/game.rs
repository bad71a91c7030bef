//! Two-player, zero-sum, perfect-information games
//!
//! A [`Game`] is a single mutable board. Search explores it by applying a
//! move, recursing and undoing the move again, so every implementation must
//! make `apply(m); undo(m)` restore the board and the side to move exactly.

pub mod negamax;
pub mod play;

use serde::{Deserialize, Serialize};

pub use negamax::{Choice, Negamax};
pub use play::{AiPlayer, CallbackPlayer, MatchOutcome, Player, play_match};

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// 0 for the first player, 1 for the second.
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// A game that can be searched in place.
pub trait Game {
    type Move: Clone;

    /// Side whose turn it is.
    fn to_move(&self) -> Side;

    /// Legal moves for the side to move. Empty when the game is over.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play `mv` for the side to move and pass the turn.
    fn apply(&mut self, mv: &Self::Move);

    /// Take back `mv`, which must be the last move applied.
    fn undo(&mut self, mv: &Self::Move);

    /// Whether the game has ended (win or draw).
    fn is_over(&self) -> bool;

    /// Winner of a finished game, if any.
    fn winner(&self) -> Option<Side>;

    /// Whether the side to move has already lost.
    fn lose(&self) -> bool {
        self.winner() == Some(self.to_move().opponent())
    }

    /// Static evaluation from the perspective of the side to move: its
    /// score minus the opponent's.
    fn score(&self) -> f64;
}
