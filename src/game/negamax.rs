//! Fixed-depth negamax search with alpha-beta pruning

use log::debug;

use super::Game;

/// Score returned for a position the side to move has already lost.
pub const DEFAULT_WIN_SCORE: f64 = 100.0;

/// The move chosen by a search and its negamax score.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<M> {
    pub mv: M,
    pub score: f64,
}

/// Negamax searcher.
///
/// Leaf values are scaled by `1 + 0.001 * remaining_depth`, so among moves
/// with the same outcome a quicker win (and a slower loss) scores higher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Negamax {
    pub depth: u32,
    pub win_score: f64,
}

impl Negamax {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            win_score: DEFAULT_WIN_SCORE,
        }
    }

    pub fn with_win_score(mut self, win_score: f64) -> Self {
        self.win_score = win_score;
        self
    }

    /// Best move for the side to move, or `None` if the game is over or no
    /// move is legal.
    ///
    /// The board is mutated during the search and restored before returning.
    pub fn choose_move<G: Game>(&self, game: &mut G) -> Option<Choice<G::Move>> {
        if game.is_over() || self.depth == 0 {
            return None;
        }
        let moves = game.legal_moves();
        let first = moves.first()?.clone();

        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best = Choice {
            mv: first,
            score: f64::NEG_INFINITY,
        };

        for mv in &moves {
            game.apply(mv);
            let score = -self.search(game, self.depth - 1, -beta, -alpha);
            game.undo(mv);

            if score > best.score {
                best = Choice {
                    mv: mv.clone(),
                    score,
                };
            }
            alpha = alpha.max(score);
        }

        debug!(
            "negamax depth {} picked a move scoring {}",
            self.depth, best.score
        );
        Some(best)
    }

    /// Negamax value of the current position from the mover's perspective.
    pub fn evaluate<G: Game>(&self, game: &mut G) -> f64 {
        self.search(game, self.depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn leaf(&self, value: f64, depth: u32) -> f64 {
        value * (1.0 + 0.001 * depth as f64)
    }

    fn search<G: Game>(&self, game: &mut G, depth: u32, mut alpha: f64, beta: f64) -> f64 {
        if game.lose() {
            return self.leaf(-self.win_score, depth);
        }
        if depth == 0 || game.is_over() {
            return self.leaf(game.score(), depth);
        }

        let moves = game.legal_moves();
        if moves.is_empty() {
            return self.leaf(game.score(), depth);
        }

        let mut best = f64::NEG_INFINITY;
        for mv in &moves {
            game.apply(mv);
            let score = -self.search(game, depth - 1, -beta, -alpha);
            game.undo(mv);

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Side;

    /// Take 1 or 2 stones; whoever takes the last stone wins.
    #[derive(Debug, Clone, PartialEq)]
    struct Nim {
        stones: u32,
        to_move: Side,
    }

    impl Game for Nim {
        type Move = u32;

        fn to_move(&self) -> Side {
            self.to_move
        }

        fn legal_moves(&self) -> Vec<u32> {
            (1..=2).filter(|take| *take <= self.stones).collect()
        }

        fn apply(&mut self, mv: &u32) {
            self.stones -= mv;
            self.to_move = self.to_move.opponent();
        }

        fn undo(&mut self, mv: &u32) {
            self.stones += mv;
            self.to_move = self.to_move.opponent();
        }

        fn is_over(&self) -> bool {
            self.stones == 0
        }

        fn winner(&self) -> Option<Side> {
            (self.stones == 0).then(|| self.to_move.opponent())
        }

        fn score(&self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_takes_winning_move() {
        // From 4 stones, taking 1 leaves the opponent a losing multiple of 3.
        let mut game = Nim {
            stones: 4,
            to_move: Side::First,
        };
        let choice = Negamax::new(10).choose_move(&mut game).unwrap();
        assert_eq!(choice.mv, 1);
        assert!(choice.score > 0.0);
    }

    #[test]
    fn test_losing_position_scores_negative() {
        let mut game = Nim {
            stones: 6,
            to_move: Side::First,
        };
        assert!(Negamax::new(10).evaluate(&mut game) < 0.0);
    }

    #[test]
    fn test_search_restores_board() {
        let mut game = Nim {
            stones: 7,
            to_move: Side::Second,
        };
        let before = game.clone();
        Negamax::new(7).choose_move(&mut game);
        assert_eq!(game, before);
    }

    #[test]
    fn test_takes_last_stones() {
        // Taking 2 wins at once; taking 1 hands the last stone to the opponent.
        let mut game = Nim {
            stones: 2,
            to_move: Side::First,
        };
        let choice = Negamax::new(5).choose_move(&mut game).unwrap();
        assert_eq!(choice.mv, 2);
    }

    #[test]
    fn test_finished_game_has_no_choice() {
        let mut game = Nim {
            stones: 0,
            to_move: Side::First,
        };
        assert!(Negamax::new(3).choose_move(&mut game).is_none());
    }
}
