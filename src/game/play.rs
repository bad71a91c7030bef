//! Turn-taking between two players

use log::debug;

use super::{Game, Negamax, Side};

/// Something that picks moves: a search, a human at a prompt, a script.
pub trait Player<G: Game> {
    /// Choose a move for the side to move. `game` may be searched in place
    /// but must be left as it was found. `None` means no move is available.
    fn choose_move(&mut self, game: &mut G) -> Option<G::Move>;

    fn name(&self) -> &str;
}

/// Player driven by negamax search.
pub struct AiPlayer {
    name: String,
    search: Negamax,
}

impl AiPlayer {
    pub fn new(name: impl Into<String>, depth: u32) -> Self {
        Self {
            name: name.into(),
            search: Negamax::new(depth),
        }
    }

    pub fn search(&self) -> &Negamax {
        &self.search
    }
}

impl<G: Game> Player<G> for AiPlayer {
    fn choose_move(&mut self, game: &mut G) -> Option<G::Move> {
        self.search.choose_move(game).map(|choice| choice.mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Player backed by a synchronous callback, e.g. reading moves from stdin.
/// The callback is responsible for returning a legal move; validation and
/// re-prompting happen on its side.
pub struct CallbackPlayer<F> {
    name: String,
    callback: F,
}

impl<F> CallbackPlayer<F> {
    pub fn new(name: impl Into<String>, callback: F) -> Self {
        Self {
            name: name.into(),
            callback,
        }
    }
}

impl<G, F> Player<G> for CallbackPlayer<F>
where
    G: Game,
    F: FnMut(&G) -> Option<G::Move>,
{
    fn choose_move(&mut self, game: &mut G) -> Option<G::Move> {
        (self.callback)(game)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// How a match ended.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome<M> {
    /// Moves in the order they were played
    pub moves: Vec<M>,
    /// `None` for a draw or an abandoned match
    pub winner: Option<Side>,
}

/// Alternate turns between `players[0]` (first side) and `players[1]`
/// (second side) until the game is over or a player has no move.
pub fn play_match<G: Game>(
    game: &mut G,
    players: [&mut dyn Player<G>; 2],
    mut on_move: impl FnMut(&G, &G::Move),
) -> MatchOutcome<G::Move> {
    let mut players = players;
    let mut moves = Vec::new();

    while !game.is_over() {
        let side = game.to_move();
        let player = &mut players[side.index()];
        let Some(mv) = player.choose_move(game) else {
            debug!("{} has no move; match abandoned", player.name());
            break;
        };
        game.apply(&mv);
        on_move(game, &mv);
        moves.push(mv);
    }

    MatchOutcome {
        moves,
        winner: game.winner(),
    }
}
