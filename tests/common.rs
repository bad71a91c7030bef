//! Shared helpers for the integration tests.

use ailab::{
    game::Game,
    search::{SearchProblem, Solution},
    tictactoe::{Board, Mark},
};

/// Replay a solution's actions from the initial state and check that every
/// recorded state matches and the last one is a goal.
pub fn assert_path_replays<P>(problem: &P, solution: &Solution<P::State, P::Action>)
where
    P: SearchProblem,
    P::State: std::fmt::Debug,
{
    let mut state = problem.initial_state();
    assert_eq!(solution.path[0].1, state, "path must start at the initial state");
    let mut cost = 0.0;
    for (action, expected) in solution.path.iter().skip(1) {
        let action = action.as_ref().expect("only the first step has no action");
        let next = problem.result(&state, action);
        cost += problem.cost(&state, action, &next);
        assert_eq!(&next, expected);
        state = next;
    }
    assert!(problem.is_goal(&state));
    assert!((cost - solution.cost).abs() < 1e-9);
}

/// Let `choose` move for `agent` and try every reply for the other mark.
/// Returns the number of finished games and panics if `agent` ever loses.
pub fn exhaust_replies(board: &mut Board, agent: Mark, choose: &impl Fn(&mut Board) -> usize) -> usize {
    if board.is_over() {
        assert_ne!(
            board.winning_mark(),
            Some(agent.opponent()),
            "{agent} lost:\n{}",
            board.render_grid()
        );
        return 1;
    }

    if board.to_move == agent {
        let mv = choose(board);
        board.apply(&mv);
        let games = exhaust_replies(board, agent, choose);
        board.undo(&mv);
        games
    } else {
        let mut games = 0;
        for mv in board.legal_moves() {
            board.apply(&mv);
            games += exhaust_replies(board, agent, choose);
            board.undo(&mv);
        }
        games
    }
}
