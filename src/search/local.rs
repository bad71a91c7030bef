//! Steepest-ascent hill climbing

use log::debug;
use rand::Rng;

use super::problem::{LocalOutcome, RandomStart, SearchProblem};
use crate::config::HillClimbingConfig;

/// Hill climbing from the problem's initial state.
///
/// Every neighbor reachable by one action is evaluated; the search moves to
/// the best one only when its value is strictly greater than the current
/// value. Stops on a local maximum or after `max_iterations` moves.
pub fn hill_climbing<P: SearchProblem>(
    problem: &P,
    config: &HillClimbingConfig,
) -> LocalOutcome<P::State> {
    climb_from(problem, problem.initial_state(), config.max_iterations)
}

/// Hill climbing from `restarts` random states, keeping the best outcome.
/// Stops early as soon as a run ends on a goal.
pub fn hill_climbing_random_restarts<P, R>(
    problem: &P,
    config: &HillClimbingConfig,
    rng: &mut R,
) -> LocalOutcome<P::State>
where
    P: RandomStart,
    R: Rng + ?Sized,
{
    let mut best = climb_from(problem, problem.random_state(rng), config.max_iterations);
    let mut runs = 1;
    while !best.is_goal && runs < config.restarts {
        let outcome = climb_from(problem, problem.random_state(rng), config.max_iterations);
        if outcome.value > best.value {
            best = outcome;
        }
        runs += 1;
    }
    debug!(
        "random-restart hill climbing finished after {} runs, best value {}",
        runs, best.value
    );
    best
}

fn climb_from<P: SearchProblem>(
    problem: &P,
    start: P::State,
    max_iterations: usize,
) -> LocalOutcome<P::State> {
    let mut current = start;
    let mut current_value = problem.value(&current);
    let mut iterations = 0;

    while iterations < max_iterations {
        let mut best_neighbor: Option<(P::State, f64)> = None;
        for action in problem.actions(&current) {
            let neighbor = problem.result(&current, &action);
            let value = problem.value(&neighbor);
            if best_neighbor.as_ref().is_none_or(|(_, best)| value > *best) {
                best_neighbor = Some((neighbor, value));
            }
        }

        match best_neighbor {
            Some((neighbor, value)) if value > current_value => {
                current = neighbor;
                current_value = value;
                iterations += 1;
            }
            _ => break,
        }
    }

    debug!("hill climbing stopped after {iterations} moves at value {current_value}");
    LocalOutcome::new(problem, current, iterations)
}
