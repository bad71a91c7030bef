//! Simulated annealing

use log::debug;
use rand::{Rng, prelude::IndexedRandom};

use super::problem::{LocalOutcome, SearchProblem};
use crate::config::AnnealingConfig;

/// Below this temperature only improving moves are accepted.
const MIN_TEMPERATURE: f64 = 1e-9;

/// Simulated annealing from the problem's initial state.
///
/// Each iteration draws one random neighbor. Improvements are always
/// accepted; a worse neighbor is accepted with probability
/// `exp((candidate - current) / temperature)`. The best state seen during
/// the whole run is returned, which is never worse than the initial state.
pub fn simulated_annealing<P, R>(
    problem: &P,
    config: &AnnealingConfig,
    rng: &mut R,
) -> LocalOutcome<P::State>
where
    P: SearchProblem,
    R: Rng + ?Sized,
{
    let mut current = problem.initial_state();
    let mut current_value = problem.value(&current);
    let mut best = current.clone();
    let mut best_value = current_value;
    let mut iterations = 0;

    while iterations < config.iterations {
        if problem.is_goal(&best) {
            break;
        }

        let actions = problem.actions(&current);
        let Some(action) = actions.choose(rng) else {
            break;
        };
        iterations += 1;

        let candidate = problem.result(&current, action);
        let candidate_value = problem.value(&candidate);
        let delta = candidate_value - current_value;
        let temperature = config.temperature(iterations);

        let accept = delta > 0.0
            || (temperature > MIN_TEMPERATURE && rng.random::<f64>() < (delta / temperature).exp());
        if !accept {
            continue;
        }

        current = candidate;
        current_value = candidate_value;
        if current_value > best_value {
            best = current.clone();
            best_value = current_value;
        }
    }

    debug!("simulated annealing ran {iterations} iterations, best value {best_value}");
    LocalOutcome::new(problem, best, iterations)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    /// Maximise `-(x - 25)^2` on 0..=50 with ±1 steps.
    struct Parabola;

    impl SearchProblem for Parabola {
        type State = i32;
        type Action = i32;

        fn initial_state(&self) -> i32 {
            0
        }

        fn actions(&self, state: &i32) -> Vec<i32> {
            [-1, 1]
                .into_iter()
                .filter(|step| (0..=50).contains(&(state + step)))
                .collect()
        }

        fn result(&self, state: &i32, action: &i32) -> i32 {
            state + action
        }

        fn is_goal(&self, state: &i32) -> bool {
            *state == 25
        }

        fn value(&self, state: &i32) -> f64 {
            -((state - 25) * (state - 25)) as f64
        }
    }

    #[test]
    fn test_best_state_never_worse_than_start() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = AnnealingConfig::default().with_iterations(10);
        let outcome = simulated_annealing(&Parabola, &config, &mut rng);
        assert!(outcome.value >= Parabola.value(&0));
        assert!(outcome.iterations <= 10);
    }

    #[test]
    fn test_finds_peak_with_enough_iterations() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = AnnealingConfig::default()
            .with_iterations(20_000)
            .with_initial_temperature(5.0)
            .with_cooling_rate(0.001);
        let outcome = simulated_annealing(&Parabola, &config, &mut rng);
        assert!(outcome.is_goal);
        assert_eq!(outcome.state, 25);
    }

    #[test]
    fn test_zero_iterations_returns_initial_state() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = AnnealingConfig::default().with_iterations(0);
        let outcome = simulated_annealing(&Parabola, &config, &mut rng);
        assert_eq!(outcome.state, 0);
        assert_eq!(outcome.iterations, 0);
    }
}
