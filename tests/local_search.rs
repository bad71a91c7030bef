//! Hill climbing, simulated annealing and the genetic algorithm on 8-queens

use ailab::{
    config::{AnnealingConfig, GeneticConfig, HillClimbingConfig},
    problems::{QueensLocal, queens},
    search::{
        GeneticProblem, RandomStart, SearchProblem, genetic, hill_climbing,
        hill_climbing_random_restarts, simulated_annealing,
    },
};
use rand::{SeedableRng, rngs::StdRng};

const MAX_PAIRS: f64 = 28.0;

fn assert_consistent(problem: &QueensLocal, state: &[usize], value: f64, is_goal: bool) {
    assert_eq!(state.len(), 8);
    assert!(state.iter().all(|&col| col < 8));
    assert_eq!(value, MAX_PAIRS - queens::conflicts(state) as f64);
    assert_eq!(is_goal, queens::conflicts(state) == 0);
    assert!(value <= problem.max_value().unwrap_or(f64::INFINITY));
}

mod hill_climbing_tests {
    use super::*;

    #[test]
    fn test_never_worse_than_start() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let problem = QueensLocal::random(8, &mut rng);
            let start = problem.value(&problem.initial_state());
            let outcome = hill_climbing(&problem, &HillClimbingConfig::default());
            assert!(outcome.value >= start);
            assert_consistent(&problem, &outcome.state, outcome.value, outcome.is_goal);
        }
    }

    #[test]
    fn test_solution_start_stays_put() {
        let solution = vec![0, 4, 7, 5, 2, 6, 1, 3];
        let problem = QueensLocal::new(solution.clone());
        let outcome = hill_climbing(&problem, &HillClimbingConfig::default());
        assert!(outcome.is_goal);
        assert_eq!(outcome.state, solution);
        assert_eq!(outcome.iterations, 0);
    }

    #[test]
    fn test_iteration_cap_is_respected() {
        let problem = QueensLocal::new(vec![0; 8]);
        let config = HillClimbingConfig::default().with_max_iterations(1);
        let outcome = hill_climbing(&problem, &config);
        assert_eq!(outcome.iterations, 1);
        assert!(outcome.value > problem.value(&problem.initial_state()));
    }

    #[test]
    fn test_many_restarts_solve_eight_queens() {
        let mut rng = StdRng::seed_from_u64(2024);
        let problem = QueensLocal::random(8, &mut rng);
        let config = HillClimbingConfig::default().with_restarts(300);
        let outcome = hill_climbing_random_restarts(&problem, &config, &mut rng);
        assert!(outcome.is_goal, "no solution in 300 restarts");
        assert!(queens::is_solution(&outcome.state, 8));
    }
}

mod annealing_tests {
    use super::*;

    #[test]
    fn test_best_state_never_worse_than_start() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = AnnealingConfig::default().with_iterations(2_000);
        for _ in 0..10 {
            let problem = QueensLocal::random(8, &mut rng);
            let start = problem.value(&problem.initial_state());
            let outcome = simulated_annealing(&problem, &config, &mut rng);
            assert!(outcome.value >= start);
            assert!(outcome.iterations <= 2_000);
            assert_consistent(&problem, &outcome.state, outcome.value, outcome.is_goal);
        }
    }

    #[test]
    fn test_zero_iterations_returns_start() {
        let mut rng = StdRng::seed_from_u64(3);
        let problem = QueensLocal::random(8, &mut rng);
        let config = AnnealingConfig::default().with_iterations(0);
        let outcome = simulated_annealing(&problem, &config, &mut rng);
        assert_eq!(outcome.state, problem.initial);
        assert_eq!(outcome.iterations, 0);
    }
}

mod genetic_tests {
    use super::*;

    #[test]
    fn test_operators_keep_placements_valid() {
        let mut rng = StdRng::seed_from_u64(5);
        let problem = QueensLocal::random(8, &mut rng);
        for _ in 0..50 {
            let first = problem.random_state(&mut rng);
            let second = problem.random_state(&mut rng);
            let (a, b) = problem.crossover(&first, &second, &mut rng);
            for child in [&a, &b, &problem.mutate(&first, &mut rng)] {
                assert_eq!(child.len(), 8);
                assert!(child.iter().all(|&col| col < 8));
            }
            // Each gene of a child comes from the same row of a parent.
            for row in 0..8 {
                assert!(a[row] == first[row] || a[row] == second[row]);
                assert!(b[row] == first[row] || b[row] == second[row]);
            }
        }
    }

    #[test]
    fn test_result_is_consistent() {
        let mut rng = StdRng::seed_from_u64(99);
        let problem = QueensLocal::random(8, &mut rng);
        let config = GeneticConfig::default().with_generations(200);
        let outcome = genetic(&problem, &config, &mut rng);
        assert!(outcome.iterations <= 200);
        assert_consistent(&problem, &outcome.state, outcome.value, outcome.is_goal);
    }
}
