//! Informed and local search over abstract problems
//!
//! - [`astar`] / [`greedy`]: best-first graph search with a priority frontier
//! - [`hill_climbing`] / [`hill_climbing_random_restarts`]: steepest ascent
//! - [`simulated_annealing`]: randomized local search with a cooling schedule
//! - [`genetic`]: population search with tournament selection

pub mod annealing;
pub mod best_first;
pub mod genetic;
pub mod local;
pub mod problem;

pub use annealing::simulated_annealing;
pub use best_first::{Ranking, astar, best_first, greedy};
pub use genetic::{Population, genetic, point_mutation, single_point_crossover, tournament_select};
pub use local::{hill_climbing, hill_climbing_random_restarts};
pub use problem::{GeneticProblem, LocalOutcome, RandomStart, SearchProblem, Solution};
