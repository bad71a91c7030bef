//! Problem description consumed by every search algorithm

use std::hash::Hash;

use rand::Rng;

/// A state-space search problem.
///
/// Implementors describe the problem; the algorithms in [`crate::search`]
/// decide how to explore it. Each algorithm uses a different subset of the
/// methods:
///
/// | algorithm            | uses                                         |
/// |----------------------|----------------------------------------------|
/// | A*                   | `actions`, `result`, `is_goal`, `cost`, `heuristic` |
/// | greedy               | `actions`, `result`, `is_goal`, `heuristic`  |
/// | hill climbing        | `actions`, `result`, `value`                 |
/// | simulated annealing  | `actions`, `result`, `value`, `is_goal`      |
/// | genetic              | `value`, `is_goal` + [`GeneticProblem`]       |
///
/// # Examples
///
/// ```
/// use ailab::search::{SearchProblem, astar};
///
/// /// Count from 0 up to a target using +1 and +2 steps.
/// struct CountTo(u32);
///
/// impl SearchProblem for CountTo {
///     type State = u32;
///     type Action = u32;
///
///     fn initial_state(&self) -> u32 {
///         0
///     }
///
///     fn actions(&self, state: &u32) -> Vec<u32> {
///         [1, 2].into_iter().filter(|step| state + step <= self.0).collect()
///     }
///
///     fn result(&self, state: &u32, action: &u32) -> u32 {
///         state + action
///     }
///
///     fn is_goal(&self, state: &u32) -> bool {
///         *state == self.0
///     }
/// }
///
/// let solution = astar(&CountTo(5)).unwrap();
/// assert_eq!(solution.state(), &5);
/// assert_eq!(solution.cost, 3.0);
/// ```
pub trait SearchProblem {
    type State: Clone + Eq + Hash;
    type Action: Clone;

    /// State the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Legal actions available from `state`.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Successor reached by applying `action` to `state`.
    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Non-negative cost of the step `state --action--> next`.
    fn cost(&self, _state: &Self::State, _action: &Self::Action, _next: &Self::State) -> f64 {
        1.0
    }

    /// Estimate of the remaining cost from `state` to a goal.
    fn heuristic(&self, _state: &Self::State) -> f64 {
        0.0
    }

    /// Quality of `state` for local search (higher is better).
    fn value(&self, state: &Self::State) -> f64 {
        -self.heuristic(state)
    }
}

/// Problems that can produce random states, used for random restarts and
/// for seeding a genetic population.
pub trait RandomStart: SearchProblem {
    fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::State;
}

/// Problems whose states can be recombined by the genetic search.
pub trait GeneticProblem: RandomStart {
    /// Combine two parents into two children.
    fn crossover<R: Rng + ?Sized>(
        &self,
        first: &Self::State,
        second: &Self::State,
        rng: &mut R,
    ) -> (Self::State, Self::State);

    /// Randomly perturb one individual.
    fn mutate<R: Rng + ?Sized>(&self, state: &Self::State, rng: &mut R) -> Self::State;

    /// Highest value an individual can reach, if known. Reaching it ends the
    /// search early.
    fn max_value(&self) -> Option<f64> {
        None
    }
}

/// A path found by best-first search.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<S, A> {
    /// `(action, state)` pairs from the initial state (no action) to the goal
    pub path: Vec<(Option<A>, S)>,
    /// Sum of step costs along the path
    pub cost: f64,
    /// Number of nodes expanded before the goal was popped
    pub expanded: usize,
}

impl<S, A> Solution<S, A> {
    /// The goal state at the end of the path.
    pub fn state(&self) -> &S {
        // A solution path always contains at least the initial state.
        &self.path[self.path.len() - 1].1
    }

    /// Actions in the order they were taken.
    pub fn actions(&self) -> impl Iterator<Item = &A> {
        self.path.iter().filter_map(|(action, _)| action.as_ref())
    }

    /// Number of actions on the path.
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of a local search run.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalOutcome<S> {
    /// Best state found
    pub state: S,
    /// Value of `state`
    pub value: f64,
    /// Iterations (or generations) performed
    pub iterations: usize,
    /// Whether `state` satisfies the goal predicate
    pub is_goal: bool,
}

impl<S> LocalOutcome<S> {
    pub(crate) fn new<P>(problem: &P, state: S, iterations: usize) -> Self
    where
        P: SearchProblem<State = S>,
    {
        Self {
            value: problem.value(&state),
            is_goal: problem.is_goal(&state),
            state,
            iterations,
        }
    }
}
