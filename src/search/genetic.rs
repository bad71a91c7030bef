//! Genetic (population) search
//!
//! A generation is an explicit [`Population`] value: [`Population::evolve`]
//! consumes one generation and returns the next, so no iteration state is
//! shared between steps. The search keeps the best individual ever seen
//! outside the population; there is no elitism inside it.

use log::{debug, trace};
use rand::Rng;

use super::problem::{GeneticProblem, LocalOutcome};
use crate::config::GeneticConfig;

/// One generation of individuals.
#[derive(Debug, Clone, PartialEq)]
pub struct Population<S> {
    pub individuals: Vec<S>,
    /// Zero for the initial random population
    pub generation: usize,
}

impl<S: Clone> Population<S> {
    /// A population of `size` random individuals.
    pub fn random<P, R>(problem: &P, size: usize, rng: &mut R) -> Self
    where
        P: GeneticProblem<State = S>,
        R: Rng + ?Sized,
    {
        Self {
            individuals: (0..size).map(|_| problem.random_state(rng)).collect(),
            generation: 0,
        }
    }

    /// Value of every individual, in population order.
    pub fn scores<P>(&self, problem: &P) -> Vec<f64>
    where
        P: GeneticProblem<State = S>,
    {
        self.individuals.iter().map(|s| problem.value(s)).collect()
    }

    /// Index and value of the fittest individual (first one on ties).
    pub fn fittest(scores: &[f64]) -> Option<(usize, f64)> {
        scores
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (index, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((index, score)),
            })
    }

    /// Breed the next generation.
    ///
    /// Parents are chosen by tournament selection, recombined with the
    /// problem's crossover, and each child is mutated independently with
    /// probability `mutation_rate`. The new generation replaces this one
    /// wholesale and has the same size.
    pub fn evolve<P, R>(self, problem: &P, scores: &[f64], config: &GeneticConfig, rng: &mut R) -> Self
    where
        P: GeneticProblem<State = S>,
        R: Rng + ?Sized,
    {
        let size = self.individuals.len();
        let mut next = Vec::with_capacity(size);

        while next.len() < size {
            let first = &self.individuals[tournament_select(scores, config.tournament_size, rng)];
            let second = &self.individuals[tournament_select(scores, config.tournament_size, rng)];
            let (child_a, child_b) = problem.crossover(first, second, rng);

            for child in [child_a, child_b] {
                if next.len() == size {
                    break;
                }
                let child = if rng.random_bool(config.mutation_rate) {
                    problem.mutate(&child, rng)
                } else {
                    child
                };
                next.push(child);
            }
        }

        Self {
            individuals: next,
            generation: self.generation + 1,
        }
    }
}

/// Sample `size` individuals uniformly (with replacement) and return the
/// index of the fittest one.
///
/// # Panics
///
/// Panics if `scores` is empty.
pub fn tournament_select<R: Rng + ?Sized>(scores: &[f64], size: usize, rng: &mut R) -> usize {
    assert!(!scores.is_empty(), "tournament over an empty population");
    let mut winner = rng.random_range(0..scores.len());
    for _ in 1..size {
        let challenger = rng.random_range(0..scores.len());
        if scores[challenger] > scores[winner] {
            winner = challenger;
        }
    }
    winner
}

/// Single-point crossover: cut both parents at one random position in
/// `1..len` and swap the tails. Children have the parents' length.
pub fn single_point_crossover<G: Clone, R: Rng + ?Sized>(
    first: &[G],
    second: &[G],
    rng: &mut R,
) -> (Vec<G>, Vec<G>) {
    debug_assert_eq!(first.len(), second.len());
    if first.len() < 2 {
        return (first.to_vec(), second.to_vec());
    }
    let cut = rng.random_range(1..first.len());
    let child_a = first[..cut].iter().chain(&second[cut..]).cloned().collect();
    let child_b = second[..cut].iter().chain(&first[cut..]).cloned().collect();
    (child_a, child_b)
}

/// Replace one randomly chosen gene with a fresh random value.
pub fn point_mutation<G, R, F>(genes: &[G], rng: &mut R, mut random_gene: F) -> Vec<G>
where
    G: Clone,
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> G,
{
    let mut mutated = genes.to_vec();
    if !mutated.is_empty() {
        let index = rng.random_range(0..mutated.len());
        mutated[index] = random_gene(rng);
    }
    mutated
}

/// Run the genetic search.
///
/// Returns the best individual seen in any generation. The search ends early
/// once that individual reaches the problem's `max_value` or satisfies the
/// goal; otherwise it runs for `config.generations` generations and the
/// outcome reports `is_goal == false`.
pub fn genetic<P, R>(problem: &P, config: &GeneticConfig, rng: &mut R) -> LocalOutcome<P::State>
where
    P: GeneticProblem,
    R: Rng + ?Sized,
{
    let mut population = Population::random(problem, config.population_size.max(1), rng);
    let mut best: Option<(P::State, f64)> = None;

    loop {
        let scores = population.scores(problem);
        if let Some((index, score)) = Population::<P::State>::fittest(&scores)
            && best.as_ref().is_none_or(|(_, best_score)| score > *best_score)
        {
            trace!(
                "generation {}: new best value {score}",
                population.generation
            );
            best = Some((population.individuals[index].clone(), score));
        }

        let finished = best.as_ref().is_some_and(|(state, score)| {
            problem.max_value().is_some_and(|max| *score >= max) || problem.is_goal(state)
        });
        if finished || population.generation >= config.generations {
            break;
        }

        population = population.evolve(problem, &scores, config, rng);
    }

    let generations = population.generation;
    let state = match best {
        Some((state, _)) => state,
        None => problem.random_state(rng),
    };
    debug!("genetic search stopped after {generations} generations");
    LocalOutcome::new(problem, state, generations)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::search::{RandomStart, SearchProblem};

    /// Maximise the number of `true` bits in a fixed-length string.
    struct OneMax(usize);

    impl SearchProblem for OneMax {
        type State = Vec<bool>;
        type Action = usize;

        fn initial_state(&self) -> Vec<bool> {
            vec![false; self.0]
        }

        fn actions(&self, _state: &Vec<bool>) -> Vec<usize> {
            (0..self.0).collect()
        }

        fn result(&self, state: &Vec<bool>, action: &usize) -> Vec<bool> {
            let mut next = state.clone();
            next[*action] = !next[*action];
            next
        }

        fn is_goal(&self, state: &Vec<bool>) -> bool {
            state.iter().all(|bit| *bit)
        }

        fn value(&self, state: &Vec<bool>) -> f64 {
            state.iter().filter(|bit| **bit).count() as f64
        }
    }

    impl RandomStart for OneMax {
        fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<bool> {
            (0..self.0).map(|_| rng.random_bool(0.5)).collect()
        }
    }

    impl GeneticProblem for OneMax {
        fn crossover<R: Rng + ?Sized>(
            &self,
            first: &Vec<bool>,
            second: &Vec<bool>,
            rng: &mut R,
        ) -> (Vec<bool>, Vec<bool>) {
            single_point_crossover(first, second, rng)
        }

        fn mutate<R: Rng + ?Sized>(&self, state: &Vec<bool>, rng: &mut R) -> Vec<bool> {
            point_mutation(state, rng, |rng| rng.random_bool(0.5))
        }

        fn max_value(&self) -> Option<f64> {
            Some(self.0 as f64)
        }
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = vec![0, 0, 0, 0, 0];
        let second = vec![1, 1, 1, 1, 1];
        let (a, b) = single_point_crossover(&first, &second, &mut rng);
        assert_eq!(a.len(), 5);
        assert_eq!(b.len(), 5);
        let cut = a.iter().position(|g| *g == 1).unwrap();
        assert!((1..5).contains(&cut));
        assert!(a[..cut].iter().all(|g| *g == 0) && a[cut..].iter().all(|g| *g == 1));
        assert!(b[..cut].iter().all(|g| *g == 1) && b[cut..].iter().all(|g| *g == 0));
    }

    #[test]
    fn test_point_mutation_changes_at_most_one_gene() {
        let mut rng = StdRng::seed_from_u64(3);
        let genes = vec![0u8; 8];
        let mutated = point_mutation(&genes, &mut rng, |_| 9);
        assert_eq!(mutated.len(), 8);
        assert_eq!(mutated.iter().filter(|g| **g == 9).count(), 1);
    }

    #[test]
    fn test_tournament_prefers_fitter_individuals() {
        let mut rng = StdRng::seed_from_u64(11);
        let scores = [0.0, 0.0, 0.0, 10.0];
        let wins = (0..1000)
            .filter(|_| tournament_select(&scores, 3, &mut rng) == 3)
            .count();
        // 1 - (3/4)^3 ≈ 0.58 of tournaments include the champion.
        assert!(wins > 450, "champion won only {wins} tournaments");
    }

    #[test]
    fn test_evolve_keeps_population_size() {
        let mut rng = StdRng::seed_from_u64(5);
        let problem = OneMax(6);
        let population = Population::random(&problem, 7, &mut rng);
        let scores = population.scores(&problem);
        let next = population.evolve(&problem, &scores, &GeneticConfig::default(), &mut rng);
        assert_eq!(next.individuals.len(), 7);
        assert_eq!(next.generation, 1);
        assert!(next.individuals.iter().all(|s| s.len() == 6));
    }

    #[test]
    fn test_genetic_solves_onemax() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = GeneticConfig::default()
            .with_population_size(50)
            .with_generations(500);
        let outcome = genetic(&OneMax(12), &config, &mut rng);
        assert!(outcome.is_goal);
        assert_eq!(outcome.value, 12.0);
    }

    #[test]
    fn test_zero_generations_reports_best_of_initial_population() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = GeneticConfig::default()
            .with_population_size(4)
            .with_generations(0);
        let outcome = genetic(&OneMax(30), &config, &mut rng);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.state.len(), 30);
    }
}
