//! Configuration types for the local search algorithms.
//!
//! Every config has sensible defaults, builder-style setters and can be
//! loaded from a JSON file, so command-line runs can be reproduced exactly.
//!
//! # Examples
//!
//! ```
//! use ailab::config::{AnnealingConfig, LocalSearchConfig};
//!
//! let config = LocalSearchConfig::default()
//!     .with_seed(42)
//!     .with_annealing(AnnealingConfig::default().with_iterations(5_000));
//! assert!(config.validate().is_ok());
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Steepest-ascent hill climbing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HillClimbingConfig {
    /// Upper bound on improving moves
    pub max_iterations: usize,
    /// Independent runs for random-restart hill climbing
    pub restarts: usize,
}

impl HillClimbingConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }
}

impl Default for HillClimbingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1_000,
            restarts: 20,
        }
    }
}

/// Simulated annealing parameters.
///
/// The temperature at iteration `i` is
/// `initial_temperature * exp(-cooling_rate * i)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    pub iterations: usize,
    pub initial_temperature: f64,
    pub cooling_rate: f64,
}

impl AnnealingConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Temperature at the given iteration.
    pub fn temperature(&self, iteration: usize) -> f64 {
        self.initial_temperature * (-self.cooling_rate * iteration as f64).exp()
    }
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            initial_temperature: 20.0,
            cooling_rate: 0.005,
        }
    }
}

/// Genetic search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    /// Probability that a child is mutated
    pub mutation_rate: f64,
    pub generations: usize,
    /// Individuals sampled per tournament
    pub tournament_size: usize,
}

impl GeneticConfig {
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 0.1,
            generations: 1_000,
            tournament_size: 3,
        }
    }
}

/// Combined configuration for every local search method.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSearchConfig {
    pub hill_climbing: HillClimbingConfig,
    pub annealing: AnnealingConfig,
    pub genetic: GeneticConfig,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl LocalSearchConfig {
    pub fn with_hill_climbing(mut self, config: HillClimbingConfig) -> Self {
        self.hill_climbing = config;
        self
    }

    pub fn with_annealing(mut self, config: AnnealingConfig) -> Self {
        self.annealing = config;
        self
    }

    pub fn with_genetic(mut self, config: GeneticConfig) -> Self {
        self.genetic = config;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid JSON, or holds
    /// values rejected by [`LocalSearchConfig::validate`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config file '{}'", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if self.hill_climbing.restarts == 0 {
            return invalid("hill_climbing.restarts must be at least 1".to_string());
        }
        let annealing = &self.annealing;
        if !(annealing.initial_temperature.is_finite() && annealing.initial_temperature > 0.0) {
            return invalid(format!(
                "annealing.initial_temperature must be positive and finite, got {}",
                annealing.initial_temperature
            ));
        }
        if !(annealing.cooling_rate.is_finite() && annealing.cooling_rate >= 0.0) {
            return invalid(format!(
                "annealing.cooling_rate must be non-negative and finite, got {}",
                annealing.cooling_rate
            ));
        }
        let genetic = &self.genetic;
        if genetic.population_size < 2 {
            return invalid(format!(
                "genetic.population_size must be at least 2, got {}",
                genetic.population_size
            ));
        }
        if !(0.0..=1.0).contains(&genetic.mutation_rate) {
            return invalid(format!(
                "genetic.mutation_rate must be within [0, 1], got {}",
                genetic.mutation_rate
            ));
        }
        if genetic.tournament_size == 0 {
            return invalid("genetic.tournament_size must be at least 1".to_string());
        }
        Ok(())
    }
}
