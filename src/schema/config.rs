//! Configuration types for an evolutionary run.

use serde::{Deserialize, Serialize};

/// Constants fixed for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Individuals per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Top-ranked individuals considered for duplication into the pool.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Stop once the best distance drops strictly below this value.
    #[serde(default = "default_fitness_limit")]
    pub fitness_limit: u64,
    /// Per-byte mutation probability, in [0, 1).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Optional generation cap.
    #[serde(default)]
    pub max_generations: Option<usize>,
    /// Optional wall-clock limit in seconds.
    #[serde(default)]
    pub time_limit_secs: Option<f64>,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Generations between progress snapshots (0 = never).
    #[serde(default = "default_snapshot_interval")]
    pub snapshot_interval: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            pool_size: default_pool_size(),
            fitness_limit: default_fitness_limit(),
            mutation_rate: default_mutation_rate(),
            max_generations: None,
            time_limit_secs: None,
            random_seed: None,
            snapshot_interval: default_snapshot_interval(),
        }
    }
}

fn default_population_size() -> usize {
    250
}
fn default_pool_size() -> usize {
    30
}
fn default_fitness_limit() -> u64 {
    7500
}
fn default_mutation_rate() -> f64 {
    0.0003
}
fn default_snapshot_interval() -> usize {
    100
}

impl EvolutionConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidPopulationSize);
        }
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidPoolSize);
        }
        // The pool boundary element at index `pool_size` must exist.
        if self.pool_size >= self.population_size {
            return Err(ConfigError::PoolTooLarge {
                pool: self.pool_size,
                population: self.population_size,
            });
        }
        if !(0.0..1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if self.max_generations == Some(0) {
            return Err(ConfigError::InvalidMaxGenerations);
        }
        if let Some(limit) = self.time_limit_secs
            && (limit.is_nan() || limit <= 0.0)
        {
            return Err(ConfigError::InvalidTimeLimit(limit));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be positive")]
    InvalidPopulationSize,
    #[error("Pool size must be positive")]
    InvalidPoolSize,
    #[error("Pool size {pool} must be smaller than population size {population}")]
    PoolTooLarge { pool: usize, population: usize },
    #[error("Mutation rate must be in [0, 1), got {0}")]
    InvalidMutationRate(f64),
    #[error("Generation cap must be at least 1")]
    InvalidMaxGenerations,
    #[error("Time limit must be positive, got {0}")]
    InvalidTimeLimit(f64),
}
