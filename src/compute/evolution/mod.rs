//! Evolutionary search over pixel buffers.
//!
//! # Overview
//!
//! The evolutionary search system consists of:
//!
//! - **Fitness** (`fitness`): Euclidean byte distance to the target
//! - **Genome Operations** (`genome`): Random buffers, crossover, and mutation
//! - **Population** (`population`): Scored individuals and rank-proportional selection pools
//! - **Search** (`search`): The generation loop and its termination policy
//!
//! # Example
//!
//! ```rust,no_run
//! use pixel_evolve::compute::PixelBuffer;
//! use pixel_evolve::compute::evolution::EvolutionEngine;
//! use pixel_evolve::schema::EvolutionConfig;
//!
//! let target = PixelBuffer::new(2, 2, vec![0; 16]).unwrap();
//! let config = EvolutionConfig {
//!     population_size: 50,
//!     pool_size: 10,
//!     fitness_limit: 1,
//!     mutation_rate: 0.01,
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config, target).unwrap();
//! let result = engine
//!     .run_with_callback(|progress, _best| {
//!         println!("Generation {}: best score = {}", progress.generation, progress.best_score);
//!     })
//!     .unwrap();
//!
//! println!("Stopped: {:?}", result.stats.stop_reason);
//! ```
//!
//! # Scoring
//!
//! Scores are distances, so lower is better and the best individual of a
//! generation is the one with the minimum score.

mod fitness;
mod genome;
mod population;
mod search;

use crate::compute::ShapeMismatch;
use crate::schema::ConfigError;

pub use fitness::{FitnessEvaluator, distance};
pub use genome::{PixelRng, crossover_at};
pub use population::{Individual, Population};
pub use search::{EvolutionEngine, EvolutionResult};

/// Errors that abort an evolution run.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),
    #[error("Population is empty")]
    EmptyPopulation,
}
