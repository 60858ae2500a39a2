//! Pixel Evolve - Genetic algorithm image reconstruction.
//!
//! This crate evolves a population of random RGBA buffers toward a target
//! image. Each generation ranks individuals by their Euclidean byte distance
//! to the target, duplicates the best of them into a selection pool, and
//! breeds the next generation with single-point crossover and per-byte
//! mutation.
//!
//! # Architecture
//!
//! The crate is split into three main modules:
//!
//! - `schema`: Run configuration and progress/result types
//! - `compute`: Pixel buffers and the evolutionary engine
//! - `snapshot`: Target decoding and snapshot encoding
//!
//! # Example
//!
//! ```rust,no_run
//! use pixel_evolve::{
//!     compute::evolution::EvolutionEngine,
//!     schema::EvolutionConfig,
//!     snapshot::{load_target, save_snapshot},
//! };
//!
//! let target = load_target("target.png").unwrap();
//! let mut engine = EvolutionEngine::new(EvolutionConfig::default(), target).unwrap();
//!
//! let result = engine.run().unwrap();
//! save_snapshot("best.png", result.best.buffer()).unwrap();
//!
//! println!("Best distance after {} generations: {}",
//!     result.stats.generations, result.stats.best_score);
//! ```

pub mod compute;
pub mod schema;
pub mod snapshot;

// Re-export commonly used types
pub use compute::PixelBuffer;
pub use compute::evolution::{EvolutionEngine, EvolutionError, EvolutionResult, Individual};
pub use schema::{EvolutionConfig, GenerationProgress, StopReason};
