//! Progress and result types reported by the evolution engine.

use serde::{Deserialize, Serialize};

/// Progress update emitted once per generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationProgress {
    /// Generation index, starting at 1.
    pub generation: usize,
    /// Lowest distance in the current population.
    pub best_score: u64,
    /// Mean distance of the current population.
    pub avg_score: f64,
    /// Number of entries in this generation's selection pool.
    pub pool_size: usize,
    /// Seconds since the run started.
    pub elapsed_seconds: f64,
}

/// Per-generation statistics for plotting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionHistory {
    /// Best distance per generation.
    pub best_score: Vec<u64>,
    /// Mean distance per generation.
    pub avg_score: Vec<f64>,
    /// Selection pool length per generation.
    pub pool_size: Vec<usize>,
}

impl EvolutionHistory {
    pub(crate) fn record(&mut self, progress: &GenerationProgress) {
        self.best_score.push(progress.best_score);
        self.avg_score.push(progress.avg_score);
        self.pool_size.push(progress.pool_size);
    }
}

/// Statistics from an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Generations evaluated, including the terminal one.
    pub generations: usize,
    /// Distance of the returned individual.
    pub best_score: u64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Reason evolution stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Best distance fell below the fitness limit.
    Converged,
    /// Reached the configured generation cap.
    MaxGenerations,
    /// Reached the configured wall-clock limit.
    TimeLimit,
    /// Cancelled through the engine's cancel handle.
    Cancelled,
}
