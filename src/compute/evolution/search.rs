//! Generation loop driving a population toward the target.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::compute::PixelBuffer;
use crate::schema::{
    EvolutionConfig, EvolutionHistory, EvolutionStats, GenerationProgress, StopReason,
};

use super::EvolutionError;
use super::fitness::FitnessEvaluator;
use super::genome::PixelRng;
use super::population::{Individual, Population};

/// Final result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best individual of the terminal generation.
    pub best: Individual,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Per-generation history.
    pub history: EvolutionHistory,
}

/// Evolution engine that runs the search.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: PixelRng,
    evaluator: FitnessEvaluator,
    population: Population,
    history: EvolutionHistory,
    generation: usize,
    cancelled: Arc<AtomicBool>,
}

impl EvolutionEngine {
    /// Create a new evolution engine for `target`.
    ///
    /// The configuration is validated here, before any population exists.
    pub fn new(config: EvolutionConfig, target: PixelBuffer) -> Result<Self, EvolutionError> {
        config.validate()?;

        let rng = match config.random_seed {
            Some(seed) => PixelRng::new(seed),
            None => PixelRng::random(),
        };

        Ok(Self {
            config,
            rng,
            evaluator: FitnessEvaluator::new(target),
            population: Population::default(),
            history: EvolutionHistory::default(),
            generation: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get cancellation handle. Checked between generations.
    ///
    /// Cancellation is permanent for this engine: the flag is never cleared,
    /// so every later run stops at its first generation.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn target(&self) -> &PixelBuffer {
        self.evaluator.target()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Index of the generation currently held (0 before initialization).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current best individual, if a population exists.
    pub fn best(&self) -> Option<&Individual> {
        self.population.best()
    }

    /// Replace the population with `population_size` random individuals.
    pub fn initialize(&mut self) -> Result<(), EvolutionError> {
        self.population =
            Population::random(self.config.population_size, &mut self.rng, &self.evaluator)?;
        self.history = EvolutionHistory::default();
        self.generation = 0;
        Ok(())
    }

    /// Check if evolution should stop before breeding from the current population.
    fn should_stop(&self, best_score: u64, start: &Instant) -> Option<StopReason> {
        if best_score < self.config.fitness_limit {
            return Some(StopReason::Converged);
        }

        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }

        if let Some(max) = self.config.max_generations
            && self.generation >= max
        {
            return Some(StopReason::MaxGenerations);
        }

        if let Some(limit) = self.config.time_limit_secs
            && start.elapsed().as_secs_f64() >= limit
        {
            return Some(StopReason::TimeLimit);
        }

        None
    }

    /// Breed the next population from the current one.
    ///
    /// Child seeds are drawn sequentially from the engine RNG, so the outcome
    /// for a given `random_seed` does not depend on rayon's scheduling.
    fn breed_generation<F>(&mut self, start: &Instant, callback: &mut F) -> Result<(), EvolutionError>
    where
        F: FnMut(&GenerationProgress, &Individual),
    {
        let seeds: Vec<u64> = (0..self.config.population_size)
            .map(|_| self.rng.next_seed())
            .collect();

        self.population.sort_by_score();
        let pool = self.population.ranked_pool(self.config.pool_size);

        let progress = GenerationProgress {
            generation: self.generation,
            best_score: self.population.members()[0].score(),
            avg_score: self.population.average_score(),
            pool_size: pool.len(),
            elapsed_seconds: start.elapsed().as_secs_f64(),
        };
        log::debug!(
            "generation {}: best={} avg={:.1} pool={}",
            progress.generation,
            progress.best_score,
            progress.avg_score,
            progress.pool_size
        );
        self.history.record(&progress);
        callback(&progress, &self.population.members()[0]);

        let evaluator = &self.evaluator;
        let mutation_rate = self.config.mutation_rate;
        let pool = &pool;

        let children = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = PixelRng::new(seed);
                let parent_a = pool[rng.index(pool.len())];
                let parent_b = pool[rng.index(pool.len())];

                let mut child = rng.breed(parent_a.buffer(), parent_b.buffer())?;
                rng.mutate(&mut child, mutation_rate);
                Individual::evaluate(child, evaluator)
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.population = Population::from_members(children);
        Ok(())
    }

    /// Run evolution, reporting each bred generation to `callback` along with
    /// its best individual.
    ///
    /// The callback fires after the pool is built and before breeding, so the
    /// terminal generation, which is never bred, is not reported. Its best
    /// individual is returned in [`EvolutionResult::best`].
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Result<EvolutionResult, EvolutionError>
    where
        F: FnMut(&GenerationProgress, &Individual),
    {
        let start = Instant::now();
        self.initialize()?;

        let (stop_reason, best) = loop {
            self.generation += 1;

            let best = self
                .population
                .best()
                .ok_or(EvolutionError::EmptyPopulation)?;

            if let Some(reason) = self.should_stop(best.score(), &start) {
                break (reason, best.clone());
            }

            self.breed_generation(&start, &mut callback)?;
        };

        let stats = EvolutionStats {
            generations: self.generation,
            best_score: best.score(),
            elapsed_seconds: start.elapsed().as_secs_f64(),
            stop_reason,
        };
        log::info!(
            "evolution stopped ({:?}) after {} generations, best={}",
            stats.stop_reason,
            stats.generations,
            stats.best_score
        );

        Ok(EvolutionResult {
            best,
            stats,
            history: self.history.clone(),
        })
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> Result<EvolutionResult, EvolutionError> {
        self.run_with_callback(|_, _| {})
    }
}
