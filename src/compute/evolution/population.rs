//! Individuals, populations, and rank-proportional selection pools.

use crate::compute::{PixelBuffer, ShapeMismatch};

use super::fitness::FitnessEvaluator;
use super::genome::PixelRng;

/// A buffer paired with its distance to the target.
///
/// Only constructed through [`Individual::evaluate`], so the score always
/// matches the owned buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    buffer: PixelBuffer,
    score: u64,
}

impl Individual {
    /// Score `buffer` against the evaluator's target.
    pub fn evaluate(
        buffer: PixelBuffer,
        evaluator: &FitnessEvaluator,
    ) -> Result<Self, ShapeMismatch> {
        let score = evaluator.score(&buffer)?;
        Ok(Self { buffer, score })
    }

    /// Fresh individual with uniformly random bytes.
    pub fn random(rng: &mut PixelRng, evaluator: &FitnessEvaluator) -> Result<Self, ShapeMismatch> {
        let buffer = rng.random_buffer(evaluator.target());
        Self::evaluate(buffer, evaluator)
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
}

/// Ordered collection of individuals for one generation.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Individual>,
}

impl Population {
    /// `size` independently randomized individuals.
    pub fn random(
        size: usize,
        rng: &mut PixelRng,
        evaluator: &FitnessEvaluator,
    ) -> Result<Self, ShapeMismatch> {
        let members = (0..size)
            .map(|_| Individual::random(rng, evaluator))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { members })
    }

    pub fn from_members(members: Vec<Individual>) -> Self {
        Self { members }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    /// Index of the lowest-scoring member; the first one wins ties.
    pub fn best_index(&self) -> Option<usize> {
        self.members
            .iter()
            .enumerate()
            .min_by_key(|(_, ind)| ind.score)
            .map(|(i, _)| i)
    }

    pub fn best(&self) -> Option<&Individual> {
        self.best_index().map(|i| &self.members[i])
    }

    /// Mean score, or 0 for an empty population.
    pub fn average_score(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.members.iter().map(|m| m.score as f64).sum::<f64>() / self.members.len() as f64
    }

    /// Stable sort, best (lowest score) first.
    pub fn sort_by_score(&mut self) {
        self.members.sort_by_key(|m| m.score);
    }

    /// Build the selection pool for this generation.
    ///
    /// Sorts the population best-first, then see [`Population::ranked_pool`].
    pub fn selection_pool(&mut self, pool_size: usize) -> Vec<&Individual> {
        self.sort_by_score();
        self.ranked_pool(pool_size)
    }

    /// Pool from an already sorted population.
    ///
    /// Duplicates each of the first `pool_size` members `worst - score` times,
    /// where `worst` is the score of the member at index `pool_size`. That
    /// boundary member is never duplicated itself. When the boundary ties with
    /// the best member no ranking is possible and every member is returned
    /// once.
    ///
    /// Requires `pool_size < self.len()` and a prior [`Population::sort_by_score`].
    pub fn ranked_pool(&self, pool_size: usize) -> Vec<&Individual> {
        debug_assert!(pool_size < self.members.len());
        debug_assert!(self.members.is_sorted_by_key(|m| m.score));

        let top = &self.members[..=pool_size];
        let worst = top[pool_size].score;

        if worst - top[0].score == 0 {
            return self.members.iter().collect();
        }

        let total: u64 = top[..pool_size].iter().map(|m| worst - m.score).sum();
        let mut pool = Vec::with_capacity(total as usize);
        for member in &top[..pool_size] {
            let copies = (worst - member.score) as usize;
            pool.extend(std::iter::repeat_n(member, copies));
        }
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> FitnessEvaluator {
        FitnessEvaluator::new(PixelBuffer::new(1, 1, vec![0; 4]).unwrap())
    }

    /// Individual whose distance to the all-zero 1x1 target is exactly `score`.
    fn with_score(score: u8, evaluator: &FitnessEvaluator) -> Individual {
        let buffer = PixelBuffer::new(1, 1, vec![score, 0, 0, 0]).unwrap();
        let ind = Individual::evaluate(buffer, evaluator).unwrap();
        assert_eq!(ind.score(), score as u64);
        ind
    }

    fn population(scores: &[u8]) -> Population {
        let evaluator = evaluator();
        Population::from_members(scores.iter().map(|&s| with_score(s, &evaluator)).collect())
    }

    #[test]
    fn test_random_population_size() {
        let evaluator = evaluator();
        let mut rng = PixelRng::new(1);
        let pop = Population::random(12, &mut rng, &evaluator).unwrap();
        assert_eq!(pop.len(), 12);
        for member in pop.members() {
            assert_eq!(member.score(), evaluator.score(member.buffer()).unwrap());
        }
    }

    #[test]
    fn test_best_is_minimum() {
        let pop = population(&[30, 5, 17, 5, 90]);
        assert_eq!(pop.best_index(), Some(1));
        assert_eq!(pop.best().unwrap().score(), 5);
        assert!((pop.average_score() - 29.4).abs() < 1e-9);
    }

    #[test]
    fn test_pool_duplication_counts() {
        let mut pop = population(&[20, 15, 10, 18, 12]);
        let pool = pop.selection_pool(3);

        assert_eq!(pool.len(), 17);
        let count = |s: u64| pool.iter().filter(|m| m.score() == s).count();
        assert_eq!(count(10), 8);
        assert_eq!(count(12), 6);
        assert_eq!(count(15), 3);
        assert_eq!(count(18), 0);
        assert_eq!(count(20), 0);
        // Best-first ordering within the pool.
        assert_eq!(pool[0].score(), 10);
        assert_eq!(pool[16].score(), 15);
    }

    #[test]
    fn test_pool_members_tied_with_boundary_get_no_copies() {
        let mut pop = population(&[4, 9, 9, 9, 1]);
        let pool = pop.selection_pool(3);
        // worst = 9; 4 gets 5 copies, the 9 before the boundary gets none.
        assert_eq!(pool.len(), 8 + 5);
        assert!(pool.iter().all(|m| m.score() < 9));
    }

    #[test]
    fn test_degenerate_pool_returns_population() {
        let mut pop = population(&[7, 7, 7, 7, 3]);
        // Sorted: [3, 7, 7, 7, 7]; top[0] = 3, top[1] = 7, not degenerate.
        assert_eq!(pop.selection_pool(1).len(), 4);

        let mut pop = population(&[7, 7, 7, 30, 40]);
        let pool = pop.selection_pool(2);
        assert_eq!(pool.len(), 5);
        let scores: Vec<u64> = pool.iter().map(|m| m.score()).collect();
        assert_eq!(scores, vec![7, 7, 7, 30, 40]);
    }

    #[test]
    fn test_sort_is_stable() {
        let evaluator = evaluator();
        // Two distinct buffers with the same score.
        let a = Individual::evaluate(PixelBuffer::new(1, 1, vec![5, 0, 0, 0]).unwrap(), &evaluator)
            .unwrap();
        let b = Individual::evaluate(PixelBuffer::new(1, 1, vec![0, 5, 0, 0]).unwrap(), &evaluator)
            .unwrap();
        let c = with_score(9, &evaluator);
        let mut pop = Population::from_members(vec![c, a.clone(), b.clone()]);

        let pool = pop.selection_pool(2);
        // worst = 9, a and b each 4 copies, a first.
        assert_eq!(pool.len(), 8);
        assert_eq!(*pool[0], a);
        assert_eq!(*pool[4], b);
    }
}
