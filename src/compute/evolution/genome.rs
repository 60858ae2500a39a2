//! Genetic operators over pixel buffers.
//!
//! Provides random generation, crossover, and mutation operations.

use rand::prelude::*;

use crate::compute::{PixelBuffer, ShapeMismatch};

/// Random number generator wrapper for buffer operations.
pub struct PixelRng {
    rng: StdRng,
}

impl PixelRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Buffer with the shape of `template`, every byte uniform in [0, 255].
    pub fn random_buffer(&mut self, template: &PixelBuffer) -> PixelBuffer {
        let mut buffer = PixelBuffer::zeroed_like(template);
        self.rng.fill_bytes(buffer.samples_mut());
        buffer
    }

    /// Single-point crossover with a uniformly drawn cut in `[0, len)`.
    pub fn breed(
        &mut self,
        parent_a: &PixelBuffer,
        parent_b: &PixelBuffer,
    ) -> Result<PixelBuffer, ShapeMismatch> {
        let mid = self.rng.gen_range(0..parent_a.len());
        crossover_at(parent_a, parent_b, mid)
    }

    /// Replace each byte, with probability `rate`, by a fresh uniform draw.
    pub fn mutate(&mut self, buffer: &mut PixelBuffer, rate: f64) {
        if rate <= 0.0 {
            return;
        }
        for sample in buffer.samples_mut() {
            if self.rng.r#gen::<f64>() < rate {
                *sample = self.rng.r#gen();
            }
        }
    }

    /// Pick an index uniformly in `[0, len)`.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Generate next u64 for seeding child RNGs.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }
}

/// Child takes `parent_a`'s bytes after `mid` and `parent_b`'s bytes up to and
/// including `mid`.
///
/// The cut is byte granular, so it may split one pixel's channels between the
/// two parents. A `mid` at or past the end takes every byte from `parent_b`.
pub fn crossover_at(
    parent_a: &PixelBuffer,
    parent_b: &PixelBuffer,
    mid: usize,
) -> Result<PixelBuffer, ShapeMismatch> {
    parent_a.ensure_same_shape(parent_b)?;

    let mut child = PixelBuffer::zeroed_like(parent_a);
    let split = mid.saturating_add(1).min(child.len());
    let (head, tail) = child.samples_mut().split_at_mut(split);
    head.copy_from_slice(&parent_b.samples()[..split]);
    tail.copy_from_slice(&parent_a.samples()[split..]);
    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(value: u8) -> PixelBuffer {
        PixelBuffer::new(2, 2, vec![value; 16]).unwrap()
    }

    #[test]
    fn test_random_buffer_shape() {
        let mut rng = PixelRng::new(42);
        let template = filled(0);
        let buffer = rng.random_buffer(&template);
        assert_eq!(buffer.shape(), template.shape());
        // 16 random bytes all zero has probability 256^-16.
        assert_ne!(buffer, template);
    }

    #[test]
    fn test_crossover_at() {
        let a = filled(1);
        let b = filled(2);

        for mid in 0..16 {
            let child = crossover_at(&a, &b, mid).unwrap();
            assert_eq!(child.len(), 16);
            for (i, &s) in child.samples().iter().enumerate() {
                let expected = if i > mid { 1 } else { 2 };
                assert_eq!(s, expected, "mid={mid} i={i}");
            }
        }
    }

    #[test]
    fn test_crossover_splits_pixel() {
        let a = filled(1);
        let b = filled(2);
        let child = crossover_at(&a, &b, 1).unwrap();
        assert_eq!(child.pixel(0, 0), Some([2, 2, 1, 1]));
    }

    #[test]
    fn test_crossover_at_shape_mismatch() {
        let small = filled(1);
        let large = PixelBuffer::new(4, 2, vec![2; 32]).unwrap();

        // Longer first parent with a cut past the shorter one's end.
        let err = crossover_at(&large, &small, 20).unwrap_err();
        assert_eq!(err.expected, large.shape());
        assert_eq!(err.found, small.shape());
        assert!(crossover_at(&small, &large, 3).is_err());

        // Same length, different extent.
        let wide = PixelBuffer::new(4, 1, vec![2; 16]).unwrap();
        assert!(crossover_at(&small, &wide, 3).is_err());
    }

    #[test]
    fn test_crossover_at_cut_past_end() {
        let child = crossover_at(&filled(1), &filled(2), 100).unwrap();
        assert!(child.samples().iter().all(|&s| s == 2));
    }

    #[test]
    fn test_breed_mixes_parents() {
        let mut rng = PixelRng::new(7);
        let a = filled(1);
        let b = filled(2);
        for _ in 0..50 {
            let child = rng.breed(&a, &b).unwrap();
            // Position 0 is always <= mid.
            assert_eq!(child.samples()[0], 2);
            let first_a = child.samples().iter().position(|&s| s == 1);
            if let Some(p) = first_a {
                assert!(child.samples()[p..].iter().all(|&s| s == 1));
            }
        }
    }

    #[test]
    fn test_breed_shape_mismatch() {
        let mut rng = PixelRng::new(7);
        let a = filled(1);
        let b = PixelBuffer::new(1, 4, vec![0; 16]).unwrap();
        assert!(rng.breed(&a, &b).is_err());
    }

    #[test]
    fn test_mutation_rate_zero() {
        let mut rng = PixelRng::new(42);
        let original = rng.random_buffer(&filled(0));
        let mut buffer = original.clone();
        rng.mutate(&mut buffer, 0.0);
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_mutation_rate_one() {
        let mut rng = PixelRng::new(42);
        let original = filled(9);
        let mut buffer = original.clone();
        // Every byte is redrawn; equality with the original is possible but
        // vanishingly unlikely for a fixed seed.
        rng.mutate(&mut buffer, 1.0);
        assert_ne!(buffer, original);
    }

    #[test]
    fn test_deterministic_seed() {
        let template = filled(0);
        let a = PixelRng::new(3).random_buffer(&template);
        let b = PixelRng::new(3).random_buffer(&template);
        assert_eq!(a, b);
    }
}
