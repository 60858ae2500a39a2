//! Distance-based fitness for pixel buffers.
//!
//! Scores are distances: lower means closer to the target, 0 means identical.

use crate::compute::{PixelBuffer, ShapeMismatch};

/// Euclidean distance between the byte sequences of two buffers.
///
/// Squared differences are accumulated in `u64`, then reduced with a floor
/// integer square root.
pub fn distance(a: &PixelBuffer, b: &PixelBuffer) -> Result<u64, ShapeMismatch> {
    a.ensure_same_shape(b)?;
    Ok(squared_distance(a.samples(), b.samples()).isqrt())
}

#[inline]
fn squared_distance(a: &[u8], b: &[u8]) -> u64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = u64::from(x.abs_diff(y));
            d * d
        })
        .sum()
}

/// Scores candidate buffers against a fixed target.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    target: PixelBuffer,
}

impl FitnessEvaluator {
    /// Create an evaluator that owns the target.
    pub fn new(target: PixelBuffer) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &PixelBuffer {
        &self.target
    }

    /// Distance from `candidate` to the target.
    pub fn score(&self, candidate: &PixelBuffer) -> Result<u64, ShapeMismatch> {
        distance(&self.target, candidate)
    }
}
