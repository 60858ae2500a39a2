//! RGBA pixel buffers: the genetic material evolved by the engine.

use serde::{Deserialize, Serialize};

/// Number of byte samples per pixel (red, green, blue, alpha).
pub const CHANNELS: usize = 4;

/// Rectangular extent of a buffer in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    /// Number of pixels covered by the extent.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Structural description of a buffer. Two buffers can only be compared or
/// crossed when their shapes are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    /// Total byte samples.
    pub len: usize,
    /// Bytes per row.
    pub stride: usize,
    /// Extent in pixels.
    pub extent: Extent,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} (stride {}, {} bytes)",
            self.extent.width, self.extent.height, self.stride, self.len
        )
    }
}

/// Two buffers with different shapes met in a distance or crossover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Buffer shape mismatch: expected {expected}, found {found}")]
pub struct ShapeMismatch {
    pub expected: Shape,
    pub found: Shape,
}

/// Buffer construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("Buffer extent must be non-zero, got {width}x{height}")]
    EmptyExtent { width: u32, height: u32 },
    #[error("Stride {stride} does not match width {width} ({expected} bytes per row)")]
    InvalidStride {
        stride: usize,
        width: u32,
        expected: usize,
    },
    #[error("Expected {expected} samples for extent, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// A tightly packed RGBA8 buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    samples: Vec<u8>,
    stride: usize,
    extent: Extent,
}

impl PixelBuffer {
    /// Wrap raw RGBA samples of a `width` x `height` image.
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, BufferError> {
        Self::from_parts(samples, width as usize * CHANNELS, Extent { width, height })
    }

    /// Build from samples, stride and extent, validating all three agree.
    pub fn from_parts(samples: Vec<u8>, stride: usize, extent: Extent) -> Result<Self, BufferError> {
        if extent.width == 0 || extent.height == 0 {
            return Err(BufferError::EmptyExtent {
                width: extent.width,
                height: extent.height,
            });
        }

        let row_bytes = extent.width as usize * CHANNELS;
        if stride != row_bytes {
            return Err(BufferError::InvalidStride {
                stride,
                width: extent.width,
                expected: row_bytes,
            });
        }

        let expected = stride * extent.height as usize;
        if samples.len() != expected {
            return Err(BufferError::InvalidLength {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            samples,
            stride,
            extent,
        })
    }

    /// Zero-filled buffer with the same shape as `other`.
    pub fn zeroed_like(other: &PixelBuffer) -> Self {
        Self {
            samples: vec![0; other.samples.len()],
            stride: other.stride,
            extent: other.extent,
        }
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    #[inline]
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a validated buffer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn shape(&self) -> Shape {
        Shape {
            len: self.samples.len(),
            stride: self.stride,
            extent: self.extent,
        }
    }

    /// Check `other` has exactly this buffer's shape.
    pub fn ensure_same_shape(&self, other: &PixelBuffer) -> Result<(), ShapeMismatch> {
        let (expected, found) = (self.shape(), other.shape());
        if expected == found {
            Ok(())
        } else {
            Err(ShapeMismatch { expected, found })
        }
    }

    /// RGBA channels of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; CHANNELS]> {
        if x >= self.extent.width || y >= self.extent.height {
            return None;
        }
        let offset = y as usize * self.stride + x as usize * CHANNELS;
        let mut rgba = [0u8; CHANNELS];
        rgba.copy_from_slice(&self.samples[offset..offset + CHANNELS]);
        Some(rgba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let buf = PixelBuffer::new(2, 3, vec![0; 24]).unwrap();
        assert_eq!(buf.len(), 24);
        assert_eq!(buf.stride(), 8);
        assert_eq!(buf.extent().pixel_count(), 6);
    }

    #[test]
    fn test_rejects_bad_length() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            BufferError::InvalidLength {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_rejects_empty_extent() {
        assert!(matches!(
            PixelBuffer::new(0, 4, Vec::new()),
            Err(BufferError::EmptyExtent { .. })
        ));
    }

    #[test]
    fn test_rejects_padded_stride() {
        let extent = Extent {
            width: 2,
            height: 1,
        };
        assert!(matches!(
            PixelBuffer::from_parts(vec![0; 12], 12, extent),
            Err(BufferError::InvalidStride { .. })
        ));
    }

    #[test]
    fn test_shape_mismatch() {
        let a = PixelBuffer::new(2, 2, vec![0; 16]).unwrap();
        let b = PixelBuffer::new(4, 1, vec![0; 16]).unwrap();

        // Same length, different extent.
        let err = a.ensure_same_shape(&b).unwrap_err();
        assert_eq!(err.expected, a.shape());
        assert_eq!(err.found, b.shape());
        assert!(a.ensure_same_shape(&PixelBuffer::zeroed_like(&a)).is_ok());
    }

    #[test]
    fn test_pixel_access() {
        let samples: Vec<u8> = (0..16).collect();
        let buf = PixelBuffer::new(2, 2, samples).unwrap();
        assert_eq!(buf.pixel(1, 1), Some([12, 13, 14, 15]));
        assert_eq!(buf.pixel(2, 0), None);
    }
}
