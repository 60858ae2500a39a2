//! Compute module - Pixel buffers and the evolutionary engine.

mod buffer;

pub mod evolution;

pub use buffer::*;
