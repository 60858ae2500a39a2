//! Schema module - Configuration and progress types for evolutionary runs.

mod config;
mod progress;

pub use config::*;
pub use progress::*;
