//! Image I/O at the edge of the engine.
//!
//! Decodes the target image into a [`PixelBuffer`](crate::compute::PixelBuffer)
//! and encodes the best buffer back to disk for progress inspection. The
//! engine itself never touches the filesystem.

mod codec;
mod recorder;

use std::path::PathBuf;

use crate::compute::BufferError;

pub use codec::{load_target, save_snapshot};
pub use recorder::SnapshotRecorder;

/// Image file errors.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Cannot encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Decoded image is not a valid buffer: {0}")]
    Buffer(#[from] BufferError),
}
