//! Image file decoding and encoding for pixel buffers.

use std::fs;
use std::path::Path;

use image::{ColorType, ImageError};

use super::SnapshotError;
use crate::compute::PixelBuffer;

/// Decode an image file into an RGBA8 buffer.
///
/// Any format `image` can sniff from the file contents is accepted and
/// converted to RGBA8.
pub fn load_target<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, SnapshotError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = image::load_from_memory(&bytes).map_err(|source| SnapshotError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let buffer = PixelBuffer::new(width, height, rgba.into_raw())?;

    log::info!("Loaded target {:?}: {}", path, buffer.shape());
    Ok(buffer)
}

/// Encode `buffer` to `path`, format chosen by the file extension.
pub fn save_snapshot<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let extent = buffer.extent();

    image::save_buffer(
        path,
        buffer.samples(),
        extent.width,
        extent.height,
        ColorType::Rgba8,
    )
    .map_err(|err| match err {
        ImageError::IoError(source) => SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        },
        source => SnapshotError::Encode {
            path: path.to_path_buf(),
            source,
        },
    })
}
