//! Periodic snapshots of the best individual during a run.

use std::fs;
use std::path::{Path, PathBuf};

use super::{SnapshotError, save_snapshot};
use crate::compute::PixelBuffer;

/// Writes `evolved<generation>.png` every `interval` generations.
///
/// Usage:
/// ```ignore
/// let mut recorder = SnapshotRecorder::new("out", config.snapshot_interval)?;
/// let result = engine.run_with_callback(|progress, best| {
///     if let Err(e) = recorder.record(progress.generation, best.buffer()) {
///         log::warn!("{e}");
///     }
/// })?;
/// recorder.finalize(result.best.buffer())?;
/// ```
pub struct SnapshotRecorder {
    dir: PathBuf,
    interval: usize,
    written: Vec<PathBuf>,
}

impl SnapshotRecorder {
    /// Create a recorder writing into `dir`, creating it if needed.
    ///
    /// An interval of 0 disables periodic snapshots; `finalize` still writes.
    pub fn new<P: AsRef<Path>>(dir: P, interval: usize) -> Result<Self, SnapshotError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| SnapshotError::Io {
            path: dir.clone(),
            source,
        })?;

        Ok(Self {
            dir,
            interval,
            written: Vec::new(),
        })
    }

    /// Whether `generation` falls on the snapshot interval.
    pub fn is_due(&self, generation: usize) -> bool {
        self.interval > 0 && generation > 0 && generation % self.interval == 0
    }

    /// Save `buffer` if `generation` is due. Returns the written path.
    pub fn record(
        &mut self,
        generation: usize,
        buffer: &PixelBuffer,
    ) -> Result<Option<PathBuf>, SnapshotError> {
        if !self.is_due(generation) {
            return Ok(None);
        }
        let path = self.dir.join(format!("evolved{generation}.png"));
        self.write(&path, buffer)?;
        Ok(Some(path))
    }

    /// Save the final result as `best.png`.
    pub fn finalize(&mut self, buffer: &PixelBuffer) -> Result<PathBuf, SnapshotError> {
        let path = self.dir.join("best.png");
        self.write(&path, buffer)?;
        Ok(path)
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, path: &Path, buffer: &PixelBuffer) -> Result<(), SnapshotError> {
        save_snapshot(path, buffer)?;
        log::info!("Snapshot saved: {:?}", path);
        self.written.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::load_target;
    use tempfile::tempdir;

    fn buffer() -> PixelBuffer {
        PixelBuffer::new(2, 2, (0..16).collect()).unwrap()
    }

    #[test]
    fn test_records_on_interval() {
        let dir = tempdir().unwrap();
        let mut recorder = SnapshotRecorder::new(dir.path().join("run"), 5).unwrap();

        for generation in 1..=20 {
            recorder.record(generation, &buffer()).unwrap();
        }

        // Generations 5, 10, 15, 20
        assert_eq!(recorder.written().len(), 4);
        let last = recorder.written().last().unwrap();
        assert!(last.ends_with("evolved20.png"));
        assert_eq!(load_target(last).unwrap(), buffer());
    }

    #[test]
    fn test_zero_interval_disabled() {
        let dir = tempdir().unwrap();
        let mut recorder = SnapshotRecorder::new(dir.path(), 0).unwrap();

        for generation in 0..10 {
            assert_eq!(recorder.record(generation, &buffer()).unwrap(), None);
        }

        let path = recorder.finalize(&buffer()).unwrap();
        assert!(path.exists());
        assert_eq!(recorder.written(), &[path]);
    }
}
