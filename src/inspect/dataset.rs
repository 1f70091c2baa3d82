//! Dataset collaborator seam and the sequential collection loop
//!
//! The real dataset loader (image decoding, augmentation, batching) lives in
//! the external training stack; the audit only needs the orientation label of
//! each sample. Sources are pulled one sample at a time, end to end, in
//! index order.

use crate::config::LaunchConfig;
use crate::error::{Error, Result};
use crate::logging::{log, LogLevel};
use ndarray::Array2;
use std::path::Path;

/// Sequential access to per-sample orientation labels
pub trait OrientationSource {
    /// Number of samples in the (possibly size-limited) dataset
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Orientation quaternion `(qx, qy, qz, qw)` of the sample at `index`
    fn orientation(&self, index: usize) -> Result<[f64; 4]>;
}

/// Opens orientation sources for a dataset split
pub trait DatasetProvider {
    /// Open the dataset folder for `split`
    ///
    /// `sample_size` limits how many samples are served; `-1` (or any value
    /// at least the dataset size) means the full dataset.
    fn open(
        &self,
        config: &LaunchConfig,
        data_root: &Path,
        split: &str,
        folder: &str,
        sample_size: i64,
    ) -> Result<Box<dyn OrientationSource>>;
}

/// A source backed by an already collected list of orientations
pub struct InMemorySource {
    orientations: Vec<[f64; 4]>,
}

impl InMemorySource {
    pub fn new(orientations: Vec<[f64; 4]>) -> Self {
        Self { orientations }
    }
}

impl OrientationSource for InMemorySource {
    fn len(&self) -> usize {
        self.orientations.len()
    }

    fn orientation(&self, index: usize) -> Result<[f64; 4]> {
        self.orientations
            .get(index)
            .copied()
            .ok_or_else(|| Error::Dataset(format!("sample index {index} out of range")))
    }
}

/// Pull every orientation out of the source, in order
///
/// Reports progress every 100 samples. Fails with [`Error::EmptyDataset`]
/// when the traversal yields nothing.
pub fn collect_orientations(
    source: &dyn OrientationSource,
    level: LogLevel,
) -> Result<Array2<f64>> {
    log(level, LogLevel::Normal, "\n--- Processing Samples ---");

    let mut flat = Vec::with_capacity(source.len() * 4);
    let mut count = 0usize;
    for index in 0..source.len() {
        let orientation = source.orientation(index)?;
        flat.extend_from_slice(&orientation);
        count += 1;
        if count % 100 == 0 {
            log(
                level,
                LogLevel::Normal,
                &format!("Processed {count} samples..."),
            );
        }
    }

    if count == 0 {
        return Err(Error::EmptyDataset);
    }

    Array2::from_shape_vec((count, 4), flat)
        .map_err(|e| Error::Dataset(format!("orientation collection shape error: {e}")))
}
