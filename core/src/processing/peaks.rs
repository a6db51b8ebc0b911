use crate::interface::detection::Peak;
use crate::prelude::{ProcessingError, ProcessingResult};
use crate::telemetry::log::LogManager;
use ndarray::ArrayView2;
use std::cmp::Ordering;

/// Ranks the strongest cells of a `[range_bin, doppler_bin]` magnitude image.
pub struct PeakDetector {
    logger: LogManager,
}

impl PeakDetector {
    pub fn new() -> Self {
        Self {
            logger: LogManager::for_stage("peaks"),
        }
    }

    /// Returns the `count` largest cells in descending strength. Exact ties
    /// go to the lower row-major index.
    pub fn find_top_peaks(
        &self,
        image: ArrayView2<f32>,
        resolution_m: f64,
        count: usize,
    ) -> ProcessingResult<Vec<Peak>> {
        let available = image.len();
        if count > available {
            return Err(ProcessingError::InsufficientData {
                requested: count,
                available,
            });
        }
        if count == 0 {
            return Ok(Vec::new());
        }

        let by_rank = |a: &(usize, f32), b: &(usize, f32)| -> Ordering {
            b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
        };

        let mut cells: Vec<(usize, f32)> = image.iter().copied().enumerate().collect();
        if count < cells.len() {
            cells.select_nth_unstable_by(count - 1, by_rank);
            cells.truncate(count);
        }
        cells.sort_unstable_by(by_rank);

        let columns = image.ncols();
        let peaks: Vec<Peak> = cells
            .into_iter()
            .map(|(flat, strength)| {
                Peak::new(flat / columns, flat % columns, strength, resolution_m)
            })
            .collect();

        for (rank, peak) in peaks.iter().enumerate() {
            self.logger.record(&format!(
                "Signal #{}: Strength={:.1} | Distance: {:.3} m (Bin: {}) | Doppler Bin: {}",
                rank + 1,
                peak.strength,
                peak.distance_m,
                peak.range_bin,
                peak.doppler_bin
            ));
        }
        Ok(peaks)
    }
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self::new()
    }
}
