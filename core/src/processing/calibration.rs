use crate::interface::capture::RadarParameters;
use crate::prelude::{ProcessingError, ProcessingResult};
use serde::{Deserialize, Serialize};

/// Propagation speed used for the range scale, in m/s.
pub const SPEED_OF_LIGHT: f64 = 3e8;

/// Range-bin scale and sweep bandwidth of a chirp configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CalibrationResult {
    pub resolution_m: f64,
    pub bandwidth_hz: f64,
}

impl CalibrationResult {
    pub fn bin_to_distance(&self, range_bin: usize) -> f64 {
        range_bin as f64 * self.resolution_m
    }

    /// Extent of the distance axis for an image with `range_bins` rows.
    pub fn max_range_m(&self, range_bins: usize) -> f64 {
        self.bin_to_distance(range_bins)
    }
}

pub struct ResolutionCalibrator;

impl ResolutionCalibrator {
    /// Computes the range resolution for `adc_samples` samples per chirp,
    /// a sample rate in ksps and a frequency slope in MHz/us.
    pub fn calibrate(
        adc_samples: usize,
        sample_rate_ksps: f64,
        freq_slope_mhz_us: f64,
    ) -> ProcessingResult<CalibrationResult> {
        let degenerate = |reason: &'static str| ProcessingError::DegenerateCalibration {
            adc_samples,
            sample_rate_ksps,
            freq_slope_mhz_us,
            reason,
        };

        if adc_samples == 0 {
            return Err(degenerate("zero samples per chirp"));
        }
        if sample_rate_ksps == 0.0 {
            return Err(degenerate("zero sample rate"));
        }
        if freq_slope_mhz_us == 0.0 {
            return Err(degenerate("zero frequency slope"));
        }

        let sample_rate_hz = sample_rate_ksps * 1e3;
        let slope_hz_per_s = freq_slope_mhz_us * 1e12;
        let sampling_time_s = adc_samples as f64 / sample_rate_hz;
        let bandwidth_hz = slope_hz_per_s * sampling_time_s;
        if !bandwidth_hz.is_finite() || bandwidth_hz <= 0.0 {
            return Err(degenerate("bandwidth is not a positive finite value"));
        }

        let resolution_m = SPEED_OF_LIGHT / (2.0 * bandwidth_hz);
        if !resolution_m.is_finite() || resolution_m <= 0.0 {
            return Err(degenerate("resolution is not a positive finite value"));
        }

        Ok(CalibrationResult {
            resolution_m,
            bandwidth_hz,
        })
    }

    pub fn from_parameters(
        adc_samples: usize,
        radar: &RadarParameters,
    ) -> ProcessingResult<CalibrationResult> {
        Self::calibrate(adc_samples, radar.sample_rate_ksps, radar.freq_slope_mhz_us)
    }
}
