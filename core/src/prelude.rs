use crate::interface::capture::{FrameGeometry, RadarParameters};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Explicit configuration record for one analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub geometry: FrameGeometry,
    pub radar: RadarParameters,
    /// Zero-padding target as `[doppler_pad, range_pad]`.
    #[serde(default)]
    pub padding: Option<[usize; 2]>,
    pub peak_count: usize,
    #[serde(default)]
    pub channel: usize,
    #[serde(default)]
    pub frame_index: usize,
    #[serde(default = "default_require_calibration")]
    pub require_calibration: bool,
}

fn default_require_calibration() -> bool {
    true
}

/// Common error type for every processing stage.
#[derive(thiserror::Error, Debug)]
pub enum ProcessingError {
    #[error("cannot read capture {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shape mismatch: expected {expected} values, found {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("capture holds {bytes} bytes, not a whole number of 16-bit samples")]
    OddByteCount { bytes: usize },
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("frame {index} out of range for a capture of {frames} frames")]
    FrameOutOfRange { index: usize, frames: usize },
    #[error("invalid transform mode {mode}, expected 0, 1 or 2")]
    InvalidMode { mode: i64 },
    #[error("padding {requested} on the {axis} axis is below the input size {minimum}")]
    InvalidPadding {
        axis: &'static str,
        requested: usize,
        minimum: usize,
    },
    #[error("channel {channel} out of range for {channels} channels")]
    ChannelOutOfRange { channel: usize, channels: usize },
    #[error("requested {requested} peaks but the image holds only {available} cells")]
    InsufficientData { requested: usize, available: usize },
    #[error(
        "degenerate calibration ({reason}) for {adc_samples} samples at \
         {sample_rate_ksps} ksps, slope {freq_slope_mhz_us} MHz/us"
    )]
    DegenerateCalibration {
        adc_samples: usize,
        sample_rate_ksps: f64,
        freq_slope_mhz_us: f64,
        reason: &'static str,
    },
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;
