use crate::prelude::{ProcessingError, ProcessingResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Capture layout as configured on the radar front end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameGeometry {
    pub frames: usize,
    pub chirps: usize,
    pub channels: usize,
    pub samples: usize,
}

impl FrameGeometry {
    pub fn new(frames: usize, chirps: usize, channels: usize, samples: usize) -> Self {
        Self {
            frames,
            chirps,
            channels,
            samples,
        }
    }

    /// Complex samples held by a single frame.
    pub fn complex_per_frame(&self) -> ProcessingResult<usize> {
        self.chirps
            .checked_mul(self.channels)
            .and_then(|v| v.checked_mul(self.samples))
            .ok_or_else(|| ProcessingError::InvalidGeometry("frame size overflows".into()))
    }

    /// Interleaved integers held by a single frame.
    pub fn ints_per_frame(&self) -> ProcessingResult<usize> {
        self.complex_per_frame()?
            .checked_mul(2)
            .ok_or_else(|| ProcessingError::InvalidGeometry("frame size overflows".into()))
    }

    /// Interleaved integers expected for the whole capture.
    pub fn total_ints(&self) -> ProcessingResult<usize> {
        self.ints_per_frame()?
            .checked_mul(self.frames)
            .ok_or_else(|| ProcessingError::InvalidGeometry("capture size overflows".into()))
    }

    pub fn validate(&self) -> ProcessingResult<()> {
        if self.frames == 0 || self.chirps == 0 || self.channels == 0 || self.samples == 0 {
            return Err(ProcessingError::InvalidGeometry(format!(
                "all dimensions must be non-zero, got {:?}",
                self
            )));
        }
        // Each group of four integers carries two complex samples.
        if self.complex_per_frame()? % 2 != 0 {
            return Err(ProcessingError::InvalidGeometry(format!(
                "chirps x channels x samples must be even, got {:?}",
                self
            )));
        }
        self.total_ints().map(|_| ())
    }
}

/// Timing and sweep parameters feeding the range calibration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RadarParameters {
    pub sample_rate_ksps: f64,
    pub freq_slope_mhz_us: f64,
}

/// Flat stream of interleaved 16-bit ADC integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    samples: Vec<i16>,
}

impl RawFrame {
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    /// Reads a little-endian i16 capture file.
    pub fn load<P: AsRef<Path>>(path: P) -> ProcessingResult<Self> {
        let path_ref = path.as_ref();
        let bytes = fs::read(path_ref).map_err(|source| ProcessingError::FileAccess {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::from_le_bytes(&bytes)
    }

    pub fn from_le_bytes(bytes: &[u8]) -> ProcessingResult<Self> {
        if bytes.len() % 2 != 0 {
            return Err(ProcessingError::OddByteCount { bytes: bytes.len() });
        }
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
