use anyhow::Context;
use fmcwcore::interface::{FrameGeometry, RadarParameters};
use fmcwcore::prelude::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Driver-level settings for one offline analysis pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub input: Option<PathBuf>,
    pub frames: usize,
    pub chirps: usize,
    pub rx: usize,
    pub samples: usize,
    pub sample_rate_ksps: f64,
    pub freq_slope_mhz_us: f64,
    /// `[doppler_pad, range_pad]`
    pub padding: Option<[usize; 2]>,
    pub peak_count: usize,
    pub channel: usize,
    pub frame_index: usize,
    pub require_calibration: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            input: None,
            frames: 500,
            chirps: 32,
            rx: 4,
            samples: 64,
            sample_rate_ksps: 2000.0,
            freq_slope_mhz_us: 65.998,
            padding: Some([128, 64]),
            peak_count: 3,
            channel: 0,
            frame_index: 0,
            require_calibration: true,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn geometry(&self) -> FrameGeometry {
        FrameGeometry::new(self.frames, self.chirps, self.rx, self.samples)
    }

    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            geometry: self.geometry(),
            radar: RadarParameters {
                sample_rate_ksps: self.sample_rate_ksps,
                freq_slope_mhz_us: self.freq_slope_mhz_us,
            },
            padding: self.padding,
            peak_count: self.peak_count,
            channel: self.channel,
            frame_index: self.frame_index,
            require_calibration: self.require_calibration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_matches_reference_capture() {
        let cfg = WorkflowConfig::default();
        let pipeline = cfg.to_pipeline_config();
        assert_eq!(pipeline.geometry, FrameGeometry::new(500, 32, 4, 64));
        assert_eq!(pipeline.padding, Some([128, 64]));
        assert_eq!(pipeline.peak_count, 3);
        assert!(pipeline.require_calibration);
    }

    #[test]
    fn config_load_reads_yaml_with_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"frames: 2\nchirps: 16\nsamples: 32\npadding: [32, 64]\npeak_count: 5\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.geometry(), FrameGeometry::new(2, 16, 4, 32));
        assert_eq!(cfg.padding, Some([32, 64]));
        assert_eq!(cfg.peak_count, 5);
        assert_eq!(cfg.sample_rate_ksps, 2000.0);
        assert!(cfg.input.is_none());
    }

    #[test]
    fn config_load_reports_missing_file() {
        let err = WorkflowConfig::load("/nonexistent/workflow.yaml").unwrap_err();
        assert!(err.to_string().contains("reading workflow config"));
    }
}
