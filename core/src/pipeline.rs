use crate::interface::capture::RawFrame;
use crate::interface::detection::Peak;
use crate::prelude::{PipelineConfig, ProcessingResult};
use crate::processing::calibration::{CalibrationResult, ResolutionCalibrator};
use crate::processing::decoder::FrameDecoder;
use crate::processing::peaks::PeakDetector;
use crate::processing::range_doppler::RangeDopplerTransformer;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{Metrics, MetricsRecorder};
use ndarray::{Array2, Axis};

/// Terminal outputs of one analysis pass.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// `None` when calibration was degenerate and the config allowed it.
    pub calibration: Option<CalibrationResult>,
    /// Magnitude image of the selected channel, `[range_bin, doppler_bin]`.
    pub image: Array2<f32>,
    pub peaks: Vec<Peak>,
}

impl PipelineReport {
    pub fn range_bins(&self) -> usize {
        self.image.len_of(Axis(0))
    }

    pub fn doppler_bins(&self) -> usize {
        self.image.len_of(Axis(1))
    }
}

/// Decode, transform and rank a single captured frame.
pub struct RangeDopplerPipeline {
    config: PipelineConfig,
    decoder: FrameDecoder,
    transformer: RangeDopplerTransformer,
    detector: PeakDetector,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl RangeDopplerPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            decoder: FrameDecoder::new(config.geometry),
            transformer: RangeDopplerTransformer::new(),
            detector: PeakDetector::new(),
            metrics: MetricsRecorder::new(),
            logger: LogManager::for_stage("pipeline"),
            config,
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    /// Range calibration for the configured chirp, honouring
    /// `require_calibration`.
    pub fn calibration(&self) -> ProcessingResult<Option<CalibrationResult>> {
        let samples = self.config.geometry.samples;
        match ResolutionCalibrator::from_parameters(samples, &self.config.radar) {
            Ok(calibration) => {
                self.logger.record(&format!(
                    "bandwidth {:.2} GHz, range resolution {:.2} cm",
                    calibration.bandwidth_hz / 1e9,
                    calibration.resolution_m * 100.0
                ));
                Ok(Some(calibration))
            }
            Err(err) if !self.config.require_calibration => {
                self.logger.warn(&format!("{}; distances unavailable", err));
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub fn run(&self, raw: &RawFrame) -> ProcessingResult<PipelineReport> {
        let result = self.execute(raw);
        match &result {
            Ok(report) => self.metrics.record_frame(report.peaks.len()),
            Err(err) => {
                self.metrics.record_error();
                self.logger.warn(&format!("analysis failed: {}", err));
            }
        }
        result
    }

    fn execute(&self, raw: &RawFrame) -> ProcessingResult<PipelineReport> {
        let calibration = self.calibration()?;

        let cube = self.decoder.decode_frame(raw, self.config.frame_index)?;
        let image = self
            .transformer
            .channel_image(&cube, self.config.channel, self.config.padding)?;

        let resolution_m = calibration.map_or(f64::NAN, |c| c.resolution_m);
        let peaks = self
            .detector
            .find_top_peaks(image.view(), resolution_m, self.config.peak_count)?;

        Ok(PipelineReport {
            calibration,
            image,
            peaks,
        })
    }
}
