use crate::workflow::config::WorkflowConfig;
use crate::workflow::runner::WorkflowResult;
use fmcwcore::interface::{FrameGeometry, Peak};
use serde::Serialize;

/// Everything a heatmap renderer needs: calibration, axis extents and the
/// ranked peaks in their original order.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub geometry: FrameGeometry,
    pub sample_rate_ksps: f64,
    pub freq_slope_mhz_us: f64,
    pub bandwidth_hz: Option<f64>,
    pub resolution_m: Option<f64>,
    pub range_bins: usize,
    pub doppler_bins: usize,
    /// `[0, resolution * range_bins]`, absent without calibration.
    pub distance_extent_m: Option<[f64; 2]>,
    pub doppler_extent: [usize; 2],
    pub peaks: Vec<Peak>,
}

impl AnalysisSummary {
    pub fn new(config: &WorkflowConfig, result: &WorkflowResult) -> Self {
        let report = &result.report;
        let calibration = report.calibration;
        Self {
            geometry: config.geometry(),
            sample_rate_ksps: config.sample_rate_ksps,
            freq_slope_mhz_us: config.freq_slope_mhz_us,
            bandwidth_hz: calibration.map(|c| c.bandwidth_hz),
            resolution_m: calibration.map(|c| c.resolution_m),
            range_bins: report.range_bins(),
            doppler_bins: report.doppler_bins(),
            distance_extent_m: calibration.map(|c| [0.0, c.max_range_m(report.range_bins())]),
            doppler_extent: [0, report.doppler_bins()],
            peaks: report.peaks.clone(),
        }
    }

    pub fn render_text(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Number of frames: {}", self.geometry.frames),
            format!("Number of chirps: {}", self.geometry.chirps),
            format!("Number of rx: {}", self.geometry.channels),
            format!("Number of samples: {}", self.geometry.samples),
            format!("Sample rate: {} ksps", self.sample_rate_ksps),
            format!("Frequency slope: {} MHz/us", self.freq_slope_mhz_us),
        ];
        match (self.bandwidth_hz, self.resolution_m) {
            (Some(bandwidth), Some(resolution)) => {
                lines.push(format!("Bandwidth used: {:.2} GHz", bandwidth / 1e9));
                lines.push(format!("Range resolution: {:.2} cm", resolution * 100.0));
            }
            _ => lines.push("Range resolution: unavailable".to_string()),
        }
        lines.push(format!(
            "Image: {} range bins x {} doppler bins",
            self.range_bins, self.doppler_bins
        ));
        if let Some([_, max_range]) = self.distance_extent_m {
            lines.push(format!("Distance axis: 0.00 .. {:.2} m", max_range));
        }

        lines.push(String::new());
        lines.push(format!("--- TOP {} DETECTED PEAKS ---", self.peaks.len()));
        for (rank, peak) in self.peaks.iter().enumerate() {
            let distance = if peak.has_distance() {
                format!("{:.3} m", peak.distance_m)
            } else {
                "unavailable".to_string()
            };
            lines.push(format!(
                "Signal #{}: Strength={:.1} | Distance: {} (Bin: {}) | Doppler Bin: {}",
                rank + 1,
                peak.strength,
                distance,
                peak.range_bin,
                peak.doppler_bin
            ));
        }
        lines
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmcwcore::processing::CalibrationResult;
    use fmcwcore::telemetry::Metrics;
    use fmcwcore::PipelineReport;
    use ndarray::Array2;

    fn result(calibration: Option<CalibrationResult>) -> WorkflowResult {
        let resolution = calibration.map_or(f64::NAN, |c| c.resolution_m);
        WorkflowResult {
            report: PipelineReport {
                calibration,
                image: Array2::zeros((64, 128)),
                peaks: vec![
                    Peak::new(16, 70, 5120.5, resolution),
                    Peak::new(17, 70, 3010.2, resolution),
                ],
            },
            metrics: Metrics::default(),
        }
    }

    fn calibration() -> CalibrationResult {
        CalibrationResult {
            resolution_m: 0.071,
            bandwidth_hz: 2.112e9,
        }
    }

    #[test]
    fn summary_renders_calibration_and_ranked_peaks() {
        let summary = AnalysisSummary::new(&WorkflowConfig::default(), &result(Some(calibration())));
        let lines = summary.render_text();
        assert!(lines.contains(&"Bandwidth used: 2.11 GHz".to_string()));
        assert!(lines.contains(&"Range resolution: 7.10 cm".to_string()));
        assert!(lines.contains(&"--- TOP 2 DETECTED PEAKS ---".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Signal #2: Strength=3010.2 | Distance: 1.207 m (Bin: 17) | Doppler Bin: 70"
        );
        assert_eq!(summary.distance_extent_m, Some([0.0, 64.0 * 0.071]));
        assert_eq!(summary.doppler_extent, [0, 128]);
    }

    #[test]
    fn summary_marks_missing_calibration() {
        let summary = AnalysisSummary::new(&WorkflowConfig::default(), &result(None));
        let lines = summary.render_text();
        assert!(lines.contains(&"Range resolution: unavailable".to_string()));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("Signal #1") && line.contains("Distance: unavailable")));
        assert!(summary.distance_extent_m.is_none());
    }

    #[test]
    fn summary_json_keeps_peak_order() {
        let summary = AnalysisSummary::new(&WorkflowConfig::default(), &result(Some(calibration())));
        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(json["peaks"][0]["range_bin"], 16);
        assert_eq!(json["peaks"][1]["range_bin"], 17);
        assert_eq!(json["range_bins"], 64);
    }
}
