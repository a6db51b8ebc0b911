use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use fmcwcore::interface::RawFrame;
use fmcwcore::telemetry::Metrics;
use fmcwcore::{PipelineReport, RangeDopplerPipeline};

pub struct WorkflowResult {
    pub report: PipelineReport,
    pub metrics: Metrics,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Reads the capture named by the workflow's `input`.
    pub fn load_capture(&self) -> anyhow::Result<RawFrame> {
        let path = self
            .config
            .input
            .as_ref()
            .context("no capture input configured; pass --input or --synthetic")?;
        RawFrame::load(path).with_context(|| format!("loading capture {}", path.display()))
    }

    pub fn execute(&self, raw: &RawFrame) -> anyhow::Result<WorkflowResult> {
        let pipeline = RangeDopplerPipeline::new(self.config.to_pipeline_config());
        let report = pipeline
            .run(raw)
            .context("executing range-doppler pipeline")?;

        Ok(WorkflowResult {
            report,
            metrics: pipeline.metrics(),
        })
    }
}
