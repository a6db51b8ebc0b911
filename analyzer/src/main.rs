use anyhow::Context;
use clap::Parser;
use generator::profile::{build_capture, GeneratorConfig};
use log::debug;
use report::summary::AnalysisSummary;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline FMCW Range-Doppler analysis of one captured frame")]
struct Args {
    /// Load a workflow config from YAML (geometry flags are then ignored)
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Raw little-endian i16 capture file
    #[arg(long)]
    input: Option<PathBuf>,
    /// Analyse a generated single-target capture instead of a file
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long, default_value_t = 500)]
    frames: usize,
    #[arg(long, default_value_t = 32)]
    chirps: usize,
    #[arg(long, default_value_t = 4)]
    rx: usize,
    #[arg(long, default_value_t = 64)]
    samples: usize,
    /// ADC sample rate in ksps
    #[arg(long, default_value_t = 2000.0)]
    sample_rate: f64,
    /// Chirp slope in MHz/us
    #[arg(long, default_value_t = 65.998)]
    slope: f64,
    /// Zero-padding target as DOPPLER,RANGE
    #[arg(long, value_delimiter = ',', default_values_t = [128, 64])]
    padding: Vec<usize>,
    /// Transform at the native size
    #[arg(long, default_value_t = false)]
    no_padding: bool,
    #[arg(long, default_value_t = 3)]
    peaks: usize,
    #[arg(long, default_value_t = 0)]
    channel: usize,
    #[arg(long, default_value_t = 0)]
    frame: usize,
    /// Keep going with unlabelled distances if calibration is degenerate
    #[arg(long, default_value_t = false)]
    allow_uncalibrated: bool,
    /// Range bin of the generated target (with --synthetic)
    #[arg(long, default_value_t = 12)]
    target_range_bin: usize,
    /// Doppler bin of the generated target (with --synthetic)
    #[arg(long, default_value_t = 3)]
    target_doppler_bin: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Emit the summary as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Args {
    fn workflow_config(&self) -> anyhow::Result<WorkflowConfig> {
        let mut config = if let Some(path) = &self.workflow {
            WorkflowConfig::load(path)?
        } else {
            let padding = match self.padding.as_slice() {
                _ if self.no_padding => None,
                [doppler, range] => Some([*doppler, *range]),
                other => anyhow::bail!("--padding expects DOPPLER,RANGE, got {:?}", other),
            };
            WorkflowConfig {
                input: None,
                frames: self.frames,
                chirps: self.chirps,
                rx: self.rx,
                samples: self.samples,
                sample_rate_ksps: self.sample_rate,
                freq_slope_mhz_us: self.slope,
                padding,
                peak_count: self.peaks,
                channel: self.channel,
                frame_index: self.frame,
                require_calibration: !self.allow_uncalibrated,
            }
        };
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = args.workflow_config()?;
    let runner = Runner::new(workflow_config.clone());

    let capture = if args.synthetic {
        let generator = GeneratorConfig {
            range_bin: args.target_range_bin,
            doppler_bin: args.target_doppler_bin,
            seed: args.seed,
            ..Default::default()
        }
        .with_geometry(workflow_config.geometry());
        build_capture(&generator).context("generating synthetic capture")?
    } else {
        runner.load_capture()?
    };

    let result = runner.execute(&capture)?;
    debug!("pipeline metrics {:?}", result.metrics);

    let summary = AnalysisSummary::new(runner.config(), &result);
    if args.json {
        println!("{}", summary.to_json()?);
    } else {
        for line in summary.render_text() {
            println!("{}", line);
        }
    }

    Ok(())
}
