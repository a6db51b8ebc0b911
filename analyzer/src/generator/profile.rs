use anyhow::{ensure, Context};
use fmcwcore::interface::{FrameGeometry, RawFrame};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Configuration for generating a synthetic interleaved capture holding a
/// single point target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub frames: usize,
    pub chirps: usize,
    pub rx: usize,
    pub samples: usize,
    /// Beat-frequency bin of the target along the sample axis.
    pub range_bin: usize,
    /// Phase-progression bin of the target along the chirp axis.
    pub doppler_bin: usize,
    pub amplitude: f32,
    pub noise: f32,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            frames: 1,
            chirps: 32,
            rx: 4,
            samples: 64,
            range_bin: 12,
            doppler_bin: 3,
            amplitude: 2000.0,
            noise: 20.0,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    pub fn with_geometry(mut self, geometry: FrameGeometry) -> Self {
        self.frames = geometry.frames;
        self.chirps = geometry.chirps;
        self.rx = geometry.channels;
        self.samples = geometry.samples;
        self
    }

    pub fn geometry(&self) -> FrameGeometry {
        FrameGeometry::new(self.frames, self.chirps, self.rx, self.samples)
    }
}

fn to_adc(value: f32) -> i16 {
    value.round().clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

/// Builds the complex samples in capture order: frame, chirp, channel, sample.
fn build_sample_vector(config: &GeneratorConfig) -> anyhow::Result<Vec<(f32, f32)>> {
    let geometry = config.geometry();
    geometry.validate().context("invalid generator geometry")?;
    ensure!(
        config.range_bin < config.samples,
        "range bin {} outside {} samples",
        config.range_bin,
        config.samples
    );
    ensure!(
        config.doppler_bin < config.chirps,
        "doppler bin {} outside {} chirps",
        config.doppler_bin,
        config.chirps
    );

    let sample_count = geometry
        .complex_per_frame()?
        .checked_mul(config.frames)
        .context("overflow computing sample count for generator")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut samples = Vec::with_capacity(sample_count);

    for _frame in 0..config.frames {
        for chirp in 0..config.chirps {
            for rx in 0..config.rx {
                let phase_offset = rx as f32 * 0.25;
                for sample in 0..config.samples {
                    let phase = 2.0
                        * PI
                        * (config.doppler_bin as f32 * chirp as f32 / config.chirps as f32
                            + config.range_bin as f32 * sample as f32 / config.samples as f32)
                        + phase_offset;
                    let (mut i, mut q) = (
                        config.amplitude * phase.cos(),
                        config.amplitude * phase.sin(),
                    );
                    if config.noise > 0.0 {
                        i += rng.gen_range(-config.noise..config.noise);
                        q += rng.gen_range(-config.noise..config.noise);
                    }
                    samples.push((i, q));
                }
            }
        }
    }

    Ok(samples)
}

/// Interleaves the synthetic target into the four-integer ADC layout.
pub fn build_capture(config: &GeneratorConfig) -> anyhow::Result<RawFrame> {
    let samples = build_sample_vector(config)?;
    let ints = samples
        .chunks_exact(2)
        .flat_map(|pair| {
            [
                to_adc(pair[0].0),
                to_adc(pair[1].0),
                to_adc(pair[0].1),
                to_adc(pair[1].1),
            ]
        })
        .collect();
    Ok(RawFrame::new(ints))
}
