use crate::math::fft::{fft2_padded, fftshift};
use crate::math::stats::StatsHelper;
use crate::math::window::hann_2d;
use crate::prelude::{ProcessingError, ProcessingResult};
use crate::processing::decoder::AdcCube;
use crate::telemetry::log::LogManager;
use ndarray::{Array2, Array3, Axis, Zip};
use num_complex::Complex32;

/// Output selection of the Range-Doppler transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    /// Complex spectrum as produced, `[doppler, range, channel]`, unshifted.
    Raw,
    /// Doppler-shifted magnitude image, `[range, doppler, channel]`.
    Magnitude,
    /// Both of the above from a single transform.
    Both,
}

impl TryFrom<i64> for TransformMode {
    type Error = ProcessingError;

    fn try_from(mode: i64) -> Result<Self, Self::Error> {
        match mode {
            0 => Ok(Self::Raw),
            1 => Ok(Self::Magnitude),
            2 => Ok(Self::Both),
            _ => Err(ProcessingError::InvalidMode { mode }),
        }
    }
}

/// Magnitude image indexed `[range_bin, doppler_bin, channel]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeDopplerImage {
    data: Array3<f32>,
}

impl RangeDopplerImage {
    pub fn range_bins(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn doppler_bins(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn channels(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    /// 2-D `[range_bin, doppler_bin]` image of one receiver channel.
    pub fn channel(&self, channel: usize) -> ProcessingResult<Array2<f32>> {
        if channel >= self.channels() {
            return Err(ProcessingError::ChannelOutOfRange {
                channel,
                channels: self.channels(),
            });
        }
        Ok(self.data.index_axis(Axis(2), channel).to_owned())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RangeDopplerOutput {
    Raw(Array3<Complex32>),
    Magnitude(RangeDopplerImage),
    Both {
        raw: Array3<Complex32>,
        magnitude: RangeDopplerImage,
    },
}

impl RangeDopplerOutput {
    pub fn raw(&self) -> Option<&Array3<Complex32>> {
        match self {
            Self::Raw(raw) | Self::Both { raw, .. } => Some(raw),
            Self::Magnitude(_) => None,
        }
    }

    pub fn magnitude(&self) -> Option<&RangeDopplerImage> {
        match self {
            Self::Magnitude(magnitude) | Self::Both { magnitude, .. } => Some(magnitude),
            Self::Raw(_) => None,
        }
    }
}

/// Windowed, zero-padded 2-D FFT over the chirp and sample axes of a cube.
pub struct RangeDopplerTransformer {
    logger: LogManager,
}

impl RangeDopplerTransformer {
    pub fn new() -> Self {
        Self {
            logger: LogManager::for_stage("range-doppler"),
        }
    }

    /// Entry point taking the numeric mode code (0 raw, 1 magnitude, 2 both).
    pub fn transform_code(
        &self,
        cube: &AdcCube,
        mode: i64,
        padding: Option<[usize; 2]>,
    ) -> ProcessingResult<RangeDopplerOutput> {
        let mode = TransformMode::try_from(mode)?;
        self.transform(cube, mode, padding)
    }

    /// `padding` is `[doppler_pad, range_pad]`; each must cover the chirp and
    /// sample counts respectively.
    pub fn transform(
        &self,
        cube: &AdcCube,
        mode: TransformMode,
        padding: Option<[usize; 2]>,
    ) -> ProcessingResult<RangeDopplerOutput> {
        let raw = self.raw_spectrum(cube, padding)?;
        Ok(match mode {
            TransformMode::Raw => RangeDopplerOutput::Raw(raw),
            TransformMode::Magnitude => RangeDopplerOutput::Magnitude(self.magnitude(&raw)),
            TransformMode::Both => {
                let magnitude = self.magnitude(&raw);
                RangeDopplerOutput::Both { raw, magnitude }
            }
        })
    }

    /// `[range, doppler]` magnitude image of a single receiver channel. Only
    /// that channel is windowed and transformed.
    pub fn channel_image(
        &self,
        cube: &AdcCube,
        channel: usize,
        padding: Option<[usize; 2]>,
    ) -> ProcessingResult<Array2<f32>> {
        let (doppler_bins, range_bins) = Self::resolve_padding(cube, padding)?;
        let slice = cube.channel(channel)?;

        let window = hann_2d(cube.samples(), cube.chirps());
        let windowed = Zip::from(slice)
            .and(window.t())
            .map_collect(|&value, &weight| value * weight);
        let spectrum = fft2_padded(windowed.view(), doppler_bins, range_bins);

        let magnitude = spectrum.mapv(|value| value.norm());
        let image = fftshift(magnitude.view(), Axis(0))
            .reversed_axes()
            .as_standard_layout()
            .into_owned();
        self.logger.detail(&format!(
            "channel {} image [{}, {}], RMS {:.4}, max {:.4}",
            channel,
            range_bins,
            doppler_bins,
            StatsHelper::rms(image.iter()),
            StatsHelper::max(image.iter()).unwrap_or(0.0)
        ));
        Ok(image)
    }

    fn raw_spectrum(
        &self,
        cube: &AdcCube,
        padding: Option<[usize; 2]>,
    ) -> ProcessingResult<Array3<Complex32>> {
        let (doppler_bins, range_bins) = Self::resolve_padding(cube, padding)?;

        let windowed = Self::apply_window(cube);
        let raw = Self::spectrum(&windowed, doppler_bins, range_bins);
        self.logger.detail(&format!(
            "transformed {} channels to [{}, {}]",
            cube.channels(),
            doppler_bins,
            range_bins
        ));
        Ok(raw)
    }

    fn resolve_padding(
        cube: &AdcCube,
        padding: Option<[usize; 2]>,
    ) -> ProcessingResult<(usize, usize)> {
        let Some([doppler_pad, range_pad]) = padding else {
            return Ok((cube.chirps(), cube.samples()));
        };
        if doppler_pad < cube.chirps() {
            return Err(ProcessingError::InvalidPadding {
                axis: "doppler",
                requested: doppler_pad,
                minimum: cube.chirps(),
            });
        }
        if range_pad < cube.samples() {
            return Err(ProcessingError::InvalidPadding {
                axis: "range",
                requested: range_pad,
                minimum: cube.samples(),
            });
        }
        Ok((doppler_pad, range_pad))
    }

    /// Copy of the cube with the separable Hann window applied per channel.
    pub fn apply_window(cube: &AdcCube) -> Array3<Complex32> {
        let window = hann_2d(cube.samples(), cube.chirps());
        let weights = window.t();
        let mut windowed = cube.view().to_owned();
        for mut slice in windowed.axis_iter_mut(Axis(2)) {
            Zip::from(&mut slice)
                .and(&weights)
                .for_each(|value, &weight| *value = *value * weight);
        }
        windowed
    }

    fn spectrum(
        windowed: &Array3<Complex32>,
        doppler_bins: usize,
        range_bins: usize,
    ) -> Array3<Complex32> {
        let channels = windowed.len_of(Axis(2));
        let mut raw = Array3::<Complex32>::zeros((doppler_bins, range_bins, channels));
        for (channel, slice) in windowed.axis_iter(Axis(2)).enumerate() {
            let spectrum = fft2_padded(slice, doppler_bins, range_bins);
            raw.index_axis_mut(Axis(2), channel).assign(&spectrum);
        }
        raw
    }

    fn magnitude(&self, raw: &Array3<Complex32>) -> RangeDopplerImage {
        let magnitude = raw.mapv(|value| value.norm());
        let data = fftshift(magnitude.view(), Axis(0))
            .permuted_axes([1, 0, 2])
            .as_standard_layout()
            .into_owned();
        self.logger.detail(&format!(
            "magnitude image RMS {:.4}, max {:.4}",
            StatsHelper::rms(data.iter()),
            StatsHelper::max(data.iter()).unwrap_or(0.0)
        ));
        RangeDopplerImage { data }
    }
}

impl Default for RangeDopplerTransformer {
    fn default() -> Self {
        Self::new()
    }
}
