use crate::interface::capture::{FrameGeometry, RawFrame};
use crate::prelude::{ProcessingError, ProcessingResult};
use crate::telemetry::log::LogManager;
use ndarray::{Array3, ArrayView2, ArrayView3, Axis};
use num_complex::Complex32;

/// Complex ADC samples of one frame, indexed `[chirp, sample, channel]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdcCube {
    data: Array3<Complex32>,
}

impl AdcCube {
    pub fn new(data: Array3<Complex32>) -> ProcessingResult<Self> {
        if data.is_empty() {
            return Err(ProcessingError::InvalidGeometry(format!(
                "ADC cube must not be empty, got shape {:?}",
                data.shape()
            )));
        }
        Ok(Self { data })
    }

    pub fn chirps(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn samples(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn channels(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    pub fn view(&self) -> ArrayView3<'_, Complex32> {
        self.data.view()
    }

    /// `[chirp, sample]` slice of one receiver channel.
    pub fn channel(&self, channel: usize) -> ProcessingResult<ArrayView2<'_, Complex32>> {
        if channel >= self.channels() {
            return Err(ProcessingError::ChannelOutOfRange {
                channel,
                channels: self.channels(),
            });
        }
        Ok(self.data.index_axis(Axis(2), channel))
    }

}

/// Turns interleaved 16-bit ADC integers into complex frame cubes.
///
/// Each group of four integers `(x0, x1, x2, x3)` yields the two complex
/// samples `x0 + j*x2` and `x1 + j*x3`. The resulting sequence is laid out as
/// `[chirp, channel, sample]` and reordered to `[chirp, sample, channel]`.
pub struct FrameDecoder {
    geometry: FrameGeometry,
    logger: LogManager,
}

impl FrameDecoder {
    pub fn new(geometry: FrameGeometry) -> Self {
        Self {
            geometry,
            logger: LogManager::for_stage("decoder"),
        }
    }

    /// Decodes the first frame of the capture.
    pub fn decode(&self, raw: &RawFrame) -> ProcessingResult<AdcCube> {
        self.decode_frame(raw, 0)
    }

    pub fn decode_frame(&self, raw: &RawFrame, index: usize) -> ProcessingResult<AdcCube> {
        self.geometry.validate()?;

        let expected = self.geometry.total_ints()?;
        if raw.len() != expected {
            return Err(ProcessingError::ShapeMismatch {
                expected,
                actual: raw.len(),
            });
        }
        if index >= self.geometry.frames {
            return Err(ProcessingError::FrameOutOfRange {
                index,
                frames: self.geometry.frames,
            });
        }

        let stride = self.geometry.ints_per_frame()?;
        let frame = &raw.samples()[index * stride..(index + 1) * stride];

        let values: Vec<Complex32> = frame
            .chunks_exact(4)
            .flat_map(|group| {
                [
                    Complex32::new(f32::from(group[0]), f32::from(group[2])),
                    Complex32::new(f32::from(group[1]), f32::from(group[3])),
                ]
            })
            .collect();

        let FrameGeometry {
            chirps,
            channels,
            samples,
            ..
        } = self.geometry;
        let data = Array3::from_shape_vec((chirps, channels, samples), values)
            .map_err(|_| ProcessingError::ShapeMismatch {
                expected: stride,
                actual: frame.len(),
            })?
            .permuted_axes([0, 2, 1])
            .as_standard_layout()
            .into_owned();

        self.logger.detail(&format!(
            "decoded frame {} into [{}, {}, {}]",
            index, chirps, samples, channels
        ));
        AdcCube::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known_value(chirp: usize, sample: usize, channel: usize) -> Complex32 {
        Complex32::new(
            (chirp * 100 + sample * 10 + channel) as f32,
            -((chirp * 7 + sample * 3 + channel) as f32),
        )
    }

    /// Inverse of the decoder's deinterleave for one frame.
    fn interleave(chirps: usize, channels: usize, samples: usize) -> Vec<i16> {
        let mut flat = Vec::with_capacity(chirps * channels * samples);
        for chirp in 0..chirps {
            for channel in 0..channels {
                for sample in 0..samples {
                    flat.push(known_value(chirp, sample, channel));
                }
            }
        }
        flat.chunks_exact(2)
            .flat_map(|pair| {
                [
                    pair[0].re as i16,
                    pair[1].re as i16,
                    pair[0].im as i16,
                    pair[1].im as i16,
                ]
            })
            .collect()
    }

    #[test]
    fn decoder_reconstructs_interleaved_values_exactly() {
        let geometry = FrameGeometry::new(1, 3, 2, 4);
        let raw = RawFrame::new(interleave(3, 2, 4));
        let cube = FrameDecoder::new(geometry).decode(&raw).unwrap();

        assert_eq!(cube.view().shape(), &[3, 4, 2]);
        for chirp in 0..3 {
            for sample in 0..4 {
                for channel in 0..2 {
                    assert_eq!(
                        cube.view()[[chirp, sample, channel]],
                        known_value(chirp, sample, channel)
                    );
                }
            }
        }
    }

    #[test]
    fn decoder_pairs_slot_zero_with_slot_two() {
        let geometry = FrameGeometry::new(1, 1, 1, 2);
        let raw = RawFrame::new(vec![1, 2, 3, 4]);
        let cube = FrameDecoder::new(geometry).decode(&raw).unwrap();
        assert_eq!(cube.view()[[0, 0, 0]], Complex32::new(1.0, 3.0));
        assert_eq!(cube.view()[[0, 1, 0]], Complex32::new(2.0, 4.0));
    }

    #[test]
    fn decoder_selects_requested_frame() {
        let geometry = FrameGeometry::new(2, 1, 1, 2);
        let raw = RawFrame::new(vec![1, 2, 3, 4, 10, 20, 30, 40]);
        let decoder = FrameDecoder::new(geometry);
        let second = decoder.decode_frame(&raw, 1).unwrap();
        assert_eq!(second.view()[[0, 0, 0]], Complex32::new(10.0, 30.0));
        assert!(matches!(
            decoder.decode_frame(&raw, 2),
            Err(ProcessingError::FrameOutOfRange {
                index: 2,
                frames: 2
            })
        ));
    }

    #[test]
    fn decoder_rejects_wrong_buffer_length() {
        let geometry = FrameGeometry::new(2, 3, 2, 4);
        let raw = RawFrame::new(interleave(3, 2, 4));
        let err = FrameDecoder::new(geometry).decode(&raw).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::ShapeMismatch {
                expected: 96,
                actual: 48
            }
        ));
    }

    #[test]
    fn cube_channel_view_is_bounds_checked() {
        let geometry = FrameGeometry::new(1, 3, 2, 4);
        let cube = FrameDecoder::new(geometry)
            .decode(&RawFrame::new(interleave(3, 2, 4)))
            .unwrap();
        assert_eq!(cube.channel(1).unwrap().dim(), (3, 4));
        assert!(matches!(
            cube.channel(2),
            Err(ProcessingError::ChannelOutOfRange {
                channel: 2,
                channels: 2
            })
        ));
    }
}
