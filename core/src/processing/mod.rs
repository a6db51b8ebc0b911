pub mod calibration;
pub mod decoder;
pub mod peaks;
pub mod range_doppler;

pub use calibration::{CalibrationResult, ResolutionCalibrator};
pub use decoder::{AdcCube, FrameDecoder};
pub use peaks::PeakDetector;
pub use range_doppler::{
    RangeDopplerImage, RangeDopplerOutput, RangeDopplerTransformer, TransformMode,
};
