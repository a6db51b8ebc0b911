pub mod capture;
pub mod detection;

pub use capture::{FrameGeometry, RadarParameters, RawFrame};
pub use detection::Peak;
