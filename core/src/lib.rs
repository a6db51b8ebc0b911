//! Range-Doppler signal-processing core for FMCW radar captures.
//!
//! Raw interleaved ADC integers are decoded into a complex cube, windowed and
//! transformed into a Range-Doppler image, and the strongest cells are ranked
//! with calibrated distances.

pub mod interface;
pub mod math;
pub mod pipeline;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use pipeline::{PipelineReport, RangeDopplerPipeline};
pub use prelude::{PipelineConfig, ProcessingError, ProcessingResult};
