pub mod fft;
pub mod matrix;
pub mod stats;
pub mod window;

pub use fft::{fft2_padded, fftshift, FftHelper};
pub use matrix::MatrixHelper;
pub use stats::StatsHelper;
pub use window::{hann, hann_2d};
