use serde::{Deserialize, Serialize};

/// One ranked cell of a Range-Doppler image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Peak {
    pub range_bin: usize,
    pub doppler_bin: usize,
    pub strength: f32,
    /// `range_bin * resolution`; NaN when the capture could not be calibrated.
    pub distance_m: f64,
}

impl Peak {
    pub fn new(range_bin: usize, doppler_bin: usize, strength: f32, resolution_m: f64) -> Self {
        Self {
            range_bin,
            doppler_bin,
            strength,
            distance_m: range_bin as f64 * resolution_m,
        }
    }

    pub fn has_distance(&self) -> bool {
        self.distance_m.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_scales_range_bin_to_meters() {
        let peak = Peak::new(5, 10, 999.0, 0.071);
        assert!((peak.distance_m - 0.355).abs() < 1e-12);
        assert!(peak.has_distance());
        assert!(!Peak::new(5, 10, 999.0, f64::NAN).has_distance());
    }
}
