pub struct StatsHelper;

impl StatsHelper {
    pub fn rms<'a, I>(samples: I) -> f32
    where
        I: IntoIterator<Item = &'a f32>,
    {
        let (sum_sq, count) = samples
            .into_iter()
            .fold((0.0f32, 0usize), |(sum, count), &v| (sum + v * v, count + 1));
        if count == 0 {
            return 0.0;
        }
        (sum_sq / count as f32).sqrt()
    }

    /// Largest finite value, or `None` for an empty input.
    pub fn max<'a, I>(samples: I) -> Option<f32>
    where
        I: IntoIterator<Item = &'a f32>,
    {
        samples
            .into_iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_zero_sequence_yields_zero() {
        let empty: [f32; 0] = [];
        assert_eq!(StatsHelper::rms(&empty), 0.0);
        assert_eq!(StatsHelper::rms(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn rms_handles_single_value() {
        assert_eq!(StatsHelper::rms(&[4.0]), 4.0);
    }

    #[test]
    fn max_skips_non_finite_values() {
        assert_eq!(StatsHelper::max(&[1.0, f32::NAN, 3.0, 2.0]), Some(3.0));
        let empty: [f32; 0] = [];
        assert_eq!(StatsHelper::max(&empty), None);
    }
}
