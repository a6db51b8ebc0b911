use ndarray::{s, Array, Array2, ArrayView, ArrayView2, Axis, RemoveAxis};
use num_complex::Complex32;
use rustfft::{num_traits::Zero, Fft, FftPlanner};

/// Helper that wraps a planned forward transform of a fixed length.
pub struct FftHelper {
    fft: std::sync::Arc<dyn Fft<f32>>,
    scratch: Vec<Complex32>,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex32::zero(); fft.get_inplace_scratch_len()];
        Self { fft, scratch }
    }

    /// In-place transform; `buffer.len()` must equal the planned length.
    pub fn process(&mut self, buffer: &mut [Complex32]) {
        if buffer.is_empty() {
            return;
        }
        self.fft.process_with_scratch(buffer, &mut self.scratch);
    }
}

/// 2-D forward transform of `input`, zero-padded at the end of each axis to
/// `rows x cols`. Callers guarantee the target is at least the input shape.
pub fn fft2_padded(input: ArrayView2<Complex32>, rows: usize, cols: usize) -> Array2<Complex32> {
    let (in_rows, in_cols) = input.dim();
    let mut spectrum = Array2::<Complex32>::zeros((rows, cols));
    spectrum
        .slice_mut(s![..in_rows.min(rows), ..in_cols.min(cols)])
        .assign(&input.slice(s![..in_rows.min(rows), ..in_cols.min(cols)]));

    let mut row_fft = FftHelper::new(cols);
    let mut line = vec![Complex32::zero(); cols];
    for mut row in spectrum.rows_mut() {
        line.iter_mut().zip(row.iter()).for_each(|(dst, src)| *dst = *src);
        row_fft.process(&mut line);
        row.iter_mut().zip(line.iter()).for_each(|(dst, src)| *dst = *src);
    }

    let mut col_fft = FftHelper::new(rows);
    let mut line = vec![Complex32::zero(); rows];
    for mut column in spectrum.columns_mut() {
        line.iter_mut().zip(column.iter()).for_each(|(dst, src)| *dst = *src);
        col_fft.process(&mut line);
        column.iter_mut().zip(line.iter()).for_each(|(dst, src)| *dst = *src);
    }

    spectrum
}

/// Circular shift by `n / 2` along `axis`, moving the negative-frequency half
/// to the front so the zero-frequency bin lands at the middle index.
pub fn fftshift<A, D>(input: ArrayView<A, D>, axis: Axis) -> Array<A, D>
where
    A: Clone,
    D: RemoveAxis,
{
    let n = input.len_of(axis);
    let split = n - n / 2;
    let order: Vec<usize> = (split..n).chain(0..split).collect();
    input.select(axis, &order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn fft_helper_transforms_zero_padded_buffer() {
        let mut helper = FftHelper::new(4);
        let mut output = vec![Complex32::zero(); 4];
        output[0] = Complex32::new(1.0, 0.0);
        output[1] = Complex32::new(-1.0, 0.0);
        helper.process(&mut output);
        // [1, -1, 0, 0] -> [0, 1+j, 2, 1-j]
        assert!((output[0] - Complex32::new(0.0, 0.0)).norm() < 1e-6);
        assert!((output[1] - Complex32::new(1.0, 1.0)).norm() < 1e-6);
        assert!((output[2] - Complex32::new(2.0, 0.0)).norm() < 1e-6);
        assert!((output[3] - Complex32::new(1.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn fft2_of_impulse_is_flat() {
        let mut input = Array2::<Complex32>::zeros((2, 3));
        input[[0, 0]] = Complex32::new(2.0, 0.0);
        let spectrum = fft2_padded(input.view(), 4, 8);
        assert_eq!(spectrum.dim(), (4, 8));
        assert!(spectrum.iter().all(|c| (c - Complex32::new(2.0, 0.0)).norm() < 1e-6));
    }

    #[test]
    fn fft2_places_tone_on_expected_bins() {
        let (rows, cols) = (4, 8);
        let input = Array2::from_shape_fn((rows, cols), |(r, c)| {
            let phase = 2.0 * std::f32::consts::PI * (r as f32 / 4.0 + 3.0 * c as f32 / 8.0);
            Complex32::new(phase.cos(), phase.sin())
        });
        let spectrum = fft2_padded(input.view(), rows, cols);
        assert!((spectrum[[1, 3]].norm() - 32.0).abs() < 1e-2);
        let leaked: f32 = spectrum
            .indexed_iter()
            .filter(|(idx, _)| *idx != (1, 3))
            .map(|(_, c)| c.norm())
            .sum();
        assert!(leaked < 1e-2);
    }

    #[test]
    fn fftshift_matches_even_and_odd_conventions() {
        let even: Array1<i32> = array![0, 1, 2, 3];
        assert_eq!(fftshift(even.view(), Axis(0)), array![2, 3, 0, 1]);
        let odd: Array1<i32> = array![0, 1, 2, 3, 4];
        assert_eq!(fftshift(odd.view(), Axis(0)), array![3, 4, 0, 1, 2]);
    }

    #[test]
    fn fftshift_only_touches_requested_axis() {
        let grid = array![[0, 1], [2, 3], [4, 5], [6, 7]];
        let shifted = fftshift(grid.view(), Axis(0));
        assert_eq!(shifted, array![[4, 5], [6, 7], [0, 1], [2, 3]]);
    }
}
