use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

pub struct MatrixHelper;

impl MatrixHelper {
    /// Multiply two 2D arrays.
    pub fn multiply(lhs: ArrayView2<f32>, rhs: ArrayView2<f32>) -> Array2<f32> {
        lhs.dot(&rhs)
    }

    /// Outer product `column * row` as an `[column.len(), row.len()]` matrix.
    pub fn outer(column: ArrayView1<f32>, row: ArrayView1<f32>) -> Array2<f32> {
        Self::multiply(column.insert_axis(Axis(1)), row.insert_axis(Axis(0)))
    }
}
