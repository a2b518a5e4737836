//! Conversions to and from nalgebra's dynamically sized types.
//!
//! `DVector` has no orientation, so vectors coming back from nalgebra are column vectors.

use crate::matrix::Matrix;
use crate::vector::Vector;
use nalgebra::{DMatrix, DVector};

impl From<&Vector> for DVector<f64> {
    fn from(vector: &Vector) -> Self {
        DVector::from_column_slice(vector.as_slice())
    }
}

impl From<&DVector<f64>> for Vector {
    fn from(vector: &DVector<f64>) -> Self {
        Vector::from_values(vector.iter().copied().collect())
    }
}

impl From<&Matrix> for DMatrix<f64> {
    fn from(matrix: &Matrix) -> Self {
        DMatrix::from_row_slice(matrix.rows(), matrix.cols(), matrix.as_slice())
    }
}

impl From<&DMatrix<f64>> for Matrix {
    fn from(matrix: &DMatrix<f64>) -> Self {
        let (rows, cols) = matrix.shape();
        // nalgebra is column-major, so the transpose's storage is our row-major layout.
        Matrix::from_raw(rows, cols, matrix.transpose().as_slice().to_vec())
    }
}
