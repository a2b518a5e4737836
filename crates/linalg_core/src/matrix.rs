//! Dense row-major matrices.

use crate::error::{check_dimensions, check_index, LinalgError, Result};
use crate::vector::{Orientation, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Fixed-shape matrix of `f64` values stored in one row-major buffer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Wire form of a [`Matrix`]: the shape plus the row-major values, so empty shapes such as
/// `3 × 0` survive a round trip.
#[derive(Serialize, Deserialize)]
struct MatrixRepr {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = LinalgError;

    fn try_from(repr: MatrixRepr) -> Result<Self> {
        check_dimensions(
            repr.values.len() == repr.rows * repr.cols,
            "matrix construction",
            (repr.rows, repr.cols),
            (repr.values.len(), 1),
        )?;
        Ok(Self {
            data: repr.values,
            rows: repr.rows,
            cols: repr.cols,
        })
    }
}

impl From<Matrix> for MatrixRepr {
    fn from(matrix: Matrix) -> Self {
        MatrixRepr {
            rows: matrix.rows,
            cols: matrix.cols,
            values: matrix.data,
        }
    }
}

impl Matrix {
    /// `rows × cols` matrix filled with `value`.
    pub fn new(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Builds a matrix from nested rows. Every row must have the length of the first one;
    /// an empty outer list yields a `0 × 0` matrix.
    pub fn from_rows(values: Vec<Vec<f64>>) -> Result<Self> {
        let rows = values.len();
        let cols = values.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows * cols);
        for row in values {
            check_dimensions(
                row.len() == cols,
                "matrix construction",
                (1, cols),
                (1, row.len()),
            )?;
            data.extend(row);
        }
        Ok(Self { data, rows, cols })
    }

    pub fn from_row_slice(rows: usize, cols: usize, values: &[f64]) -> Result<Self> {
        check_dimensions(
            values.len() == rows * cols,
            "matrix construction",
            (rows, cols),
            (values.len(), 1),
        )?;
        Ok(Self {
            data: values.to_vec(),
            rows,
            cols,
        })
    }

    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n, 0.0);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major view of the values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn at(&self, i: usize, j: usize) -> Result<f64> {
        Ok(self.data[self.offset(i, j)?])
    }

    pub fn at_mut(&mut self, i: usize, j: usize) -> Result<&mut f64> {
        let offset = self.offset(i, j)?;
        Ok(&mut self.data[offset])
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        *self.at_mut(i, j)? = value;
        Ok(())
    }

    /// Copy of row `i` as a row vector.
    pub fn row(&self, i: usize) -> Result<Vector> {
        check_index(i, self.rows)?;
        let start = i * self.cols;
        Ok(Vector::from_values_oriented(
            self.data[start..start + self.cols].to_vec(),
            Orientation::Row,
        ))
    }

    /// Copy of column `j` as a column vector.
    pub fn col(&self, j: usize) -> Result<Vector> {
        check_index(j, self.cols)?;
        Ok(Vector::from_values(
            (0..self.rows).map(|i| self.data[i * self.cols + j]).collect(),
        ))
    }

    /// `A·x`, a column vector of length `rows`. Requires `x.size() == cols`.
    pub fn mul_vector(&self, x: &Vector) -> Result<Vector> {
        check_dimensions(
            self.cols == x.size(),
            "matrix-vector product",
            self.shape(),
            x.shape(),
        )?;
        let values = x.as_slice();
        let out: Vec<f64> = (0..self.rows)
            .map(|i| {
                self.data[i * self.cols..(i + 1) * self.cols]
                    .iter()
                    .zip(values)
                    .map(|(a, b)| a * b)
                    .sum::<f64>()
            })
            .collect();
        Ok(Vector::from_values(out))
    }

    /// `xᵗ·A`, a row vector of length `cols`. Requires `x.size() == rows`.
    pub fn vector_mul(&self, x: &Vector) -> Result<Vector> {
        check_dimensions(
            x.size() == self.rows,
            "vector-matrix product",
            x.shape(),
            self.shape(),
        )?;
        let mut out = vec![0.0; self.cols];
        for (i, xi) in x.iter().enumerate() {
            let row = &self.data[i * self.cols..(i + 1) * self.cols];
            for (acc, a) in out.iter_mut().zip(row) {
                *acc += xi * a;
            }
        }
        Ok(Vector::from_values_oriented(out, Orientation::Row))
    }

    /// Matrix product requiring a square left operand.
    ///
    /// The summation runs over `self.cols`; a right operand with fewer rows than that fails
    /// with [`LinalgError::Index`] and extra rows are ignored. [`Matrix::matmul_conformant`]
    /// checks the inner dimensions instead.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        check_dimensions(
            self.is_square(),
            "matrix-matrix product",
            self.shape(),
            rhs.shape(),
        )?;
        let mut out = Matrix::new(self.rows, rhs.cols, 0.0);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut acc = 0.0;
                for k in 0..self.cols {
                    acc += self.data[i * self.cols + k] * rhs.at(k, j)?;
                }
                out.data[i * rhs.cols + j] = acc;
            }
        }
        Ok(out)
    }

    /// Matrix product requiring `self.cols == rhs.rows`.
    pub fn matmul_conformant(&self, rhs: &Matrix) -> Result<Matrix> {
        check_dimensions(
            self.cols == rhs.rows,
            "matrix-matrix product",
            self.shape(),
            rhs.shape(),
        )?;
        let mut out = Matrix::new(self.rows, rhs.cols, 0.0);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                let rhs_row = &rhs.data[k * rhs.cols..(k + 1) * rhs.cols];
                let out_row = &mut out.data[i * rhs.cols..(i + 1) * rhs.cols];
                for (acc, b) in out_row.iter_mut().zip(rhs_row) {
                    *acc += a * b;
                }
            }
        }
        Ok(out)
    }

    pub fn try_add_assign(&mut self, rhs: &Matrix) -> Result<()> {
        *self = (&*self + rhs)?;
        Ok(())
    }

    pub fn try_sub_assign(&mut self, rhs: &Matrix) -> Result<()> {
        *self = (&*self - rhs)?;
        Ok(())
    }

    pub fn try_mul_assign(&mut self, rhs: &Matrix) -> Result<()> {
        *self = self.matmul(rhs)?;
        Ok(())
    }

    fn offset(&self, i: usize, j: usize) -> Result<usize> {
        check_index(i, self.rows)?;
        check_index(j, self.cols)?;
        Ok(i * self.cols + j)
    }

    fn zip_with(
        &self,
        rhs: &Matrix,
        op: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Matrix> {
        check_dimensions(self.shape() == rhs.shape(), op, self.shape(), rhs.shape())?;
        Ok(Matrix {
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
            rows: self.rows,
            cols: self.cols,
        })
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        Matrix {
            data: self.data.iter().map(|&a| f(a)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            if i > 0 {
                writeln!(f)?;
            }
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:?}", self.data[i * self.cols + j])?;
            }
        }
        Ok(())
    }
}

macro_rules! impl_elementwise_op {
    ($trait:ident, $method:ident, $name:literal, $op:tt) => {
        impl $trait<&Matrix> for &Matrix {
            type Output = Result<Matrix>;
            fn $method(self, rhs: &Matrix) -> Result<Matrix> {
                self.zip_with(rhs, $name, |a, b| a $op b)
            }
        }

        impl $trait<&Matrix> for Matrix {
            type Output = Result<Matrix>;
            fn $method(self, rhs: &Matrix) -> Result<Matrix> {
                (&self).$method(rhs)
            }
        }

        impl $trait<Matrix> for Matrix {
            type Output = Result<Matrix>;
            fn $method(self, rhs: Matrix) -> Result<Matrix> {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_elementwise_op!(Add, add, "matrix add", +);
impl_elementwise_op!(Sub, sub, "matrix subtract", -);

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait<f64> for &Matrix {
            type Output = Matrix;
            fn $method(self, rhs: f64) -> Matrix {
                self.map(|a| a $op rhs)
            }
        }

        impl $trait<f64> for Matrix {
            type Output = Matrix;
            fn $method(mut self, rhs: f64) -> Matrix {
                self.$assign_method(rhs);
                self
            }
        }

        impl $assign_trait<f64> for Matrix {
            fn $assign_method(&mut self, rhs: f64) {
                for a in &mut self.data {
                    *a = *a $op rhs;
                }
            }
        }
    };
}

impl_scalar_op!(Add, add, AddAssign, add_assign, +);
impl_scalar_op!(Sub, sub, SubAssign, sub_assign, -);
impl_scalar_op!(Mul, mul, MulAssign, mul_assign, *);
impl_scalar_op!(Div, div, DivAssign, div_assign, /);

impl Add<&Matrix> for f64 {
    type Output = Matrix;
    fn add(self, rhs: &Matrix) -> Matrix {
        rhs + self
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs * self
    }
}

impl Neg for &Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        self * -1.0
    }
}

impl Neg for Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        self * -1.0
    }
}

impl Mul<&Vector> for &Matrix {
    type Output = Result<Vector>;
    fn mul(self, rhs: &Vector) -> Result<Vector> {
        self.mul_vector(rhs)
    }
}

impl Mul<&Matrix> for &Vector {
    type Output = Result<Vector>;
    fn mul(self, rhs: &Matrix) -> Result<Vector> {
        rhs.vector_mul(self)
    }
}

impl Mul<&Matrix> for &Matrix {
    type Output = Result<Matrix>;
    fn mul(self, rhs: &Matrix) -> Result<Matrix> {
        self.matmul(rhs)
    }
}
