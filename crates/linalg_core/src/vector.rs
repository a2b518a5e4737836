//! Dense vectors with row/column orientation.
//!
//! A [`Vector`] tracks its orientation through a `(rows, cols)` shape pair in which one of the
//! two dimensions is 1. Binary operators never mutate their operands: vector-vector operators
//! return `Result<Vector>` (shapes must match), scalar operators return a fresh `Vector` with
//! the receiver's orientation.

use crate::error::{check_dimensions, check_index, LinalgError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Column,
    Row,
}

impl Orientation {
    fn shape(self, len: usize) -> (usize, usize) {
        match self {
            Orientation::Column => (len, 1),
            Orientation::Row => (1, len),
        }
    }
}

/// Fixed-length vector of `f64` values.
///
/// The length is fixed at construction; element values can be changed through
/// [`Vector::set`] and [`Vector::at_mut`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "VectorRepr", into = "VectorRepr")]
pub struct Vector {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Wire form of a [`Vector`]. The shape pair is sent explicitly because the empty shapes
/// `(0, 0)`, `(0, 1)` and `(1, 0)` share one orientation.
#[derive(Serialize, Deserialize)]
struct VectorRepr {
    values: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl TryFrom<VectorRepr> for Vector {
    type Error = LinalgError;

    fn try_from(repr: VectorRepr) -> Result<Self> {
        let VectorRepr { values, rows, cols } = repr;
        let vector_shape = rows == 1 || cols == 1 || (rows, cols) == (0, 0);
        check_dimensions(
            vector_shape && rows * cols == values.len(),
            "vector construction",
            (rows, cols),
            (values.len(), 1),
        )?;
        Ok(Self {
            data: values,
            rows,
            cols,
        })
    }
}

impl From<Vector> for VectorRepr {
    fn from(vector: Vector) -> Self {
        VectorRepr {
            values: vector.data,
            rows: vector.rows,
            cols: vector.cols,
        }
    }
}

impl Vector {
    /// Column vector of `len` copies of `value`.
    pub fn new(len: usize, value: f64) -> Self {
        Self::with_orientation(len, value, Orientation::Column)
    }

    pub fn with_orientation(len: usize, value: f64, orientation: Orientation) -> Self {
        Self::from_values_oriented(vec![value; len], orientation)
    }

    /// Column vector holding `values`.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self::from_values_oriented(values, Orientation::Column)
    }

    pub fn from_values_oriented(values: Vec<f64>, orientation: Orientation) -> Self {
        let (rows, cols) = orientation.shape(values.len());
        Self {
            data: values,
            rows,
            cols,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The `(rows, cols)` shape pair.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// `true` for `(n, 1)` shapes, `false` for `(1, n)` with `n > 1`.
    ///
    /// A `(1, 1)` vector and the degenerate empty shapes report column orientation.
    pub fn is_column(&self) -> bool {
        if self.rows >= 1 && self.cols == 1 {
            true
        } else if self.rows == 1 && self.cols >= 1 {
            false
        } else {
            true
        }
    }

    pub fn orientation(&self) -> Orientation {
        if self.is_column() {
            Orientation::Column
        } else {
            Orientation::Row
        }
    }

    pub fn at(&self, index: usize) -> Result<f64> {
        check_index(index, self.data.len())?;
        Ok(self.data[index])
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut f64> {
        check_index(index, self.data.len())?;
        Ok(&mut self.data[index])
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        *self.at_mut(index)? = value;
        Ok(())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// New vector with the same values and the opposite orientation.
    pub fn transposed(&self) -> Vector {
        Vector {
            data: self.data.clone(),
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Flips this vector's orientation and hands it back for chaining.
    pub fn transpose_in_place(&mut self) -> &mut Self {
        std::mem::swap(&mut self.rows, &mut self.cols);
        self
    }

    /// Inner product. Only sizes must agree; orientation is ignored.
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        check_dimensions(
            self.size() == other.size(),
            "dot product",
            self.shape(),
            other.shape(),
        )?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Sum of absolute values.
    pub fn norm1(&self) -> f64 {
        self.data.iter().map(|v| v.abs()).sum()
    }

    /// Sum of squares. This is *not* square-rooted; see [`Vector::euclidean_norm`].
    pub fn norm2(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum()
    }

    pub fn euclidean_norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    /// Signed element of largest magnitude, or `None` for an empty vector.
    ///
    /// Compares the maximum and minimum elements; the maximum wins only when its magnitude is
    /// strictly larger, so `[-3, 3]` yields `-3`.
    pub fn norm_inf(&self) -> Option<f64> {
        let max = self.data.iter().copied().reduce(f64::max)?;
        let min = self.data.iter().copied().reduce(f64::min)?;
        Some(if max.abs() > min.abs() { max } else { min })
    }

    /// Three-dimensional cross product, returned as a column vector.
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        check_dimensions(
            self.size() == 3 && other.size() == 3,
            "cross product",
            self.shape(),
            other.shape(),
        )?;
        let (a, b) = (&self.data, &other.data);
        Ok(Vector::from_values(vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    /// `acos(dot / (norm2(self) * norm2(other)))` with the non-rooted [`Vector::norm2`].
    ///
    /// This only matches the geometric angle for unit vectors;
    /// [`Vector::angle_between_euclidean`] is the true angle.
    pub fn angle_between(&self, other: &Vector) -> Result<f64> {
        let dot = self.dot(other)?;
        Ok((dot / (self.norm2() * other.norm2())).acos())
    }

    pub fn angle_between_euclidean(&self, other: &Vector) -> Result<f64> {
        let dot = self.dot(other)?;
        Ok((dot / (self.euclidean_norm() * other.euclidean_norm())).acos())
    }

    pub fn try_add_assign(&mut self, rhs: &Vector) -> Result<()> {
        *self = (&*self + rhs)?;
        Ok(())
    }

    pub fn try_sub_assign(&mut self, rhs: &Vector) -> Result<()> {
        *self = (&*self - rhs)?;
        Ok(())
    }

    pub fn try_div_assign(&mut self, rhs: &Vector) -> Result<()> {
        *self = (&*self / rhs)?;
        Ok(())
    }

    fn zip_with(
        &self,
        rhs: &Vector,
        op: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Vector> {
        check_dimensions(self.shape() == rhs.shape(), op, self.shape(), rhs.shape())?;
        Ok(Vector {
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

    fn map(&self, f: impl Fn(f64) -> f64) -> Vector {
        Vector {
            data: self.data.iter().map(|&a| f(a)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Vector::from_values(values)
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl IntoIterator for Vector {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", v)?;
        }
        write!(f, "]")
    }
}

// Vector-vector operators check shapes and therefore return `Result<Vector>`.
macro_rules! impl_elementwise_op {
    ($trait:ident, $method:ident, $name:literal, $op:tt) => {
        impl $trait<&Vector> for &Vector {
            type Output = Result<Vector>;
            fn $method(self, rhs: &Vector) -> Result<Vector> {
                self.zip_with(rhs, $name, |a, b| a $op b)
            }
        }

        impl $trait<&Vector> for Vector {
            type Output = Result<Vector>;
            fn $method(self, rhs: &Vector) -> Result<Vector> {
                (&self).$method(rhs)
            }
        }

        impl $trait<Vector> for Vector {
            type Output = Result<Vector>;
            fn $method(self, rhs: Vector) -> Result<Vector> {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_elementwise_op!(Add, add, "vector add", +);
impl_elementwise_op!(Sub, sub, "vector subtract", -);
impl_elementwise_op!(Div, div, "vector divide", /);

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait<f64> for &Vector {
            type Output = Vector;
            fn $method(self, rhs: f64) -> Vector {
                self.map(|a| a $op rhs)
            }
        }

        impl $trait<f64> for Vector {
            type Output = Vector;
            fn $method(mut self, rhs: f64) -> Vector {
                self.$assign_method(rhs);
                self
            }
        }

        impl $assign_trait<f64> for Vector {
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

// Scalar on the left: only `+` and `*`, which commute.
impl Add<&Vector> for f64 {
    type Output = Vector;
    fn add(self, rhs: &Vector) -> Vector {
        rhs + self
    }
}

impl Add<Vector> for f64 {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        rhs + self
    }
}

impl Mul<&Vector> for f64 {
    type Output = Vector;
    fn mul(self, rhs: &Vector) -> Vector {
        rhs * self
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector {
        rhs * self
    }
}

/// `v * w` is the dot product.
impl Mul<&Vector> for &Vector {
    type Output = Result<f64>;
    fn mul(self, rhs: &Vector) -> Result<f64> {
        self.dot(rhs)
    }
}

impl Mul<Vector> for Vector {
    type Output = Result<f64>;
    fn mul(self, rhs: Vector) -> Result<f64> {
        self.dot(&rhs)
    }
}

impl Neg for &Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        self * -1.0
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        self * -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &Vector, expected: &[f64]) {
        assert_eq!(actual.size(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "expected {:?}, got {}", expected, actual);
        }
    }

    #[test]
    fn constructors_set_shape_and_values() {
        let v = Vector::new(3, 2.5);
        assert_eq!(v.shape(), (3, 1));
        assert!(v.is_column());
        assert_eq!(v.as_slice(), &[2.5, 2.5, 2.5]);

        let w = Vector::with_orientation(2, 0.0, Orientation::Row);
        assert_eq!(w.shape(), (1, 2));
        assert!(!w.is_column());
        assert_eq!(w.orientation(), Orientation::Row);

        let u = Vector::from_values(vec![1.0, 2.0]);
        assert_eq!(u.shape(), (2, 1));
        assert_eq!(u, Vector::from(vec![1.0, 2.0]));
    }

    #[test]
    fn single_element_and_empty_vectors_report_column() {
        let single = Vector::from_values_oriented(vec![7.0], Orientation::Row);
        assert_eq!(single.shape(), (1, 1));
        assert!(single.is_column());

        let empty = Vector::default();
        assert_eq!(empty.shape(), (0, 0));
        assert!(empty.is_column());
        assert!(empty.is_empty());
    }

    #[test]
    fn indexing_is_bounds_checked() {
        let mut v = Vector::from_values(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.at(2), Ok(3.0));
        assert!(v.at(3).expect_err("past the end").is_index());
        assert!(v.at(-1_isize as usize).expect_err("wrapped -1").is_index());

        v.set(0, 10.0).expect("in range");
        *v.at_mut(1).expect("in range") += 5.0;
        assert_eq!(v.as_slice(), &[10.0, 7.0, 3.0]);
        assert!(v.set(3, 0.0).expect_err("past the end").is_index());
    }

    #[test]
    fn pure_transpose_leaves_receiver_untouched() {
        let v = Vector::from_values(vec![1.0, 2.0, 3.0]);
        let t = v.transposed();
        assert_eq!(v.shape(), (3, 1));
        assert_eq!(t.shape(), (1, 3));
        assert_eq!(t.as_slice(), v.as_slice());
        assert_eq!(t.transposed(), v);
    }

    #[test]
    fn in_place_transpose_mutates_and_chains() {
        let mut v = Vector::from_values(vec![1.0, 2.0]);
        let shape = v.transpose_in_place().shape();
        assert_eq!(shape, (1, 2));
        assert!(!v.is_column());
        v.transpose_in_place().transpose_in_place();
        assert_eq!(v.shape(), (1, 2));
    }

    #[test]
    fn add_then_subtract_restores_operand() {
        let u = Vector::from_values(vec![0.1, -2.5, 3.75]);
        let v = Vector::from_values(vec![1e3, 0.2, -7.0]);
        let sum = (&u + &v).expect("same shape");
        let back = (&sum - &v).expect("same shape");
        assert_close(&back, u.as_slice());
    }

    #[test]
    fn elementwise_ops_reject_mismatched_shapes() {
        let column = Vector::from_values(vec![1.0, 2.0]);
        let row = column.transposed();
        let longer = Vector::new(3, 1.0);

        assert!((&column + &row).expect_err("orientation differs").is_dimension());
        assert!((&column - &longer).expect_err("size differs").is_dimension());
        assert!((&column / &longer).expect_err("size differs").is_dimension());
    }

    #[test]
    fn scalar_ops_preserve_orientation() {
        let v = Vector::from_values_oriented(vec![2.0, 4.0], Orientation::Row);
        assert_eq!((&v * 0.5).shape(), (1, 2));
        assert_close(&(&v * 0.5), &[1.0, 2.0]);
        assert_close(&(&v / 2.0), &[1.0, 2.0]);
        assert_close(&(&v + 1.0), &[3.0, 5.0]);
        assert_close(&(&v - 1.0), &[1.0, 3.0]);
        assert_close(&(3.0 * &v), &[6.0, 12.0]);
        assert_close(&(1.0 + &v), &[3.0, 5.0]);
        assert_close(&(-&v), &[-2.0, -4.0]);
        assert_eq!((-v).shape(), (1, 2));
    }

    #[test]
    fn compound_assignment_rebinds() {
        let mut v = Vector::from_values(vec![1.0, 2.0]);
        let w = Vector::from_values(vec![4.0, 8.0]);
        v.try_add_assign(&w).expect("same shape");
        assert_close(&v, &[5.0, 10.0]);
        v.try_sub_assign(&w).expect("same shape");
        assert_close(&v, &[1.0, 2.0]);
        v.try_div_assign(&w).expect("same shape");
        assert_close(&v, &[0.25, 0.25]);
        v *= 4.0;
        v += 1.0;
        assert_close(&v, &[2.0, 2.0]);

        let mut short = Vector::new(1, 0.0);
        assert!(short.try_add_assign(&w).is_err());
        assert_eq!(short.as_slice(), &[0.0]);
    }

    #[test]
    fn dot_matches_norm2_and_ignores_orientation() {
        let v = Vector::from_values(vec![1.0, -2.0, 3.0]);
        assert_eq!(v.dot(&v), Ok(v.norm2()));
        assert_eq!(&v * &v.transposed(), Ok(14.0));
        assert!(v.dot(&Vector::new(2, 1.0)).expect_err("sizes differ").is_dimension());
    }

    #[test]
    fn norms_follow_their_definitions() {
        let v = Vector::from_values(vec![3.0, -4.0]);
        assert_eq!(v.norm1(), 7.0);
        assert_eq!(v.norm2(), 25.0);
        assert_eq!(v.euclidean_norm(), 5.0);
        assert_eq!(v.norm_inf(), Some(-4.0));
        assert_eq!(Vector::from_values(vec![-1.0, 6.0]).norm_inf(), Some(6.0));
        assert_eq!(Vector::default().norm_inf(), None);
    }

    #[test]
    fn norm_inf_tie_returns_minimum() {
        let v = Vector::from_values(vec![-3.0, 1.0, 3.0]);
        assert_eq!(v.norm_inf(), Some(-3.0));
    }

    #[test]
    fn cross_product_of_unit_axes() {
        let x = Vector::from_values(vec![1.0, 0.0, 0.0]);
        let y = Vector::from_values(vec![0.0, 1.0, 0.0]);
        assert_eq!(x.cross(&y), Ok(Vector::from_values(vec![0.0, 0.0, 1.0])));
        assert_eq!(y.cross(&x), Ok(Vector::from_values(vec![0.0, 0.0, -1.0])));
        assert!(x
            .cross(&Vector::new(2, 1.0))
            .expect_err("needs size 3")
            .is_dimension());
    }

    #[test]
    fn angle_between_uses_squared_norms() {
        let a = Vector::from_values(vec![2.0, 0.0]);
        let b = Vector::from_values(vec![2.0, 2.0]);
        // dot = 4, norm2 products = 4 * 8
        let expected = (4.0_f64 / 32.0).acos();
        assert!((a.angle_between(&b).expect("same size") - expected).abs() < 1e-12);

        let true_angle = a.angle_between_euclidean(&b).expect("same size");
        assert!((true_angle - std::f64::consts::FRAC_PI_4).abs() < 1e-12);

        let c = Vector::from_values(vec![1.0, 2.0, 3.0]);
        assert!(a.angle_between(&c).expect_err("sizes differ").is_dimension());
        assert!(a.angle_between_euclidean(&c).expect_err("sizes differ").is_dimension());
    }

    #[test]
    fn equality_requires_matching_shape() {
        let v = Vector::from_values(vec![1.0, 2.0]);
        assert_ne!(v, v.transposed());
        assert_eq!(v, Vector::from_values(vec![1.0, 2.0]));
        assert_ne!(v, Vector::from_values(vec![1.0, 2.5]));
    }

    #[test]
    fn iteration_visits_elements_in_order() {
        let v = Vector::from_values(vec![1.0, 2.0, 3.0]);
        let collected: Vec<f64> = (&v).into_iter().copied().collect();
        assert_eq!(collected, vec![1.0, 2.0, 3.0]);
        assert_eq!(v.into_iter().sum::<f64>(), 6.0);
    }

    #[test]
    fn display_renders_bracketed_list() {
        let v = Vector::from_values(vec![1.0, 0.5, -2.0]);
        assert_eq!(v.to_string(), "[1.0, 0.5, -2.0]");
        assert_eq!(Vector::default().to_string(), "[]");
    }

    #[test]
    fn serde_keeps_orientation() {
        let v = Vector::from_values_oriented(vec![1.0, 2.0], Orientation::Row);
        let json = serde_json::to_string(&v).expect("serialize");
        assert_eq!(json, r#"{"values":[1.0,2.0],"rows":1,"cols":2}"#);
        let back: Vector = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, v);
    }

    #[test]
    fn serde_keeps_empty_shapes() {
        let empty_row = Vector::from_values_oriented(Vec::new(), Orientation::Row);
        assert_eq!(empty_row.shape(), (1, 0));
        for v in [Vector::default(), Vector::new(0, 0.0), empty_row] {
            let json = serde_json::to_string(&v).expect("serialize");
            let back: Vector = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back.shape(), v.shape(), "{}", json);
            assert_eq!(back, v);
        }
    }

    #[test]
    fn serde_rejects_inconsistent_shapes() {
        for json in [
            r#"{"values":[1.0,2.0],"rows":3,"cols":1}"#,
            r#"{"values":[1.0,2.0,3.0,4.0],"rows":2,"cols":2}"#,
        ] {
            let err = serde_json::from_str::<Vector>(json).expect_err("not a vector shape");
            assert!(err.to_string().contains("Dimension Error"), "{}", err);
        }
    }
}
