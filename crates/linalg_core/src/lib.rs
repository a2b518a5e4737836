//! The `linalg_core` crate provides small dense linear-algebra building blocks and an
//! iterative solver on top of them.
//!
//! Key components:
//! - **Vector**: fixed-length `f64` vectors with row/column orientation, norms, dot and cross
//!   products.
//! - **Matrix**: row-major `f64` matrices with elementwise arithmetic and matrix/vector
//!   products.
//! - **Solvers**: the Conjugate Gradient method, as a one-shot call or a steppable state.
//! - **Interop**: conversions to and from nalgebra's `DVector`/`DMatrix`.
//!
//! Shape and index violations are reported as [`LinalgError`].
pub mod error;
pub mod interop;
pub mod matrix;
pub mod solvers;
pub mod vector;

pub use error::{LinalgError, Result};
pub use matrix::Matrix;
pub use solvers::{cg_solve, cg_solver, CgReport, CgSettings, CgState};
pub use vector::{Orientation, Vector};
