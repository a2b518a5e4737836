//! Error types for linalg_core.
//!
//! Every fallible operation in the crate reports one of two conditions: an element, row or
//! column access outside the valid range, or operands whose shapes do not fit the requested
//! operation. Both are contract violations by the caller; nothing is retried internally.

use thiserror::Error;

/// Result type alias using [`LinalgError`].
pub type Result<T> = std::result::Result<T, LinalgError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinalgError {
    /// Index outside `[0, len)`.
    #[error("Indexing Error: index {index} out of bounds for length {len}.")]
    Index { index: usize, len: usize },

    /// Operand shapes are incompatible for `op`.
    #[error("Dimension Error: incompatible operands for {op}: {lhs:?} and {rhs:?}.")]
    Dimension {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
}

impl LinalgError {
    pub fn is_index(&self) -> bool {
        matches!(self, LinalgError::Index { .. })
    }

    pub fn is_dimension(&self) -> bool {
        matches!(self, LinalgError::Dimension { .. })
    }
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(LinalgError::Index { index, len })
    }
}

/// Fails with [`LinalgError::Dimension`] unless `compatible` holds.
pub(crate) fn check_dimensions(
    compatible: bool,
    op: &'static str,
    lhs: (usize, usize),
    rhs: (usize, usize),
) -> Result<()> {
    if compatible {
        Ok(())
    } else {
        Err(LinalgError::Dimension { op, lhs, rhs })
    }
}
