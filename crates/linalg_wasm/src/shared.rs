//! Helpers shared by the WASM wrappers.

use anyhow::Context;
use linalg_core::{CgSettings, Matrix, Vector};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

/// Builds a matrix from a row-major buffer coming from JavaScript.
pub(crate) fn build_matrix(rows: usize, cols: usize, values: &[f64]) -> anyhow::Result<Matrix> {
    Matrix::from_row_slice(rows, cols, values)
        .with_context(|| format!("Invalid {}x{} matrix data", rows, cols))
}

pub(crate) fn build_rhs(values: Vec<f64>) -> Vector {
    Vector::from_values(values)
}

/// `undefined`/`null` select the default settings.
pub(crate) fn parse_settings(settings_val: JsValue) -> Result<CgSettings, JsValue> {
    if settings_val.is_undefined() || settings_val.is_null() {
        return Ok(CgSettings::default());
    }
    from_value(settings_val)
        .map_err(|e| JsValue::from_str(&format!("Invalid solver settings: {}", e)))
}

pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_matrix_accepts_row_major_data() {
        let m = build_matrix(2, 2, &[1.0, 2.0, 3.0, 4.0]).expect("matrix");
        assert_eq!(m.at(1, 0), Ok(3.0));
    }

    #[test]
    fn build_matrix_reports_shape_in_context() {
        let err = build_matrix(2, 3, &[1.0, 2.0]).expect_err("too few values");
        let message = format!("{:#}", err);
        assert!(message.contains("Invalid 2x3 matrix data"), "{}", message);
        assert!(message.contains("Dimension Error"), "{}", message);
    }

    #[test]
    fn rhs_is_a_column_vector() {
        assert!(build_rhs(vec![1.0, 2.0]).is_column());
    }
}
