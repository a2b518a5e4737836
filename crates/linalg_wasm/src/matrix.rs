//! Matrix wrapper exposed to JavaScript.

use crate::shared::{build_matrix, build_rhs, to_js_error};
use anyhow::Context;
use linalg_core::Matrix;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmMatrix {
    pub(crate) matrix: Matrix,
}

#[wasm_bindgen]
impl WasmMatrix {
    /// Create a matrix from `rows * cols` row-major values.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u32, cols: u32, values: Vec<f64>) -> Result<WasmMatrix, JsValue> {
        console_error_panic_hook::set_once();
        let matrix = build_matrix(rows as usize, cols as usize, &values).map_err(to_js_error)?;
        Ok(WasmMatrix { matrix })
    }

    pub fn rows(&self) -> u32 {
        self.matrix.rows() as u32
    }

    pub fn cols(&self) -> u32 {
        self.matrix.cols() as u32
    }

    pub fn get(&self, i: u32, j: u32) -> Result<f64, JsValue> {
        self.matrix
            .at(i as usize, j as usize)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set(&mut self, i: u32, j: u32, value: f64) -> Result<(), JsValue> {
        self.matrix
            .set(i as usize, j as usize, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Row-major copy of the values.
    pub fn values(&self) -> js_sys::Float64Array {
        js_sys::Float64Array::from(self.matrix.as_slice())
    }

    pub fn multiply_vector(&self, values: Vec<f64>) -> Result<Vec<f64>, JsValue> {
        multiply(&self.matrix, values).map_err(to_js_error)
    }

    pub fn to_display_string(&self) -> String {
        self.matrix.to_string()
    }
}

fn multiply(matrix: &Matrix, values: Vec<f64>) -> anyhow::Result<Vec<f64>> {
    let product = matrix
        .mul_vector(&build_rhs(values))
        .context("Matrix-vector product failed")?;
    Ok(product.into_iter().collect())
}
