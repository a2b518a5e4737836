//! Stepped Conjugate Gradient runner and one-shot solve.

use crate::matrix::WasmMatrix;
use crate::shared::{build_matrix, build_rhs, parse_settings, to_js_error};
use anyhow::Context;
use linalg_core::{cg_solve, CgReport, CgSettings, CgState, Matrix};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

/// Progress payload for the stepped CG solver.
#[derive(Debug, Serialize, PartialEq)]
struct CgSolveProgress {
    done: bool,
    iterations: usize,
    max_iterations: usize,
    residual_norm: f64,
}

struct CgRunnerState {
    matrix: Matrix,
    state: CgState,
}

impl CgRunnerState {
    fn new(matrix: Matrix, rhs: Vec<f64>, settings: &CgSettings) -> anyhow::Result<Self> {
        let state = CgState::new(&matrix, &build_rhs(rhs), settings)
            .context("Conjugate Gradient init failed")?;
        Ok(Self { matrix, state })
    }

    fn run_steps(&mut self, batch_size: u32) -> anyhow::Result<CgSolveProgress> {
        for _ in 0..batch_size {
            if self
                .state
                .step(&self.matrix)
                .context("Conjugate Gradient step failed")?
            {
                break;
            }
        }
        Ok(self.progress())
    }

    fn progress(&self) -> CgSolveProgress {
        CgSolveProgress {
            done: self.state.is_done(),
            iterations: self.state.iterations(),
            max_iterations: self.state.max_iterations(),
            residual_norm: self.state.residual_norm(),
        }
    }

    fn report(&self) -> CgReport {
        self.state.clone().into_report()
    }
}

/// WASM-exported runner for a stepped Conjugate Gradient solve.
/// Allows progress reporting by running batches of iterations at a time.
#[wasm_bindgen]
pub struct WasmCgRunner {
    state: Option<CgRunnerState>,
}

#[wasm_bindgen]
impl WasmCgRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(
        matrix: &WasmMatrix,
        rhs: Vec<f64>,
        settings_val: JsValue,
    ) -> Result<WasmCgRunner, JsValue> {
        console_error_panic_hook::set_once();

        let settings = parse_settings(settings_val)?;
        let state = CgRunnerState::new(matrix.matrix.clone(), rhs, &settings)
            .map_err(to_js_error)?;

        Ok(WasmCgRunner { state: Some(state) })
    }

    pub fn is_done(&self) -> bool {
        self.state.as_ref().map_or(true, |state| state.state.is_done())
    }

    pub fn run_steps(&mut self, batch_size: u32) -> Result<JsValue, JsValue> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;

        let progress = state.run_steps(batch_size).map_err(to_js_error)?;
        to_value(&progress).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn get_progress(&self) -> Result<JsValue, JsValue> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;

        to_value(&state.progress())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn get_result(&self) -> Result<JsValue, JsValue> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;

        if !state.state.is_done() {
            return Err(JsValue::from_str("Conjugate Gradient solve has not finished yet."));
        }

        to_value(&state.report())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

/// One-shot Conjugate Gradient solve over a row-major matrix.
#[wasm_bindgen]
pub fn solve_cg(
    rows: u32,
    cols: u32,
    values: Vec<f64>,
    rhs: Vec<f64>,
    settings_val: JsValue,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let settings = parse_settings(settings_val)?;
    let report = solve(rows as usize, cols as usize, &values, rhs, &settings)
        .map_err(to_js_error)?;
    to_value(&report).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn solve(
    rows: usize,
    cols: usize,
    values: &[f64],
    rhs: Vec<f64>,
    settings: &CgSettings,
) -> anyhow::Result<CgReport> {
    let matrix = build_matrix(rows, cols, values)?;
    cg_solve(&matrix, &build_rhs(rhs), settings).context("Conjugate Gradient solve failed")
}
