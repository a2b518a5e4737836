//! WASM bindings for `linalg_core`.
//!
//! Exposes a matrix wrapper, a stepped Conjugate Gradient runner for progress reporting, and a
//! one-shot solve. Settings and results cross the boundary through serde-wasm-bindgen.

mod cg_runner;
mod matrix;
mod shared;

pub use cg_runner::{solve_cg, WasmCgRunner};
pub use matrix::WasmMatrix;
