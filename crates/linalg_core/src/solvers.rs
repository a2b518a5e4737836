//! Conjugate Gradient solver for `A·x = b`.
//!
//! The iteration starts from a vector of ones rather than zeros and runs for at most
//! `b.size()` steps, which is enough for a symmetric positive-definite system in exact
//! arithmetic. For any other `A` the result after the last step is returned as-is; running out
//! of iterations is reported through [`CgReport::converged`], never as an error.

use crate::error::Result;
use crate::matrix::Matrix;
use crate::vector::Vector;
use log::{debug, log, Level};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CgSettings {
    /// Stop once `sqrt(r·r)` drops below this value.
    pub tolerance: f64,
    /// Iteration budget; `None` means `b.size()`.
    pub max_iterations: Option<usize>,
    /// Fill value of the starting guess `x₀`.
    pub initial_value: f64,
}

impl Default for CgSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: None,
            initial_value: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CgReport {
    pub solution: Vector,
    pub iterations: usize,
    pub residual_norm: f64,
    pub converged: bool,
}

/// State of one Conjugate Gradient solve.
///
/// Holds the iterate `x`, residual `r`, search direction `p` and the previous `r·r`. The
/// matrix is not stored: every call to [`CgState::step`] must pass the `A` the state was
/// created with.
#[derive(Debug, Clone)]
pub struct CgState {
    x: Vector,
    r: Vector,
    p: Vector,
    rr: f64,
    iterations: usize,
    max_iterations: usize,
    tolerance: f64,
    converged: bool,
}

impl CgState {
    pub fn new(a: &Matrix, b: &Vector, settings: &CgSettings) -> Result<Self> {
        let x = Vector::new(b.size(), settings.initial_value);
        let r = (b - &a.mul_vector(&x)?)?;
        let rr = r.dot(&r)?;
        let p = r.clone();
        // An exact starting guess would make the first step divide 0 by 0.
        let converged = rr.sqrt() < settings.tolerance;
        Ok(Self {
            x,
            r,
            p,
            rr,
            iterations: 0,
            max_iterations: settings.max_iterations.unwrap_or(b.size()),
            tolerance: settings.tolerance,
            converged,
        })
    }

    /// Performs one iteration. Returns `true` once the solve is finished, either because the
    /// residual dropped below the tolerance or because the iteration budget is spent.
    pub fn step(&mut self, a: &Matrix) -> Result<bool> {
        if self.is_done() {
            return Ok(true);
        }

        let alpha = self.rr / self.p.dot(&a.mul_vector(&self.p)?)?;
        self.x.try_add_assign(&(alpha * &self.p))?;
        self.r.try_sub_assign(&(alpha * &a.mul_vector(&self.p)?))?;
        let rr = self.r.dot(&self.r)?;
        self.iterations += 1;

        debug!(
            "CG iteration {}: alpha = {:e}, residual = {:e}",
            self.iterations,
            alpha,
            rr.sqrt()
        );

        if rr.sqrt() < self.tolerance {
            self.rr = rr;
            self.converged = true;
            return Ok(true);
        }

        let beta = rr / self.rr;
        self.p = (&self.r + &(beta * &self.p))?;
        self.rr = rr;
        Ok(self.is_done())
    }

    pub fn is_done(&self) -> bool {
        self.converged || self.iterations >= self.max_iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// `sqrt(r·r)` of the tracked residual.
    pub fn residual_norm(&self) -> f64 {
        self.rr.sqrt()
    }

    pub fn solution(&self) -> &Vector {
        &self.x
    }

    pub fn into_report(self) -> CgReport {
        CgReport {
            residual_norm: self.residual_norm(),
            solution: self.x,
            iterations: self.iterations,
            converged: self.converged,
        }
    }
}

/// Runs Conjugate Gradient to completion.
///
/// Dimension errors from the underlying products propagate unchanged; there is no separate
/// check that `A` is square or matches `b`.
pub fn cg_solve(a: &Matrix, b: &Vector, settings: &CgSettings) -> Result<CgReport> {
    let mut state = CgState::new(a, b, settings)?;
    while !state.step(a)? {}

    let outcome = if state.converged() {
        "converged"
    } else {
        "stopped without reaching tolerance"
    };
    log!(
        termination_level(state.converged()),
        "CG {} after {} iterations (residual = {:e})",
        outcome,
        state.iterations(),
        state.residual_norm()
    );
    Ok(state.into_report())
}

fn termination_level(converged: bool) -> Level {
    if converged {
        Level::Info
    } else {
        Level::Warn
    }
}

/// Solves `A·x = b` with the default settings and returns `x`.
pub fn cg_solver(a: &Matrix, b: &Vector) -> Result<Vector> {
    cg_solve(a, b, &CgSettings::default()).map(|report| report.solution)
}
