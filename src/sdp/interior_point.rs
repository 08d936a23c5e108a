//! Barrier method for Watrous's diamond-norm program.
//!
//! Taking `Y₀ = Y₁ = Y` in the dual loses nothing, and the block constraint
//! splits into `Y ⪰ J` and `Y ⪰ −J`:
//!
//! ```text
//! min t   s.t.   Y − J ⪰ 0,   Y + J ⪰ 0,   t·I − Tr_out Y ⪰ 0
//! ```
//!
//! The program is solved for `J/‖J‖∞` by damped Newton steps on
//!
//! ```text
//! κ·t − log det(Y − J) − log det(Y + J) − log det(t·I − Tr_out Y)
//! ```
//!
//! with κ growing geometrically. Every iterate is strictly dual feasible, so
//! `λ_max(Tr_out Y)` is an upper bound. At a centered point,
//! `V = (t·I − Tr_out Y)⁻¹` normalized to unit trace is the matching input
//! state, and its primal value is the lower bound.
use super::{DiamondNormProgram, SdpSolution, SdpSolver, SolverConfig};
use crate::core::error::{QMetricError, Result};
use crate::core::linalg::{self, c, CMatrix};
use nalgebra::{Cholesky, Dyn};
use num_complex::Complex64 as C64;
use tracing::{debug, debug_span, trace};

/// Newton steps allowed per barrier weight before the certificates are read.
const MAX_CENTERING_STEPS: usize = 50;
/// Step length below which the line search gives up on the current center.
const MIN_STEP: f64 = 1e-12;

#[derive(Clone, Debug, Default)]
pub struct InteriorPointSolver {
    config: SolverConfig,
}

impl InteriorPointSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

/// `‖(I ⊗ √ρ) J (I ⊗ √ρ)‖₁`, the primal objective at input state ρ.
fn primal_value(j: &CMatrix, rho: &CMatrix, d: usize) -> Result<f64> {
    let s = linalg::lift_second(&linalg::psd_sqrt(rho, "SDP input state")?, d);
    linalg::trace_norm(&(&s * j * &s))
}

/// Cholesky factor of the Hermitian part of `m`, or `None` unless it is
/// positive definite.
///
/// A complex factorization takes the square root of a negative pivot instead
/// of failing, so definiteness is read off the diagonal of the factor.
fn cholesky(m: &CMatrix) -> Option<Cholesky<C64, Dyn>> {
    let chol = linalg::hermitian_part(m).cholesky()?;
    let definite = chol
        .l_dirty()
        .diagonal()
        .iter()
        .all(|z| z.re > 0.0 && z.im.abs() < z.re && z.re.is_finite());
    definite.then_some(chol)
}

/// Cholesky factors of the three barrier blocks at a strictly feasible point.
struct Slacks {
    minus: Cholesky<C64, Dyn>,
    plus: Cholesky<C64, Dyn>,
    budget: Cholesky<C64, Dyn>,
}

impl Slacks {
    fn at(jn: &CMatrix, t: f64, y: &CMatrix, d: usize) -> Option<Self> {
        let budget = CMatrix::identity(d, d) * c(t, 0.0) - linalg::partial_trace_first(y, d, d);
        Some(Self {
            minus: cholesky(&(y - jn))?,
            plus: cholesky(&(y + jn))?,
            budget: cholesky(&budget)?,
        })
    }
}

fn vec(m: &CMatrix) -> CMatrix {
    CMatrix::from_column_slice(m.len(), 1, m.as_slice())
}

fn unvec(v: &CMatrix, n: usize) -> CMatrix {
    CMatrix::from_column_slice(n, n, v.as_slice())
}

fn inner(a: &CMatrix, b: &CMatrix) -> f64 {
    a.dotc(b).re
}

/// Hessian of the barrier in `Y`, acting on column-major `vec(H)`:
/// `W₁HW₁ + W₂HW₂ + I ⊗ (V Tr_out(H) V)`.
fn newton_matrix(w1: &CMatrix, w2: &CMatrix, v: &CMatrix, d: usize) -> CMatrix {
    let n = d * d;
    let mut h = CMatrix::zeros(n * n, n * n);
    for j in 0..n {
        for i in 0..n {
            let row = i + j * n;
            for l in 0..n {
                for k in 0..n {
                    h[(row, k + l * n)] += w1[(l, j)] * w1[(i, k)] + w2[(l, j)] * w2[(i, k)];
                }
            }
        }
    }
    for o_in in 0..d {
        for p in 0..d {
            for q in 0..d {
                let col = (o_in * d + p) + (o_in * d + q) * n;
                for o in 0..d {
                    for a in 0..d {
                        for b in 0..d {
                            h[((o * d + a) + (o * d + b) * n, col)] += v[(a, p)] * v[(q, b)];
                        }
                    }
                }
            }
        }
    }
    h
}

/// One Newton step `(Δt, ΔY)` and the squared Newton decrement.
fn newton_step(slacks: &Slacks, kappa: f64, d: usize) -> Result<(f64, CMatrix, f64)> {
    let n = d * d;
    let w1 = slacks.minus.inverse();
    let w2 = slacks.plus.inverse();
    let v = slacks.budget.inverse();

    let g_t = kappa - linalg::trace_re(&v);
    let g_y = linalg::lift_second(&v, d) - &w1 - &w2;
    let v2 = &v * &v;
    let coupling = linalg::lift_second(&v2, d);
    let h_tt = linalg::trace_re(&v2);

    let system = cholesky(&newton_matrix(&w1, &w2, &v, d))
        .ok_or_else(|| QMetricError::solver("barrier Hessian is not positive definite"))?;
    let a = unvec(&system.solve(&vec(&g_y)), n);
    let b = unvec(&system.solve(&vec(&coupling)), n);

    let dt = (-g_t - inner(&coupling, &a)) / (h_tt - inner(&coupling, &b));
    let dy = linalg::hermitian_part(&(&b * c(dt, 0.0) - a));
    let decrement = -(g_t * dt + inner(&g_y, &dy));
    if !dt.is_finite() || !decrement.is_finite() {
        return Err(QMetricError::solver(format!(
            "non-finite Newton step (dt {dt}, decrement {decrement})"
        )));
    }
    Ok((dt, dy, decrement))
}

impl SdpSolver for InteriorPointSolver {
    fn solve(&self, program: &DiamondNormProgram) -> Result<SdpSolution> {
        let cfg = &self.config;
        let d = program.dim();
        let n = d * d;
        let j = program.choi();
        let _span = debug_span!("watrous_sdp", d).entered();
        let closed = |lower: f64, upper: f64| upper - lower <= cfg.gap_tolerance * upper.max(1.0);

        // ρ = I/d against Y = |J|.
        let (abs_j, trace_norm) = linalg::hermitian_abs(j)?;
        let mut lower = trace_norm / d as f64;
        let mut upper = linalg::max_eigenvalue(&linalg::partial_trace_first(&abs_j, d, d))?;
        let mut best_state = CMatrix::identity(d, d) * c(1.0 / d as f64, 0.0);
        if closed(lower, upper) {
            debug!(iterations = 0, lower, upper, "diamond-norm SDP closed at the uniform input");
            return Ok(SdpSolution { lower, upper, iterations: 0, input_state: best_state });
        }

        let scale = linalg::eigh(j)?.values.iter().fold(0.0_f64, |m, l| m.max(l.abs()));
        let jn = j * c(1.0 / scale, 0.0);
        let mut y = CMatrix::identity(n, n) * c(2.0, 0.0);
        let mut t = 2.0 * d as f64 + 1.0;
        let mut slacks = Slacks::at(&jn, t, &y, d)
            .ok_or_else(|| QMetricError::solver("barrier start point is infeasible"))?;
        let mut kappa = 1.0_f64;
        let mut steps = 0;

        while steps < cfg.max_iterations && kappa.is_finite() {
            for _ in 0..MAX_CENTERING_STEPS {
                if steps >= cfg.max_iterations {
                    break;
                }
                let (dt, dy, decrement) = newton_step(&slacks, kappa, d)?;
                steps += 1;

                let lambda = decrement.max(0.0).sqrt();
                let mut step = if lambda > 0.25 { 1.0 / (1.0 + lambda) } else { 1.0 };
                let mut moved = None;
                while step >= MIN_STEP {
                    let y_next = &y + &dy * c(step, 0.0);
                    if let Some(next) = Slacks::at(&jn, t + step * dt, &y_next, d) {
                        moved = Some((t + step * dt, y_next, next));
                        break;
                    }
                    step *= 0.5;
                }
                let Some((t_next, y_next, next)) = moved else {
                    trace!(steps, kappa, "line search stalled");
                    break;
                };
                t = t_next;
                y = y_next;
                slacks = next;
                trace!(steps, kappa, t, decrement, step, "newton step");
                if decrement / 2.0 <= cfg.centering_tolerance {
                    break;
                }
            }

            let v = linalg::hermitian_part(&slacks.budget.inverse());
            let rho = &v * c(1.0 / linalg::trace_re(&v), 0.0);
            let primal = primal_value(j, &rho, d)?;
            let dual = scale * linalg::max_eigenvalue(&linalg::partial_trace_first(&y, d, d))?;
            if !primal.is_finite() || !dual.is_finite() {
                return Err(QMetricError::solver(format!(
                    "non-finite objective after {steps} steps (primal {primal}, dual {dual})"
                )));
            }
            if primal > lower {
                lower = primal;
                best_state = rho;
            }
            upper = upper.min(dual);
            trace!(steps, kappa, lower, upper, "centered");

            if closed(lower, upper) {
                debug!(iterations = steps, lower, upper, "diamond-norm SDP converged");
                return Ok(SdpSolution { lower, upper, iterations: steps, input_state: best_state });
            }
            kappa *= cfg.barrier_growth;
        }

        debug!(steps, lower, upper, "diamond-norm SDP hit its iteration budget");
        Err(QMetricError::NotConverged { iterations: steps, lower, upper })
    }
}
