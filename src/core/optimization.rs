//! Bounded one-dimensional minimization.
//!
//! - `golden_section_search`: bracketing method for unimodal minimization on a
//!   closed interval, endpoints included.

/// Minimizer and minimum found by a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimum {
    pub x: f64,
    pub fx: f64,
    pub iterations: usize,
}

/// Golden-section search for the minimum of a *unimodal* `f` on `[a, b]`.
/// - `tol`: absolute tolerance on the `x` bracket
/// - `max_iter`: iteration cap
///
/// The endpoints `a` and `b` are evaluated as well, so a minimum sitting on
/// the boundary of the closed interval is reported exactly.
/// Returns `None` if `a >= b` or `f` produces a non-finite value.
pub fn golden_section_search<F>(f: F, a: f64, b: f64, tol: f64, max_iter: usize) -> Option<Minimum>
where
    F: Fn(f64) -> f64,
{
    if !(a < b) {
        return None;
    }
    let (lo, hi) = (a, b);
    let (mut a, mut b) = (a, b);

    // ϕ = (sqrt(5)-1)/2 ≈ 0.618; interior points sit at a + (1-ϕ)(b-a) and a + ϕ(b-a).
    let phi = (5.0f64.sqrt() - 1.0) * 0.5;
    let inv_phi = 1.0 - phi;

    let mut x1 = a + inv_phi * (b - a);
    let mut x2 = a + phi * (b - a);
    let mut f1 = f(x1);
    let mut f2 = f(x2);

    let min_tol = 1e-15_f64.max(tol);
    let mut iterations = 0;

    while iterations < max_iter && (b - a).abs() > min_tol {
        if !f1.is_finite() || !f2.is_finite() {
            return None;
        }
        if f1 > f2 {
            // Minimum is in [x1, b]
            a = x1;
            x1 = x2;
            f1 = f2;
            x2 = a + phi * (b - a);
            f2 = f(x2);
        } else {
            // Minimum is in [a, x2]
            b = x2;
            x2 = x1;
            f2 = f1;
            x1 = a + inv_phi * (b - a);
            f1 = f(x1);
        }
        iterations += 1;
    }

    let xm = 0.5 * (a + b);
    let candidates = [(xm, f(xm)), (x1, f1), (x2, f2), (lo, f(lo)), (hi, f(hi))];
    if candidates.iter().any(|(_, fx)| !fx.is_finite()) {
        return None;
    }
    let (x, fx) = candidates
        .into_iter()
        .fold((xm, f64::INFINITY), |best, cand| if cand.1 < best.1 { cand } else { best });
    Some(Minimum { x, fx, iterations })
}
