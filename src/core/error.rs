//! Error taxonomy shared by every metric.

use thiserror::Error;

/// Failures raised by the distance-measure routines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QMetricError {
    /// Paired inputs do not share a shape; raised before any numeric work.
    #[error("dimension mismatch in {context}: {left} vs {right}")]
    DimensionMismatch {
        context: &'static str,
        left: String,
        right: String,
    },

    /// Input failed a shape, Hermiticity, trace or positivity check.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The SDP did not close its duality gap within the iteration budget.
    #[error("SDP not converged after {iterations} iterations (bracket [{lower:.9}, {upper:.9}])")]
    NotConverged {
        iterations: usize,
        lower: f64,
        upper: f64,
    },

    /// The SDP backend broke down numerically.
    #[error("SDP solver error: {0}")]
    SolverError(String),

    /// An intermediate or final value left its admissible range beyond tolerance.
    #[error("domain error in {quantity}: {value:e}")]
    DomainError { quantity: &'static str, value: f64 },
}

impl QMetricError {
    pub fn mismatch(context: &'static str, left: (usize, usize), right: (usize, usize)) -> Self {
        QMetricError::DimensionMismatch {
            context,
            left: format!("{}x{}", left.0, left.1),
            right: format!("{}x{}", right.0, right.1),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        QMetricError::InvalidState(message.into())
    }

    pub fn solver(message: impl Into<String>) -> Self {
        QMetricError::SolverError(message.into())
    }

    pub fn domain(quantity: &'static str, value: f64) -> Self {
        QMetricError::DomainError { quantity, value }
    }
}

pub type Result<T> = std::result::Result<T, QMetricError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_error() {
        let err = QMetricError::mismatch("fidelity", (2, 2), (4, 4));
        assert_eq!(format!("{}", err), "dimension mismatch in fidelity: 2x2 vs 4x4");
    }
    #[test]
    fn test_invalid_state_error() {
        let err = QMetricError::invalid_state("trace is 0.5, expected 1");
        assert_eq!(format!("{}", err), "invalid state: trace is 0.5, expected 1");
    }
    #[test]
    fn test_solver_error() {
        let err = QMetricError::solver("eigendecomposition failed");
        assert_eq!(format!("{}", err), "SDP solver error: eigendecomposition failed");
    }
    #[test]
    fn test_domain_error() {
        let err = QMetricError::domain("fidelity", 1.5);
        assert_eq!(format!("{}", err), "domain error in fidelity: 1.5e0");
    }
}
