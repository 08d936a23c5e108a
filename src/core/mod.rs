//! Numerical foundation: validated inputs, errors, tolerances and the
//! Hermitian eigen-calculus every metric is built on.

pub mod error;
pub mod gates;
pub mod linalg;
pub mod optimization;
pub mod tolerance;
pub mod types;

pub use error::{QMetricError, Result};
pub use types::{ChoiMatrix, DensityMatrix, PauliLiouville, ProbabilityVector};
