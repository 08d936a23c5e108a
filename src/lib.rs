//! Distance measures between quantum states and quantum processes.
//!
//! - state pairs: fidelity, trace distance, Bures distance/angle,
//!   Hilbert–Schmidt inner product, quantum Chernoff bound
//! - distributions: total variation distance
//! - single states: purity and impurity
//! - processes: process (average gate) fidelity on Pauli-Liouville matrices,
//!   diamond-norm distance and Watrous bounds on Choi matrices
//!
//! Every routine is a pure function of validated inputs
//! ([`DensityMatrix`], [`PauliLiouville`], [`ChoiMatrix`],
//! [`ProbabilityVector`]) and returns [`Result`].
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod metrics;
pub mod sdp;

pub use crate::core::{ChoiMatrix, DensityMatrix, PauliLiouville, ProbabilityVector, QMetricError, Result};
pub use crate::metrics::*;
