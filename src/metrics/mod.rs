//! Distance and similarity measures, grouped by the objects they compare.

pub mod diamond;
pub mod process;
pub mod purity;
pub mod states;

pub use diamond::{
    diamond_norm_distance, diamond_norm_distance_with, watrous_bounds, watrous_bounds_with,
    WatrousBounds,
};
pub use process::{entanglement_fidelity, process_fidelity, process_infidelity};
pub use purity::{impurity, purity};
pub use states::{
    bures_angle, bures_distance, discrimination_probability, fidelity, hilbert_schmidt_ip,
    infidelity, quantum_chernoff_bound, quantum_chernoff_bound_with, total_variation_distance,
    trace_distance, ChernoffBound, ChernoffConfig,
};
