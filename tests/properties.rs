//! Property-based checks of the textbook relations between the state metrics.

mod common;

use common::density_from_entries;
use proptest::prelude::*;
use qmetrics::{
    fidelity, hilbert_schmidt_ip, impurity, purity, quantum_chernoff_bound,
    total_variation_distance, trace_distance, DensityMatrix, ProbabilityVector,
};

const TOL: f64 = 1e-6;

fn arb_entries(d: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    proptest::collection::vec((-1.0f64..1.0, -1.0f64..1.0), d * d)
}

/// Two random full-rank-ish states of a common dimension 2 or 3.
fn arb_state_pair() -> impl Strategy<Value = (usize, Vec<(f64, f64)>, Vec<(f64, f64)>)> {
    (2usize..=3).prop_flat_map(|d| (Just(d), arb_entries(d), arb_entries(d)))
}

fn arb_distribution_pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (2usize..=6).prop_flat_map(|n| {
        (
            proptest::collection::vec(0.01f64..1.0, n),
            proptest::collection::vec(0.01f64..1.0, n),
        )
    })
}

fn normalized(w: &[f64]) -> ProbabilityVector {
    let total: f64 = w.iter().sum();
    ProbabilityVector::try_new(w.iter().map(|x| x / total).collect()).unwrap()
}

fn states(d: usize, a: &[(f64, f64)], b: &[(f64, f64)]) -> Option<(DensityMatrix, DensityMatrix)> {
    Some((density_from_entries(d, d, a)?, density_from_entries(d, d, b)?))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    #[test]
    fn fidelity_is_symmetric_and_bounded((d, a, b) in arb_state_pair()) {
        let pair = states(d, &a, &b);
        prop_assume!(pair.is_some());
        let (rho, sigma) = pair.unwrap();
        let f = fidelity(&rho, &sigma).unwrap();
        prop_assert!((0.0..=1.0).contains(&f));
        prop_assert!((f - fidelity(&sigma, &rho).unwrap()).abs() < TOL);
        prop_assert!((fidelity(&rho, &rho).unwrap() - 1.0).abs() < TOL);
    }

    #[test]
    fn fuchs_van_de_graaf((d, a, b) in arb_state_pair()) {
        let pair = states(d, &a, &b);
        prop_assume!(pair.is_some());
        let (rho, sigma) = pair.unwrap();
        let f = fidelity(&rho, &sigma).unwrap();
        let t = trace_distance(&rho, &sigma).unwrap();
        prop_assert!((0.0..=1.0).contains(&t));
        prop_assert!(1.0 - f.sqrt() <= t + TOL, "F = {f}, T = {t}");
        prop_assert!(t <= (1.0 - f).sqrt() + TOL, "F = {f}, T = {t}");
    }

    #[test]
    fn chernoff_sits_between_trace_distance_and_fidelity((d, a, b) in arb_state_pair()) {
        let pair = states(d, &a, &b);
        prop_assume!(pair.is_some());
        let (rho, sigma) = pair.unwrap();
        let qcb = quantum_chernoff_bound(&rho, &sigma).unwrap();
        let t = trace_distance(&rho, &sigma).unwrap();
        let f = fidelity(&rho, &sigma).unwrap();
        prop_assert!((0.0..=1.0).contains(&qcb.s_opt));
        prop_assert!(1.0 - t <= qcb.qcb_exp + TOL, "Q = {}, T = {t}", qcb.qcb_exp);
        prop_assert!(qcb.qcb_exp <= f.sqrt() + TOL, "Q = {}, F = {f}", qcb.qcb_exp);
    }

    #[test]
    fn purity_and_impurity_are_complementary((d, a, _b) in arb_state_pair()) {
        let rho = density_from_entries(d, d, &a);
        prop_assume!(rho.is_some());
        let rho = rho.unwrap();
        for renorm in [false, true] {
            let p = purity(&rho, renorm).unwrap();
            let floor = if renorm { 0.0 } else { 1.0 / d as f64 };
            prop_assert!(p >= floor && p <= 1.0, "purity {p}");
            prop_assert!((p + impurity(&rho, renorm).unwrap() - 1.0).abs() < 1e-12);
        }
        prop_assert!((purity(&rho, false).unwrap() - hilbert_schmidt_ip(&rho, &rho).unwrap()).abs() < TOL);
    }

    #[test]
    fn total_variation_is_symmetric_and_bounded((w, v) in arb_distribution_pair()) {
        let p = normalized(&w);
        let q = normalized(&v);
        let pq = total_variation_distance(&p, &q).unwrap();
        prop_assert!((0.0..=1.0).contains(&pq));
        prop_assert!((pq - total_variation_distance(&q, &p).unwrap()).abs() < 1e-15);
    }
}
