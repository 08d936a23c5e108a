use approx::assert_abs_diff_eq;
use nalgebra::DMatrix;
use qmetrics::core::gates::{self, unitary_pauli_liouville};
use qmetrics::{entanglement_fidelity, process_fidelity, process_infidelity, PauliLiouville, QMetricError};

fn depolarizing_pl(p: f64) -> PauliLiouville {
    // R = diag(1, 1−p, 1−p, 1−p)
    PauliLiouville::try_new(DMatrix::from_diagonal(&nalgebra::DVector::from_vec(vec![
        1.0,
        1.0 - p,
        1.0 - p,
        1.0 - p,
    ])))
    .unwrap()
}

#[test]
fn identity_vs_rx_matches_closed_form() {
    let theta = 0.4_f64;
    let id = unitary_pauli_liouville(&gates::i2()).unwrap();
    let rx = unitary_pauli_liouville(&gates::rx(theta)).unwrap();

    // F_e = cos²(θ/2), F = (2 F_e + 1) / 3
    let fe = (theta / 2.0).cos().powi(2);
    let f = (2.0 * fe + 1.0) / 3.0;
    assert_abs_diff_eq!(entanglement_fidelity(&rx, &id).unwrap(), fe, epsilon = 1e-12);
    assert_abs_diff_eq!(process_fidelity(&rx, &id).unwrap(), f, epsilon = 1e-12);
    assert_abs_diff_eq!(process_fidelity(&rx, &id).unwrap(), 0.973_687, epsilon = 1e-6);
    assert_abs_diff_eq!(process_infidelity(&rx, &id).unwrap(), 1.0 - f, epsilon = 1e-12);
}

#[test]
fn process_fidelity_with_itself_is_one() {
    for u in [gates::h(), gates::ry(1.3), gates::z()] {
        let r = unitary_pauli_liouville(&u).unwrap();
        assert_abs_diff_eq!(process_fidelity(&r, &r).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(process_infidelity(&r, &r).unwrap(), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn depolarizing_fidelity_is_linear_in_p() {
    let id = unitary_pauli_liouville(&gates::i2()).unwrap();
    for p in [0.0, 0.1, 0.5, 1.0] {
        // F_e = 1 − 3p/4, F = 1 − p/2
        let r = depolarizing_pl(p);
        assert_abs_diff_eq!(entanglement_fidelity(&r, &id).unwrap(), 1.0 - 0.75 * p, epsilon = 1e-12);
        assert_abs_diff_eq!(process_fidelity(&r, &id).unwrap(), 1.0 - 0.5 * p, epsilon = 1e-12);
    }
}

#[test]
fn orthogonal_paulis_have_floor_fidelity() {
    let x = unitary_pauli_liouville(&gates::x()).unwrap();
    let z = unitary_pauli_liouville(&gates::z()).unwrap();
    assert_abs_diff_eq!(entanglement_fidelity(&x, &z).unwrap(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(process_fidelity(&x, &z).unwrap(), 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn two_qubit_fidelity() {
    let id = unitary_pauli_liouville(&DMatrix::identity(4, 4)).unwrap();
    assert_eq!(id.dim(), 4);
    assert_abs_diff_eq!(process_fidelity(&id, &id).unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn mismatched_shapes_are_rejected() {
    let one_qubit = unitary_pauli_liouville(&gates::i2()).unwrap();
    let two_qubit = unitary_pauli_liouville(&DMatrix::identity(4, 4)).unwrap();
    assert!(matches!(
        process_fidelity(&one_qubit, &two_qubit),
        Err(QMetricError::DimensionMismatch { .. })
    ));
}

#[test]
fn pauli_liouville_needs_a_perfect_square_side() {
    assert!(matches!(
        PauliLiouville::try_new(DMatrix::identity(3, 3)),
        Err(QMetricError::InvalidState(_))
    ));
    assert!(PauliLiouville::try_new(DMatrix::identity(2, 4)).is_err());
}
