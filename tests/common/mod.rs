#![allow(dead_code)]
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64 as C64;
use qmetrics::core::linalg::CMatrix;
use qmetrics::{ChoiMatrix, DensityMatrix};
use rand::Rng;

pub fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

pub fn ket(amps: &[C64]) -> DensityMatrix {
    DensityMatrix::from_ket(&DVector::from_vec(amps.to_vec())).expect("valid ket")
}

pub fn zero() -> DensityMatrix {
    ket(&[c(1.0, 0.0), c(0.0, 0.0)])
}

pub fn one() -> DensityMatrix {
    ket(&[c(0.0, 0.0), c(1.0, 0.0)])
}

pub fn plus() -> DensityMatrix {
    ket(&[c(1.0, 0.0), c(1.0, 0.0)])
}

/// `ρ = A A† / Tr(A A†)` for a `d × k` matrix given as `(re, im)` entries.
pub fn density_from_entries(d: usize, k: usize, entries: &[(f64, f64)]) -> Option<DensityMatrix> {
    let a = DMatrix::from_iterator(d, k, entries.iter().map(|&(r, i)| c(r, i)));
    let m = &a * a.adjoint();
    let tr = m.trace().re;
    if tr < 1e-3 {
        return None;
    }
    Some(DensityMatrix::try_new(m * c(1.0 / tr, 0.0)).expect("AA†/Tr is a state"))
}

/// Choi matrix `Σ_k |K_k⟩⟩⟨⟨K_k|` (output ⊗ input) of a Kraus decomposition.
pub fn kraus_choi(kraus: &[CMatrix]) -> ChoiMatrix {
    let d = kraus[0].nrows();
    let mut j = CMatrix::zeros(d * d, d * d);
    for k in kraus {
        let mut v = CMatrix::zeros(d * d, 1);
        for o in 0..d {
            for i in 0..d {
                v[(o * d + i, 0)] = k[(o, i)];
            }
        }
        j += &v * v.adjoint();
    }
    ChoiMatrix::try_new(j).expect("Hermitian Choi")
}

pub fn amplitude_damping_kraus(gamma: f64) -> Vec<CMatrix> {
    vec![
        CMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c((1.0 - gamma).sqrt(), 0.0)]),
        CMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(gamma.sqrt(), 0.0), c(0.0, 0.0), c(0.0, 0.0)]),
    ]
}

pub fn amplitude_damping(gamma: f64) -> ChoiMatrix {
    kraus_choi(&amplitude_damping_kraus(gamma))
}

/// `Rx(theta)` followed by amplitude damping.
pub fn noisy_rx(theta: f64, gamma: f64) -> ChoiMatrix {
    let rx = qmetrics::core::gates::rx(theta);
    let kraus: Vec<CMatrix> = amplitude_damping_kraus(gamma).iter().map(|k| k * &rx).collect();
    kraus_choi(&kraus)
}

/// Random channel with `rank` Kraus operators, cut from the Q factor of a
/// random `(rank·d) × d` matrix (a Stinespring isometry).
pub fn random_channel(rng: &mut impl Rng, d: usize, rank: usize) -> ChoiMatrix {
    let a = CMatrix::from_fn(rank * d, d, |_, _| c(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)));
    let v = a.qr().q();
    let kraus: Vec<CMatrix> = (0..rank).map(|r| v.rows(r * d, d).into_owned()).collect();
    kraus_choi(&kraus)
}

/// `ρ ↦ (1 − p)ρ + p I/2`.
pub fn depolarizing(p: f64) -> ChoiMatrix {
    use qmetrics::core::gates::{i2, x, y, z};
    let a = c((1.0 - 0.75 * p).sqrt(), 0.0);
    let b = c((0.25 * p).sqrt(), 0.0);
    kraus_choi(&[i2() * a, x() * b, y() * b, z() * b])
}
