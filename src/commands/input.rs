//! JSON inputs for the `states`, `process` and `diamond` commands.
//!
//! Complex entries are `[re, im]` pairs, matrices are arrays of rows.
use anyhow::{bail, Context, Result};
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

use crate::core::linalg::CMatrix;
use crate::core::types::{ChoiMatrix, DensityMatrix, PauliLiouville, ProbabilityVector};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatesInput {
    pub rho: Vec<Vec<C64>>,
    pub sigma: Vec<Vec<C64>>,
    #[serde(default)]
    pub p: Option<Vec<f64>>,
    #[serde(default)]
    pub q: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessInput {
    pub r_p: Vec<Vec<f64>>,
    pub r_u: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiamondInput {
    pub choi0: Vec<Vec<C64>>,
    pub choi1: Vec<Vec<C64>>,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Read input {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Parse input {}", path.display()))
}

fn rows_to_matrix<T: nalgebra::Scalar + Copy>(name: &str, rows: &[Vec<T>]) -> Result<DMatrix<T>> {
    let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
    if rows.is_empty() || ncols == 0 {
        bail!("`{name}` is empty");
    }
    if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        bail!("`{name}` row {i} has {} entries, expected {ncols}", r.len());
    }
    let flat: Vec<T> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Ok(DMatrix::from_row_slice(rows.len(), ncols, &flat))
}

pub fn complex_matrix(name: &str, rows: &[Vec<C64>]) -> Result<CMatrix> {
    rows_to_matrix(name, rows)
}

pub fn density_matrix(name: &str, rows: &[Vec<C64>], tol: f64) -> Result<DensityMatrix> {
    DensityMatrix::try_new_with(complex_matrix(name, rows)?, tol).with_context(|| format!("`{name}`"))
}

pub fn choi_matrix(name: &str, rows: &[Vec<C64>], tol: f64) -> Result<ChoiMatrix> {
    ChoiMatrix::try_new_with(complex_matrix(name, rows)?, tol).with_context(|| format!("`{name}`"))
}

pub fn pauli_liouville(name: &str, rows: &[Vec<f64>]) -> Result<PauliLiouville> {
    PauliLiouville::try_new(rows_to_matrix(name, rows)?).with_context(|| format!("`{name}`"))
}

pub fn probability_vector(name: &str, p: &[f64], tol: f64) -> Result<ProbabilityVector> {
    ProbabilityVector::try_new_with(p.to_vec(), tol).with_context(|| format!("`{name}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complex_pairs() {
        let input: StatesInput = serde_json::from_str(
            r#"{"rho": [[[1,0],[0,0]],[[0,0],[0,0]]], "sigma": [[[0.5,0],[0,-0.5]],[[0,0.5],[0.5,0]]]}"#,
        )
        .unwrap();
        let sigma = complex_matrix("sigma", &input.sigma).unwrap();
        assert_eq!(sigma[(0, 1)], C64::new(0.0, -0.5));
        assert_eq!(sigma[(1, 0)], C64::new(0.0, 0.5));
        assert!(input.p.is_none());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = rows_to_matrix("r_p", &[vec![1.0, 0.0], vec![1.0]]).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}
