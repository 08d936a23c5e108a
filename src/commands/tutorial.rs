//! `tutorial`: the worked examples, end to end.
//!
//! - states: |0⟩ vs |+⟩ (pure), |0⟩ vs I/2 (pure vs maximally mixed)
//! - distributions: (½, ½) vs (1, 0)
//! - processes: identity vs Rx(θ), in Pauli-Liouville and Choi form
//! - diamond norm: identity vs Rx(θ) and identity vs X
use anyhow::{Context, Result};
use colored::Colorize;
use nalgebra::DVector;
use serde::Serialize;
use std::path::PathBuf;

use super::compare::{
    diamond_report, print_diamond, print_process, print_states, process_report, row, state_report,
    DiamondReport, ProcessReport, StateReport,
};
use crate::config::Config;
use crate::core::gates;
use crate::core::linalg::c;
use crate::core::types::{DensityMatrix, ProbabilityVector};
use crate::io::atomic::write_json;
use crate::metrics;

#[derive(Clone, Debug, Serialize)]
pub struct TutorialReport {
    pub theta: f64,
    pub pure_states: StateReport,
    pub pure_vs_mixed: StateReport,
    pub total_variation_distance: f64,
    pub identity_vs_rx: ProcessReport,
    pub diamond_identity_vs_rx: DiamondReport,
    pub diamond_identity_vs_x: DiamondReport,
}

pub fn build(theta: f64, cfg: &Config) -> Result<TutorialReport> {
    let zero = DensityMatrix::from_ket(&DVector::from_vec(vec![c(1.0, 0.0), c(0.0, 0.0)]))?;
    let plus = DensityMatrix::from_ket(&DVector::from_vec(vec![c(1.0, 0.0), c(1.0, 0.0)]))?;
    let mixed = DensityMatrix::maximally_mixed(2)?;

    let p = ProbabilityVector::try_new(vec![0.5, 0.5])?;
    let q = ProbabilityVector::try_new(vec![1.0, 0.0])?;

    let id_pl = gates::unitary_pauli_liouville(&gates::i2())?;
    let rx_pl = gates::unitary_pauli_liouville(&gates::rx(theta))?;
    let id_choi = gates::unitary_choi(&gates::i2())?;
    let rx_choi = gates::unitary_choi(&gates::rx(theta))?;
    let x_choi = gates::unitary_choi(&gates::x())?;

    Ok(TutorialReport {
        theta,
        pure_states: state_report(&zero, &plus, false, cfg).context("|0⟩ vs |+⟩")?,
        pure_vs_mixed: state_report(&zero, &mixed, false, cfg).context("|0⟩ vs I/2")?,
        total_variation_distance: metrics::total_variation_distance(&p, &q)?,
        identity_vs_rx: process_report(&rx_pl, &id_pl).context("identity vs Rx")?,
        diamond_identity_vs_rx: diamond_report(&id_choi, &rx_choi, cfg)
            .context("diamond norm, identity vs Rx")?,
        diamond_identity_vs_x: diamond_report(&id_choi, &x_choi, cfg)
            .context("diamond norm, identity vs X")?,
    })
}

pub fn run(theta: f64, json: &Option<PathBuf>, cfg: &Config) -> Result<()> {
    let report = build(theta, cfg)?;

    println!("{}", "|0⟩ vs |+⟩".yellow().bold());
    print_states(&report.pure_states);
    println!("{}", "|0⟩ vs I/2".yellow().bold());
    print_states(&report.pure_vs_mixed);
    println!("{}", "P = (½, ½) vs Q = (1, 0)".yellow().bold());
    row("total variation distance", report.total_variation_distance);
    println!("{}", format!("identity vs Rx({theta})").yellow().bold());
    print_process(&report.identity_vs_rx);
    print_diamond(&report.diamond_identity_vs_rx);
    println!("{}", "identity vs X".yellow().bold());
    print_diamond(&report.diamond_identity_vs_x);

    if let Some(path) = json {
        write_json(path, &report)?;
        println!("{} {}", "wrote".green(), path.display());
    }
    Ok(())
}
