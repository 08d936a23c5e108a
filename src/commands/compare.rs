//! `states`, `process` and `diamond` commands: evaluate every applicable
//! metric on user-supplied matrices.
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::input::{self, DiamondInput, ProcessInput, StatesInput};
use crate::config::Config;
use crate::core::types::{ChoiMatrix, DensityMatrix, PauliLiouville};
use crate::io::atomic::write_json;
use crate::metrics::{self, ChernoffBound, WatrousBounds};
use crate::sdp::SdpSolver;

#[derive(Clone, Debug, Serialize)]
pub struct StateReport {
    pub dim: usize,
    pub fidelity: f64,
    pub infidelity: f64,
    pub trace_distance: f64,
    pub discrimination_probability: f64,
    pub bures_distance: f64,
    pub bures_angle: f64,
    pub hilbert_schmidt_ip: f64,
    pub quantum_chernoff_bound: ChernoffBound,
    pub dim_renorm: bool,
    pub purity_rho: f64,
    pub purity_sigma: f64,
    pub impurity_rho: f64,
    pub impurity_sigma: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_variation_distance: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ProcessReport {
    pub dim: usize,
    pub process_fidelity: f64,
    pub process_infidelity: f64,
    pub entanglement_fidelity: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct DiamondReport {
    pub dim: usize,
    pub diamond_norm_distance: f64,
    pub watrous_bounds: WatrousBounds,
}

pub fn state_report(
    rho: &DensityMatrix,
    sigma: &DensityMatrix,
    dim_renorm: bool,
    cfg: &Config,
) -> Result<StateReport> {
    Ok(StateReport {
        dim: rho.dim(),
        fidelity: metrics::fidelity(rho, sigma)?,
        infidelity: metrics::infidelity(rho, sigma)?,
        trace_distance: metrics::trace_distance(rho, sigma)?,
        discrimination_probability: metrics::discrimination_probability(rho, sigma)?,
        bures_distance: metrics::bures_distance(rho, sigma)?,
        bures_angle: metrics::bures_angle(rho, sigma)?,
        hilbert_schmidt_ip: metrics::hilbert_schmidt_ip(rho, sigma)?,
        quantum_chernoff_bound: metrics::quantum_chernoff_bound_with(rho, sigma, &cfg.chernoff)?,
        dim_renorm,
        purity_rho: metrics::purity(rho, dim_renorm)?,
        purity_sigma: metrics::purity(sigma, dim_renorm)?,
        impurity_rho: metrics::impurity(rho, dim_renorm)?,
        impurity_sigma: metrics::impurity(sigma, dim_renorm)?,
        total_variation_distance: None,
    })
}

pub fn process_report(r_p: &PauliLiouville, r_u: &PauliLiouville) -> Result<ProcessReport> {
    Ok(ProcessReport {
        dim: r_p.dim(),
        process_fidelity: metrics::process_fidelity(r_p, r_u)?,
        process_infidelity: metrics::process_infidelity(r_p, r_u)?,
        entanglement_fidelity: metrics::entanglement_fidelity(r_p, r_u)?,
    })
}

pub fn diamond_report(c0: &ChoiMatrix, c1: &ChoiMatrix, cfg: &Config) -> Result<DiamondReport> {
    diamond_report_with(c0, c1, &cfg.solver())
}

/// One SDP solve; the distance is the midpoint of the reported bracket.
pub fn diamond_report_with(
    c0: &ChoiMatrix,
    c1: &ChoiMatrix,
    solver: &dyn SdpSolver,
) -> Result<DiamondReport> {
    let watrous_bounds = metrics::watrous_bounds_with(&c0.difference(c1)?, solver)?;
    Ok(DiamondReport {
        dim: c0.dim(),
        diamond_norm_distance: watrous_bounds.midpoint(),
        watrous_bounds,
    })
}

pub(crate) fn row(label: &str, value: f64) {
    println!("  {:<30} {:.6}", label.cyan(), value);
}

pub(crate) fn print_states(r: &StateReport) {
    println!("{} (d = {})", "state metrics".bold(), r.dim);
    row("fidelity", r.fidelity);
    row("infidelity", r.infidelity);
    row("trace distance", r.trace_distance);
    row("discrimination probability", r.discrimination_probability);
    row("Bures distance", r.bures_distance);
    row("Bures angle", r.bures_angle);
    row("Hilbert-Schmidt inner product", r.hilbert_schmidt_ip);
    row("quantum Chernoff exponent", r.quantum_chernoff_bound.qcb_exp);
    row("  at s", r.quantum_chernoff_bound.s_opt);
    let tag = if r.dim_renorm { " (renormalized)" } else { "" };
    row(&format!("purity ρ{tag}"), r.purity_rho);
    row(&format!("purity σ{tag}"), r.purity_sigma);
    row(&format!("impurity ρ{tag}"), r.impurity_rho);
    row(&format!("impurity σ{tag}"), r.impurity_sigma);
    if let Some(tvd) = r.total_variation_distance {
        row("total variation distance", tvd);
    }
}

pub(crate) fn print_process(r: &ProcessReport) {
    println!("{} (d = {})", "process metrics".bold(), r.dim);
    row("process fidelity", r.process_fidelity);
    row("process infidelity", r.process_infidelity);
    row("entanglement fidelity", r.entanglement_fidelity);
}

pub(crate) fn print_diamond(r: &DiamondReport) {
    println!("{} (d = {})", "diamond norm".bold(), r.dim);
    row("diamond norm distance", r.diamond_norm_distance);
    row("Watrous lower bound", r.watrous_bounds.lower);
    row("Watrous upper bound", r.watrous_bounds.upper);
}

fn maybe_write(json: &Option<PathBuf>, value: &impl Serialize) -> Result<()> {
    if let Some(path) = json {
        write_json(path, value)?;
        println!("{} {}", "wrote".green(), path.display());
    }
    Ok(())
}

pub fn states(path: &Path, renorm: bool, json: &Option<PathBuf>, cfg: &Config) -> Result<()> {
    let data: StatesInput = input::read_json(path)?;
    let tol = cfg.tolerance.state;
    let rho = input::density_matrix("rho", &data.rho, tol)?;
    let sigma = input::density_matrix("sigma", &data.sigma, tol)?;
    let mut report = state_report(&rho, &sigma, renorm, cfg).context("state metrics")?;
    if let (Some(p), Some(q)) = (&data.p, &data.q) {
        let p = input::probability_vector("p", p, tol)?;
        let q = input::probability_vector("q", q, tol)?;
        report.total_variation_distance = Some(metrics::total_variation_distance(&p, &q)?);
    }
    print_states(&report);
    maybe_write(json, &report)
}

pub fn process(path: &Path, json: &Option<PathBuf>) -> Result<()> {
    let data: ProcessInput = input::read_json(path)?;
    let r_p = input::pauli_liouville("r_p", &data.r_p)?;
    let r_u = input::pauli_liouville("r_u", &data.r_u)?;
    let report = process_report(&r_p, &r_u).context("process metrics")?;
    print_process(&report);
    maybe_write(json, &report)
}

pub fn diamond(path: &Path, json: &Option<PathBuf>, cfg: &Config) -> Result<()> {
    let data: DiamondInput = input::read_json(path)?;
    let tol = cfg.tolerance.state;
    let c0 = input::choi_matrix("choi0", &data.choi0, tol)?;
    let c1 = input::choi_matrix("choi1", &data.choi1, tol)?;
    let report = diamond_report(&c0, &c1, cfg).context("diamond norm")?;
    print_diamond(&report);
    maybe_write(json, &report)
}
