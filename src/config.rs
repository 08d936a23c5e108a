//! TOML configuration: validation tolerance, Chernoff search budget and SDP
//! solver budget.
//!
//! ```toml
//! [tolerance]
//! state = 1e-8
//!
//! [chernoff]
//! tolerance = 1e-10
//! max_iterations = 200
//!
//! [solver]
//! max_iterations = 500
//! gap_tolerance = 1e-7
//! barrier_growth = 10.0
//! centering_tolerance = 1e-9
//! ```
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::tolerance::DEFAULT_STATE;
use crate::metrics::ChernoffConfig;
use crate::sdp::{InteriorPointSolver, SolverConfig};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToleranceConfig {
    /// Hermiticity / trace / positivity tolerance for input validation.
    pub state: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self { state: DEFAULT_STATE }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tolerance: ToleranceConfig,
    pub chernoff: ChernoffConfig,
    pub solver: SolverConfig,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(text).context("Parse config TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("Load config {}", path.display()))
    }

    /// An explicit path must exist; the default path is optional.
    pub fn load_or_default(cli_path: &Option<PathBuf>) -> Result<Self> {
        match cli_path {
            Some(p) => Self::load(p),
            None => match default_config_path() {
                Some(p) if p.is_file() => Self::load(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.state > 0.0) {
            bail!("tolerance.state must be positive, got {}", self.tolerance.state);
        }
        if !(self.chernoff.tolerance > 0.0) || self.chernoff.max_iterations == 0 {
            bail!("chernoff needs a positive tolerance and at least one iteration");
        }
        let s = &self.solver;
        if s.max_iterations == 0 {
            bail!("solver.max_iterations must be at least 1");
        }
        if !(s.gap_tolerance > 0.0) {
            bail!("solver.gap_tolerance must be positive, got {}", s.gap_tolerance);
        }
        if !(s.barrier_growth > 1.0 && s.barrier_growth.is_finite()) {
            bail!("solver.barrier_growth must be a finite factor above 1, got {}", s.barrier_growth);
        }
        if !(s.centering_tolerance > 0.0) {
            bail!("solver.centering_tolerance must be positive, got {}", s.centering_tolerance);
        }
        Ok(())
    }

    pub fn solver(&self) -> InteriorPointSolver {
        InteriorPointSolver::new(self.solver.clone())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Serialize config")
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~/.qmetrics/config.toml (%USERPROFILE%\.qmetrics\config.toml on Windows)
    dirs_next::home_dir().map(|h| h.join(".qmetrics").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}
