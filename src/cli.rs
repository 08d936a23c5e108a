use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "qmetrics",
    about = "Distance measures between quantum states and quantum processes",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct QMetricsCli {
    /// Global: debug logging from the metric library (overrides RUST_LOG)
    #[arg(long = "debug-metrics", action = ArgAction::SetTrue, global = true)]
    pub debug_metrics: bool,

    /// Global: path to config (TOML); default: ~/.qmetrics/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the worked examples: single-qubit states, identity vs Rx(θ), identity vs X
    ///
    /// Examples:
    ///   qmetrics tutorial
    ///   qmetrics tutorial --theta 0.1 --json report.json
    Tutorial {
        /// Rotation angle of the small-angle Rx gate
        #[arg(long, default_value_t = 0.4, allow_negative_numbers = true)]
        theta: f64,

        /// Also write the report as JSON
        #[arg(long = "json", value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Compare two density matrices (and optionally two distributions) from a JSON file
    ///
    /// The file holds `rho` and `sigma` as nested `[re, im]` arrays, plus
    /// optional `p` and `q` probability vectors.
    States {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Report dimension-renormalized purity
        #[arg(long = "renorm", action = ArgAction::SetTrue)]
        renorm: bool,

        #[arg(long = "json", value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Compare two Pauli-Liouville matrices `r_p` (noisy) and `r_u` (ideal) from a JSON file
    Process {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(long = "json", value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Diamond-norm distance between Choi matrices `choi0` and `choi1` from a JSON file
    Diamond {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(long = "json", value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}
