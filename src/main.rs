//! qmetrics: worked examples and file-driven comparisons on top of the library.
use clap::Parser; // trait import enables QMetricsCli::parse()
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qmetrics::cli::{Command, QMetricsCli};
use qmetrics::commands::{compare, tutorial};
use qmetrics::config::{resolve_config_path, Config};

fn init_tracing(debug_metrics: bool) {
    let filter = if debug_metrics {
        EnvFilter::new("qmetrics=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = QMetricsCli::parse();
    init_tracing(args.debug_metrics);

    let cfg = Config::load_or_default(&args.config)?;
    tracing::debug!(config = ?resolve_config_path(&args.config), "configuration loaded");

    match args.cmd {
        Command::Tutorial { theta, json } => tutorial::run(theta, &json, &cfg),
        Command::States { input, renorm, json } => compare::states(&input, renorm, &json, &cfg),
        Command::Process { input, json } => compare::process(&input, &json),
        Command::Diamond { input, json } => compare::diamond(&input, &json, &cfg),
        Command::Config => {
            print!("{}", cfg.to_toml()?);
            Ok(())
        }
    }
}
