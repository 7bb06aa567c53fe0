#![forbid(unsafe_code)]

use career_spark_lib::{config::load_from_path, gateway, telemetry::init_tracing};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Career Spark API gate (API keys + per-key rate limits)")]
struct Cli {
    /// Path to configuration TOML file
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "CAREER_SPARK_CONFIG",
        default_value = "config/career-spark.toml"
    )]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let cfg = match load_from_path(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_tracing(&cfg.logging, &cfg.telemetry) {
        eprintln!("failed to initialize tracing: {err}");
        std::process::exit(1);
    }

    info!(
        listen = %cfg.listen,
        admin_key = cfg.auth.admin_secret().is_some(),
        user_key = cfg.auth.user_secret().is_some(),
        metrics_port = ?cfg.telemetry.metrics_port,
        "configuration loaded"
    );

    if let Err(err) = gateway::run(Arc::new(cfg)).await {
        error!(%err, "career spark gate exited with error");
        std::process::exit(1);
    }
}
