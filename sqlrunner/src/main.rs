// sqlrunner/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing), on stderr so stdout stays a clean transcript.
    // RUST_LOG=sqlrunner_core=debug sqlrunner
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (config_path, explicit) = cli.config_path();

    if let Err(e) = commands::run::execute(&config_path, explicit).await {
        eprintln!("\n💥 Walkthrough failed");
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }

    Ok(())
}
