// sqlrunner/src/cli.rs
//
// Clap definitions. The walkthrough itself takes no options; only the
// connection settings file can be chosen.

use clap::Parser;
use std::path::PathBuf;

use sqlrunner_core::infrastructure::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "sqlrunner")]
#[command(
    about = "Runs the scripted clients/meetings SQL walkthrough against a MySQL server",
    long_about = "Runs the scripted clients/meetings SQL walkthrough against a MySQL server.\n\n\
                  Connection settings are read from a YAML file and can be overridden with \
                  DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME and DB_TLS."
)]
#[command(version)]
pub struct Cli {
    /// Connection settings file (YAML)
    #[arg(long, env = "SQLRUNNER_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// The settings path, and whether the user named it explicitly.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        }
    }
}
