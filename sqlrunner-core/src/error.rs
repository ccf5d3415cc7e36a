// sqlrunner-core/src/error.rs

use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum SqlRunnerError {
    // --- INFRASTRUCTURE (connection, config, IO) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- STATEMENT EXECUTION ---
    #[error("Statement '{label}' failed: {source}")]
    #[diagnostic(
        code(sqlrunner::statement),
        help("The sequence stops at the first failing statement; earlier steps stay applied.")
    )]
    StatementFailed {
        label: String,
        #[source]
        source: InfrastructureError,
    },

    #[error("Statement '{label}' returned an unexpected result (expected {expected})")]
    #[diagnostic(code(sqlrunner::outcome))]
    UnexpectedOutcome {
        label: String,
        expected: &'static str,
    },

    #[error("Internal Error: {0}")]
    InternalError(String),
}
