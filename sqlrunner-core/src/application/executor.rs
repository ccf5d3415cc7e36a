// sqlrunner-core/src/application/executor.rs

use std::io::{self, Write};
use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::application::report::{render_failure, render_outcome, render_statement};
use crate::domain::outcome::StatementOutcome;
use crate::domain::statement::classify;
use crate::domain::value::SqlValue;
use crate::error::SqlRunnerError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::session::SqlSession;

/// Runs statements one at a time over a borrowed session, writing a transcript
/// of each one (stdout unless redirected with [`QueryExecutor::with_output`]).
pub struct QueryExecutor<'s> {
    session: &'s mut dyn SqlSession,
    out: Box<dyn Write + Send>,
    executed: usize,
}

impl<'s> QueryExecutor<'s> {
    pub fn new(session: &'s mut dyn SqlSession) -> Self {
        Self {
            session,
            out: Box::new(io::stdout()),
            executed: 0,
        }
    }

    pub fn with_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Successful statements so far.
    pub fn executed(&self) -> usize {
        self.executed
    }

    fn emit(&mut self, text: &str) -> Result<(), SqlRunnerError> {
        writeln!(self.out, "{}", text).map_err(InfrastructureError::Io)?;
        Ok(())
    }

    /// Prints the statement, runs it (schema statements unbound, everything else
    /// bound positionally) and prints the outcome. Failures are printed to
    /// stderr and returned.
    #[instrument(
        skip_all,
        fields(label = label.unwrap_or("query"), params.len = params.len())
    )]
    pub async fn execute_sql(
        &mut self,
        sql: &str,
        params: &[SqlValue],
        label: Option<&str>,
    ) -> Result<StatementOutcome, SqlRunnerError> {
        self.emit(&format!("\n{}", render_statement(label, sql, params)))?;

        let kind = classify(sql);
        let start = Instant::now();
        debug!(%kind, engine = self.session.engine_name(), "⚡ Executing statement");

        let result = if kind.binds_parameters() {
            self.session.execute_bound(sql, params).await
        } else {
            if !params.is_empty() {
                debug!(ignored = params.len(), "Schema statement, parameters not bound");
            }
            self.session.execute_unprepared(sql).await
        };

        let duration = start.elapsed();
        match result {
            Ok(outcome) => {
                debug!("✅ Statement finished in {:.2?}", duration);
                self.executed += 1;
                self.emit(&render_outcome(sql, &outcome))?;
                Ok(outcome)
            }
            Err(e) => {
                error!("❌ Statement failed after {:.2?}: {}", duration, e);
                eprintln!("{}", render_failure(&e));
                Err(SqlRunnerError::StatementFailed {
                    label: label.unwrap_or("query").to_string(),
                    source: e,
                })
            }
        }
    }
}
