// sqlrunner-core/src/application/runner.rs

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use crate::application::executor::QueryExecutor;
use crate::application::report::DemoSummary;
use crate::application::script::run_demo;
use crate::error::SqlRunnerError;
use crate::ports::session::SqlSession;

/// Runs the walkthrough and releases the session afterwards, whatever happened.
/// A failing close is logged; it never masks the walkthrough's own result.
#[instrument(skip(session), fields(engine = session.engine_name()))]
pub async fn run_walkthrough(
    session: &mut dyn SqlSession,
    database: &str,
    today: NaiveDate,
) -> Result<DemoSummary, SqlRunnerError> {
    let result = {
        let mut exec = QueryExecutor::new(&mut *session);
        run_demo(&mut exec, database, today).await
    };

    if let Err(e) = &result {
        warn!(error = %e, "Walkthrough aborted, releasing connection");
    }

    match session.close().await {
        Ok(()) => {
            info!("Connection released");
            println!("\n🔌 Connection closed");
        }
        Err(e) => warn!(error = %e, "Failed to close connection cleanly"),
    }

    result
}
