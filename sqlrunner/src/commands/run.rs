// sqlrunner/src/commands/run.rs
//
// USE CASE: load settings, connect, run the walkthrough, release the connection.

use std::path::Path;
use tracing::info;

use sqlrunner_core::SqlRunnerError;
use sqlrunner_core::application::{DemoSummary, render_summary, run_walkthrough};
use sqlrunner_core::infrastructure::adapters::mysql::MySqlSession;
use sqlrunner_core::infrastructure::config::load_connection_settings;

pub async fn execute(config_path: &Path, explicit: bool) -> Result<DemoSummary, SqlRunnerError> {
    let start = std::time::Instant::now();

    // A. Settings (file + ENV)
    println!("⚙️  Loading configuration...");
    let settings = load_connection_settings(config_path, explicit, |key| std::env::var(key).ok())?;
    info!(?settings, "Connection settings resolved");

    // B. One connection for the whole run
    println!(
        "🔗 Connecting to {}:{} as {} (TLS {})",
        settings.host,
        settings.port,
        settings.user,
        if settings.tls { "on" } else { "off" }
    );
    let mut session = MySqlSession::connect(&settings).await?;
    println!("   Connected: {}", session.endpoint());

    // C. Walkthrough (closes the session on every path)
    let today = chrono::Local::now().date_naive();
    let summary = run_walkthrough(&mut session, &settings.database, today).await?;

    println!("\n{}", render_summary(&summary));
    println!("   Finished in {:.2?}", start.elapsed());
    Ok(summary)
}
