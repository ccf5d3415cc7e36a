// sqlrunner-core/src/application/mod.rs

pub mod executor;
pub mod report;
pub mod runner;
pub mod script;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use sqlrunner_core::application::{run_walkthrough, DemoSummary};`

pub use executor::QueryExecutor;
pub use report::{DemoSummary, render_summary};
pub use runner::run_walkthrough;
pub use script::run_demo;
