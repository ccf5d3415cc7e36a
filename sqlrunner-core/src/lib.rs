// sqlrunner-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// The contract of a single database connection.
pub mod ports;

// 2. Domain
// Statement classification, values, outcomes, settings, the clients/meetings model.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// MySQL over sqlx, settings files.
pub mod infrastructure;

// 4. Application (Use Cases)
// Execution helper, transcript rendering, the scripted sequence, the runner.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

// --- RE-EXPORTS (FACADE) ---
pub use error::SqlRunnerError;
