// sqlrunner-core/src/ports/mod.rs

pub mod session;

pub use session::SqlSession;
