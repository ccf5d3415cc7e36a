// sqlrunner-core/src/domain/mod.rs

pub mod connection;
pub mod model;
pub mod outcome;
pub mod schema;
pub mod statement;
pub mod value;

pub use connection::ConnectionSettings;
pub use model::{Client, Meeting, MeetingStatus};
pub use outcome::{ResultSet, StatementOutcome};
pub use statement::StatementKind;
pub use value::SqlValue;
