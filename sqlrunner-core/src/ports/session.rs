// sqlrunner-core/src/ports/session.rs

// What the execution helper needs from a database connection, without knowing
// which driver sits behind it. One session = one physical connection.

use async_trait::async_trait;

use crate::domain::outcome::StatementOutcome;
use crate::domain::value::SqlValue;
use crate::infrastructure::error::InfrastructureError;

#[async_trait]
pub trait SqlSession: Send {
    /// Runs a statement through the plain-text protocol. No parameters are bound.
    async fn execute_unprepared(&mut self, sql: &str) -> Result<StatementOutcome, InfrastructureError>;

    /// Prepares the statement and binds `params` positionally, in order.
    async fn execute_bound(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<StatementOutcome, InfrastructureError>;

    /// Releases the connection. Calling it again is a no-op.
    async fn close(&mut self) -> Result<(), InfrastructureError>;

    fn engine_name(&self) -> &str;
}
