// sqlrunner-core/src/infrastructure/adapters/mysql.rs

use async_trait::async_trait;
use sqlx::mysql::{
    MySql, MySqlArguments, MySqlConnectOptions, MySqlConnection, MySqlQueryResult, MySqlRow,
    MySqlSslMode,
};
use sqlx::query::Query;
use sqlx::{Column, ConnectOptions, Connection, Executor, Row, TypeInfo, ValueRef};
use tracing::{debug, info, instrument};

use crate::domain::connection::ConnectionSettings;
use crate::domain::outcome::{ResultSet, StatementOutcome};
use crate::domain::statement::returns_rows;
use crate::domain::value::SqlValue;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::session::SqlSession;

/// One MySQL connection, opened without a default schema (the script creates it).
pub struct MySqlSession {
    conn: Option<MySqlConnection>,
    endpoint: String,
}

impl MySqlSession {
    pub fn connect_options(settings: &ConnectionSettings) -> MySqlConnectOptions {
        let ssl_mode = if settings.tls {
            MySqlSslMode::Required
        } else {
            MySqlSslMode::Disabled
        };
        MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .ssl_mode(ssl_mode)
    }

    #[instrument(skip(settings), fields(host = %settings.host, port = settings.port, tls = settings.tls))]
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self, InfrastructureError> {
        let conn = Self::connect_options(settings).connect().await?;
        let endpoint = format!("{}@{}:{}", settings.user, settings.host, settings.port);
        info!(%endpoint, "Connected to MySQL");
        Ok(Self {
            conn: Some(conn),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    fn conn(&mut self) -> Result<&mut MySqlConnection, InfrastructureError> {
        self.conn
            .as_mut()
            .ok_or(InfrastructureError::Database(DatabaseError::Closed))
    }
}

#[async_trait]
impl SqlSession for MySqlSession {
    async fn execute_unprepared(&mut self, sql: &str) -> Result<StatementOutcome, InfrastructureError> {
        let conn = self.conn()?;
        if returns_rows(sql) {
            let rows = Executor::fetch_all(&mut *conn, sqlx::raw_sql(sql)).await?;
            return Ok(StatementOutcome::Rows(decode_rows(&rows)?));
        }

        let done = Executor::execute(&mut *conn, sqlx::raw_sql(sql)).await?;
        debug!(rows_affected = done.rows_affected(), "Text-protocol statement done");
        // DROP/USE/CREATE TABLE answer with a bare OK packet.
        if done.rows_affected() == 0 {
            Ok(StatementOutcome::Completed)
        } else {
            Ok(affected(&done))
        }
    }

    async fn execute_bound(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<StatementOutcome, InfrastructureError> {
        let conn = self.conn()?;
        let query = params
            .iter()
            .fold(sqlx::query(sql), |query, value| bind_value(query, value));

        if returns_rows(sql) {
            let rows = query.fetch_all(&mut *conn).await?;
            Ok(StatementOutcome::Rows(decode_rows(&rows)?))
        } else {
            let done = query.execute(&mut *conn).await?;
            Ok(affected(&done))
        }
    }

    async fn close(&mut self) -> Result<(), InfrastructureError> {
        if let Some(conn) = self.conn.take() {
            conn.close().await?;
            info!(endpoint = %self.endpoint, "Connection closed");
        }
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "mysql"
    }
}

fn affected(done: &MySqlQueryResult) -> StatementOutcome {
    StatementOutcome::Affected {
        rows_affected: done.rows_affected(),
        last_insert_id: done.last_insert_id(),
    }
}

fn bind_value<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    value: &SqlValue,
) -> Query<'q, MySql, MySqlArguments> {
    match value {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Bool(v) => query.bind(*v),
        SqlValue::Int(v) => query.bind(*v),
        SqlValue::UInt(v) => query.bind(*v),
        SqlValue::Float(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.clone()),
        SqlValue::Bytes(v) => query.bind(v.clone()),
        SqlValue::Date(v) => query.bind(*v),
        SqlValue::Time(v) => query.bind(*v),
        SqlValue::DateTime(v) => query.bind(*v),
    }
}

fn decode_rows(rows: &[MySqlRow]) -> Result<ResultSet, InfrastructureError> {
    let columns = rows
        .first()
        .map(|row| {
            row.columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let mut decoded = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = (0..row.len())
            .map(|idx| decode_cell(row, idx))
            .collect::<Result<Vec<_>, _>>()?;
        decoded.push(cells);
    }
    Ok(ResultSet::new(columns, decoded))
}

// Integer widths and DECIMAL are decoded unchecked: the driver reads them from
// the wire format regardless of the declared column width.
fn decode_cell(row: &MySqlRow, idx: usize) -> Result<SqlValue, sqlx::Error> {
    if row.try_get_raw(idx)?.is_null() {
        return Ok(SqlValue::Null);
    }

    let type_name = row.column(idx).type_info().name().to_ascii_uppercase();
    let value = match type_name.as_str() {
        "NULL" => SqlValue::Null,
        "BOOLEAN" => SqlValue::Bool(row.try_get(idx)?),
        name if name.contains("INT") && name.ends_with("UNSIGNED") => {
            SqlValue::UInt(row.try_get_unchecked(idx)?)
        }
        name if name.contains("INT") || name == "YEAR" => SqlValue::Int(row.try_get_unchecked(idx)?),
        "FLOAT" | "DOUBLE" => SqlValue::Float(row.try_get_unchecked(idx)?),
        "DATE" => SqlValue::Date(row.try_get(idx)?),
        "TIME" => SqlValue::Time(row.try_get(idx)?),
        "DATETIME" | "TIMESTAMP" => SqlValue::DateTime(row.try_get(idx)?),
        "BINARY" | "VARBINARY" | "BIT" | "GEOMETRY" => SqlValue::Bytes(row.try_get_unchecked(idx)?),
        name if name.ends_with("BLOB") => SqlValue::Bytes(row.try_get_unchecked(idx)?),
        // CHAR, VARCHAR, *TEXT, ENUM, SET, JSON, DECIMAL
        _ => match row.try_get_unchecked::<String, _>(idx) {
            Ok(text) => SqlValue::Text(text),
            Err(_) => SqlValue::Bytes(row.try_get_unchecked(idx)?),
        },
    };
    Ok(value)
}
