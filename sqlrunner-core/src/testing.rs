// sqlrunner-core/src/testing.rs
//
// In-memory SqlSession that records what it was asked to run, plus a small
// clients/meetings store that answers the walkthrough's statements.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::domain::model::{Client, Meeting};
use crate::domain::outcome::{ResultSet, StatementOutcome};
use crate::domain::statement::returns_rows;
use crate::domain::value::SqlValue;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::session::SqlSession;

type Responder =
    Box<dyn FnMut(&str, &[SqlValue]) -> Result<StatementOutcome, InfrastructureError> + Send>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub sql: String,
    /// `None` when the statement went through the unprepared path.
    pub params: Option<Vec<SqlValue>>,
}

pub(crate) struct RecordingSession {
    pub calls: Vec<RecordedCall>,
    pub close_calls: usize,
    responder: Responder,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            close_calls: 0,
            responder: Box::new(|sql, _| Ok(default_outcome(sql))),
        }
    }

    pub fn respond<F>(mut self, responder: F) -> Self
    where
        F: FnMut(&str, &[SqlValue]) -> Result<StatementOutcome, InfrastructureError> + Send + 'static,
    {
        self.responder = Box::new(responder);
        self
    }

    pub fn executed_sql(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.sql.as_str()).collect()
    }
}

fn default_outcome(sql: &str) -> StatementOutcome {
    if returns_rows(sql) {
        StatementOutcome::Rows(Default::default())
    } else {
        StatementOutcome::Completed
    }
}

pub(crate) fn fake_failure(message: &str) -> InfrastructureError {
    InfrastructureError::Database(DatabaseError::MySql(sqlx::Error::Protocol(message.to_string())))
}

#[async_trait]
impl SqlSession for RecordingSession {
    async fn execute_unprepared(&mut self, sql: &str) -> Result<StatementOutcome, InfrastructureError> {
        self.calls.push(RecordedCall {
            sql: sql.to_string(),
            params: None,
        });
        (self.responder)(sql, &[])
    }

    async fn execute_bound(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<StatementOutcome, InfrastructureError> {
        self.calls.push(RecordedCall {
            sql: sql.to_string(),
            params: Some(params.to_vec()),
        });
        (self.responder)(sql, params)
    }

    async fn close(&mut self) -> Result<(), InfrastructureError> {
        self.close_calls += 1;
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "recording"
    }
}

/// Cloneable in-memory writer for capturing the executor's transcript.
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|p| p.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct ClientRow {
    id: i64,
    name: SqlValue,
    email: SqlValue,
    company: SqlValue,
    phone: SqlValue,
}

struct MeetingRow {
    id: i64,
    client_id: i64,
    date: SqlValue,
    time: SqlValue,
    subject: SqlValue,
    agenda: SqlValue,
    status: SqlValue,
}

impl MeetingRow {
    fn slot(&self) -> (Option<NaiveDate>, Option<NaiveTime>) {
        let date = match self.date {
            SqlValue::Date(d) => Some(d),
            _ => None,
        };
        let time = match self.time {
            SqlValue::Time(t) => Some(t),
            _ => None,
        };
        (date, time)
    }
}

/// Just enough of the two tables to answer the walkthrough's statements:
/// auto-increment ids, the FK check on meeting inserts, status updates, the
/// status-restricted hard delete, and `ON DELETE CASCADE` from clients.
#[derive(Default)]
pub(crate) struct FakeDatabase {
    clients: Vec<ClientRow>,
    meetings: Vec<MeetingRow>,
    client_seq: i64,
    meeting_seq: i64,
}

fn param(params: &[SqlValue], idx: usize) -> SqlValue {
    params.get(idx).cloned().unwrap_or(SqlValue::Null)
}

fn id_param(params: &[SqlValue], idx: usize) -> Result<i64, InfrastructureError> {
    params
        .get(idx)
        .and_then(SqlValue::as_i64)
        .ok_or_else(|| fake_failure("Incorrect arguments to mysqld_stmt_execute"))
}

fn affected(rows: usize) -> StatementOutcome {
    StatementOutcome::Affected {
        rows_affected: rows as u64,
        last_insert_id: 0,
    }
}

fn result_set(columns: &[&str], rows: Vec<Vec<SqlValue>>) -> StatementOutcome {
    StatementOutcome::Rows(ResultSet::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows,
    ))
}

fn count_row(columns: &[&str], values: &[usize]) -> StatementOutcome {
    result_set(columns, vec![values.iter().map(|v| SqlValue::Int(*v as i64)).collect()])
}

impl FakeDatabase {
    pub fn execute(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<StatementOutcome, InfrastructureError> {
        let sql = sql.trim_start();
        if sql.starts_with("DROP TABLE IF EXISTS meetings") {
            self.meetings.clear();
            self.meeting_seq = 0;
            Ok(StatementOutcome::Completed)
        } else if sql.starts_with("DROP TABLE IF EXISTS clients") {
            if !self.meetings.is_empty() {
                return Err(fake_failure("Cannot drop table 'clients' referenced by a foreign key constraint"));
            }
            self.clients.clear();
            self.client_seq = 0;
            Ok(StatementOutcome::Completed)
        } else if sql.starts_with("INSERT INTO clients") {
            self.insert_clients(params)
        } else if sql.starts_with("INSERT INTO meetings") {
            self.insert_meetings(params)
        } else if sql.starts_with("UPDATE meetings SET status = ?") {
            // minutes, when set, are not kept; the id is always the last param
            let id = id_param(params, params.len().saturating_sub(1))?;
            let mut changed = 0;
            for m in self.meetings.iter_mut().filter(|m| m.id == id) {
                m.status = param(params, 0);
                changed += 1;
            }
            Ok(affected(changed))
        } else if sql.starts_with("DELETE FROM meetings WHERE meeting_id = ? AND status = ?") {
            let id = id_param(params, 0)?;
            let status = param(params, 1);
            let before = self.meetings.len();
            self.meetings.retain(|m| !(m.id == id && m.status == status));
            Ok(affected(before - self.meetings.len()))
        } else if sql.starts_with("DELETE FROM clients WHERE client_id = ?") {
            let id = id_param(params, 0)?;
            let before = self.clients.len();
            self.clients.retain(|c| c.id != id);
            // cascade
            self.meetings.retain(|m| m.client_id != id);
            Ok(affected(before - self.clients.len()))
        } else if returns_rows(sql) {
            self.select(sql, params)
        } else {
            Ok(StatementOutcome::Completed)
        }
    }

    fn insert_clients(&mut self, params: &[SqlValue]) -> Result<StatementOutcome, InfrastructureError> {
        let width = Client::COLUMNS.len();
        if params.is_empty() || params.len() % width != 0 {
            return Err(fake_failure("Column count doesn't match value count"));
        }
        let first = self.client_seq + 1;
        let mut rows = Vec::new();
        for chunk in params.chunks(width) {
            let email = chunk[1].clone();
            let taken = self.clients.iter().chain(rows.iter()).any(|c: &ClientRow| c.email == email);
            if taken {
                return Err(fake_failure(&format!("Duplicate entry '{}' for key 'clients.email'", email)));
            }
            rows.push(ClientRow {
                id: self.client_seq + rows.len() as i64 + 1,
                name: chunk[0].clone(),
                email,
                company: chunk[2].clone(),
                phone: chunk[3].clone(),
            });
        }
        let inserted = rows.len();
        self.client_seq += inserted as i64;
        self.clients.extend(rows);
        Ok(StatementOutcome::Affected {
            rows_affected: inserted as u64,
            last_insert_id: first as u64,
        })
    }

    fn insert_meetings(&mut self, params: &[SqlValue]) -> Result<StatementOutcome, InfrastructureError> {
        let width = Meeting::COLUMNS.len();
        if params.is_empty() || params.len() % width != 0 {
            return Err(fake_failure("Column count doesn't match value count"));
        }
        let mut rows = Vec::new();
        for chunk in params.chunks(width) {
            let client_id = id_param(chunk, 0)?;
            if !self.clients.iter().any(|c| c.id == client_id) {
                return Err(fake_failure(
                    "Cannot add or update a child row: a foreign key constraint fails",
                ));
            }
            rows.push(MeetingRow {
                id: self.meeting_seq + rows.len() as i64 + 1,
                client_id,
                date: chunk[1].clone(),
                time: chunk[2].clone(),
                subject: chunk[3].clone(),
                agenda: chunk[4].clone(),
                status: chunk[7].clone(),
            });
        }
        let first = self.meeting_seq + 1;
        self.meeting_seq += rows.len() as i64;
        let inserted = rows.len();
        self.meetings.extend(rows);
        Ok(StatementOutcome::Affected {
            rows_affected: inserted as u64,
            last_insert_id: first as u64,
        })
    }

    fn client_name(&self, id: i64) -> SqlValue {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or(SqlValue::Null)
    }

    fn select(&self, sql: &str, params: &[SqlValue]) -> Result<StatementOutcome, InfrastructureError> {
        if sql.contains("AS remaining_meetings") {
            let id = id_param(params, 0)?;
            let left = self.meetings.iter().filter(|m| m.client_id == id).count();
            return Ok(count_row(&["remaining_meetings"], &[left]));
        }
        if sql.contains("AS total_clients") {
            let with_status = |idx: usize| {
                let status = param(params, idx);
                self.meetings.iter().filter(|m| m.status == status).count()
            };
            return Ok(count_row(
                &[
                    "total_clients",
                    "total_meetings",
                    "scheduled_meetings",
                    "completed_meetings",
                    "cancelled_meetings",
                ],
                &[
                    self.clients.len(),
                    self.meetings.len(),
                    with_status(0),
                    with_status(1),
                    with_status(2),
                ],
            ));
        }
        if sql.starts_with("SELECT client_id, name, email, company, phone FROM clients") {
            let rows = self
                .clients
                .iter()
                .map(|c| {
                    vec![
                        SqlValue::Int(c.id),
                        c.name.clone(),
                        c.email.clone(),
                        c.company.clone(),
                        c.phone.clone(),
                    ]
                })
                .collect();
            return Ok(result_set(&["client_id", "name", "email", "company", "phone"], rows));
        }
        if sql.starts_with("SELECT client_id, name, email, company FROM clients WHERE client_id = ?") {
            let id = id_param(params, 0)?;
            let rows = self
                .clients
                .iter()
                .filter(|c| c.id == id)
                .map(|c| vec![SqlValue::Int(c.id), c.name.clone(), c.email.clone(), c.company.clone()])
                .collect();
            return Ok(result_set(&["client_id", "name", "email", "company"], rows));
        }
        if sql.contains("LEFT JOIN meetings m") {
            let upcoming = param(params, 0);
            let rows = self
                .clients
                .iter()
                .map(|c| {
                    let own: Vec<&MeetingRow> = self.meetings.iter().filter(|m| m.client_id == c.id).collect();
                    let latest = own
                        .iter()
                        .filter_map(|m| m.slot().0)
                        .max()
                        .map(SqlValue::Date)
                        .unwrap_or(SqlValue::Null);
                    vec![
                        SqlValue::Int(c.id),
                        c.name.clone(),
                        c.company.clone(),
                        SqlValue::Int(own.len() as i64),
                        SqlValue::Int(own.iter().filter(|m| m.status == upcoming).count() as i64),
                        latest,
                    ]
                })
                .collect();
            return Ok(result_set(
                &["client_id", "name", "company", "total_meetings", "upcoming_meetings", "latest_meeting"],
                rows,
            ));
        }
        if sql.contains("WHERE NOT EXISTS") {
            let (date, time, excluded) = (param(params, 0), param(params, 1), param(params, 2));
            let rows: Vec<Vec<SqlValue>> = self
                .meetings
                .iter()
                .filter(|m| m.date == date && m.time == time && m.status != excluded)
                .map(|m| vec!["booked".into(), SqlValue::Int(m.id), m.subject.clone()])
                .collect();
            let rows = if rows.is_empty() {
                vec![vec!["available".into(), SqlValue::Null, SqlValue::Null]]
            } else {
                rows
            };
            return Ok(result_set(&["availability", "meeting_id", "subject"], rows));
        }
        if sql.contains("LIKE ?") {
            let needle = match param(params, 0) {
                SqlValue::Text(p) => p.trim_matches('%').to_lowercase(),
                _ => String::new(),
            };
            let hit = |v: &SqlValue| v.to_string().to_lowercase().contains(&needle);
            let rows = self
                .meetings
                .iter()
                .filter(|m| hit(&m.subject) || hit(&m.agenda))
                .map(|m| vec![SqlValue::Int(m.id), self.client_name(m.client_id), m.subject.clone(), m.agenda.clone()])
                .collect();
            return Ok(result_set(&["meeting_id", "client", "subject", "agenda"], rows));
        }
        if sql.contains("INNER JOIN clients c") {
            let mut joined: Vec<&MeetingRow> = self.meetings.iter().collect();
            joined.sort_by_key(|m| m.slot());
            let rows = joined
                .into_iter()
                .map(|m| {
                    let company = self
                        .clients
                        .iter()
                        .find(|c| c.id == m.client_id)
                        .map(|c| c.company.clone())
                        .unwrap_or(SqlValue::Null);
                    vec![
                        SqlValue::Int(m.id),
                        self.client_name(m.client_id),
                        company,
                        m.date.clone(),
                        m.time.clone(),
                        m.subject.clone(),
                        m.status.clone(),
                    ]
                })
                .collect();
            return Ok(result_set(
                &["meeting_id", "client", "company", "meeting_date", "meeting_time", "subject", "status"],
                rows,
            ));
        }
        if sql.starts_with("SELECT meeting_id, subject, status FROM meetings WHERE meeting_id = ?") {
            let id = id_param(params, 0)?;
            let rows = self
                .meetings
                .iter()
                .filter(|m| m.id == id)
                .map(|m| vec![SqlValue::Int(m.id), m.subject.clone(), m.status.clone()])
                .collect();
            return Ok(result_set(&["meeting_id", "subject", "status"], rows));
        }
        if sql.starts_with("SELECT meeting_id, client_id, subject, status FROM meetings WHERE client_id = ?") {
            let id = id_param(params, 0)?;
            let rows = self
                .meetings
                .iter()
                .filter(|m| m.client_id == id)
                .map(|m| vec![SqlValue::Int(m.id), SqlValue::Int(m.client_id), m.subject.clone(), m.status.clone()])
                .collect();
            return Ok(result_set(&["meeting_id", "client_id", "subject", "status"], rows));
        }
        Ok(StatementOutcome::Rows(ResultSet::default()))
    }
}

/// A recording session backed by a fresh [`FakeDatabase`].
pub(crate) fn scripted_session() -> RecordingSession {
    let mut db = FakeDatabase::default();
    RecordingSession::new().respond(move |sql, params| db.execute(sql, params))
}
