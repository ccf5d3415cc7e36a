// sqlrunner-core/src/domain/outcome.rs

use crate::domain::value::SqlValue;

/// Rows returned by a statement, column names kept in server order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Value of `column` in the first row.
    pub fn first_value(&self, column: &str) -> Option<&SqlValue> {
        let idx = self.column_index(column)?;
        self.rows.first().and_then(|row| row.get(idx))
    }
}

/// The three result shapes a statement can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementOutcome {
    Rows(ResultSet),
    Affected {
        rows_affected: u64,
        last_insert_id: u64,
    },
    /// The server acknowledged the statement without a useful count.
    Completed,
}

impl StatementOutcome {
    pub fn rows(&self) -> Option<&ResultSet> {
        match self {
            Self::Rows(set) => Some(set),
            _ => None,
        }
    }

    pub fn rows_affected(&self) -> Option<u64> {
        match self {
            Self::Affected { rows_affected, .. } => Some(*rows_affected),
            _ => None,
        }
    }

    pub fn last_insert_id(&self) -> Option<u64> {
        match self {
            Self::Affected { last_insert_id, .. } if *last_insert_id > 0 => Some(*last_insert_id),
            _ => None,
        }
    }
}
