// sqlrunner-core/src/domain/statement.rs

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Schema statements go through the text protocol; everything else is prepared
/// and bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Definition,
    Manipulation,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Definition => "DDL",
            Self::Manipulation => "DML",
        }
    }

    pub fn binds_parameters(&self) -> bool {
        matches!(self, Self::Manipulation)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn re_definition() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(CREATE|DROP|USE|ALTER|SHOW)\b").unwrap_or_else(|_| {
            // Hardcoded pattern, cannot fail.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

fn leading_keyword(sql: &str) -> String {
    sql.trim_start()
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase()
}

pub fn classify(sql: &str) -> StatementKind {
    if re_definition().is_match(sql) {
        StatementKind::Definition
    } else {
        StatementKind::Manipulation
    }
}

/// Only statements whose text begins with SELECT get a row preview.
pub fn is_select(sql: &str) -> bool {
    leading_keyword(sql) == "SELECT"
}

/// Statements the server answers with a result set rather than an OK packet.
pub fn returns_rows(sql: &str) -> bool {
    matches!(
        leading_keyword(sql).as_str(),
        "SELECT" | "SHOW" | "WITH" | "DESCRIBE" | "EXPLAIN"
    )
}
