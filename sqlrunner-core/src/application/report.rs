// sqlrunner-core/src/application/report.rs
//
// Console transcript: pure rendering, printing is left to the caller.

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL_CONDENSED;

use crate::domain::outcome::{ResultSet, StatementOutcome};
use crate::domain::statement::is_select;
use crate::domain::value::SqlValue;

/// Rows shown for a SELECT; the rest are summarized in one line.
pub const PREVIEW_ROW_LIMIT: usize = 5;

/// Totals read back at the end of the scripted sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoSummary {
    pub statements: usize,
    pub clients: i64,
    pub meetings: i64,
    pub scheduled: i64,
    pub completed: i64,
    pub cancelled: i64,
    /// Meetings left for the temporary client after its deletion.
    pub orphaned_meetings: i64,
}

fn plural(n: impl Into<u64>) -> &'static str {
    if n.into() == 1 { "" } else { "s" }
}

pub fn render_statement(label: Option<&str>, sql: &str, params: &[SqlValue]) -> String {
    let mut lines = vec![
        format!("🔹 {}", label.unwrap_or("Executing query")),
        format!("📝 SQL: {}", sql.trim()),
    ];
    if !params.is_empty() {
        let json = serde_json::to_string(params).unwrap_or_else(|_| format!("{:?}", params));
        lines.push(format!("📎 Params: {}", json));
    }
    lines.join("\n")
}

pub fn render_outcome(sql: &str, outcome: &StatementOutcome) -> String {
    match outcome {
        StatementOutcome::Rows(set) => {
            let count = set.len() as u64;
            let mut out = format!("✅ {} row{} returned", count, plural(count));
            if is_select(sql) && !set.is_empty() {
                out.push('\n');
                out.push_str(&render_preview(set));
            }
            out
        }
        StatementOutcome::Affected {
            rows_affected,
            last_insert_id,
        } => {
            let mut out = format!("✅ {} row{} affected", rows_affected, plural(*rows_affected));
            if *last_insert_id > 0 {
                out.push_str(&format!(" (insert id {})", last_insert_id));
            }
            out
        }
        StatementOutcome::Completed => "✅ Statement executed".to_string(),
    }
}

/// First `PREVIEW_ROW_LIMIT` rows as a table, plus a remainder note.
pub fn render_preview(set: &ResultSet) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(&set.columns);
    for row in set.rows.iter().take(PREVIEW_ROW_LIMIT) {
        table.add_row(row.iter().map(|v| v.to_string()));
    }

    let mut out = table.to_string();
    let hidden = set.len().saturating_sub(PREVIEW_ROW_LIMIT) as u64;
    if hidden > 0 {
        out.push_str(&format!("\n   ... and {} more row{}", hidden, plural(hidden)));
    }
    out
}

pub fn render_failure(error: &dyn std::error::Error) -> String {
    format!("❌ Error: {}", error)
}

pub fn render_summary(summary: &DemoSummary) -> String {
    [
        "🎉 All operations completed".to_string(),
        format!("   Statements executed : {}", summary.statements),
        format!("   Clients             : {}", summary.clients),
        format!(
            "   Meetings            : {} ({} scheduled, {} completed, {} cancelled)",
            summary.meetings, summary.scheduled, summary.completed, summary.cancelled
        ),
        format!("   Cascade leftovers   : {}", summary.orphaned_meetings),
    ]
    .join("\n")
}
