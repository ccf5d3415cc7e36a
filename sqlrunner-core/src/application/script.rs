// sqlrunner-core/src/application/script.rs
//
// USE CASE: the fixed clients/meetings walkthrough. Strictly sequential, the
// first failing statement aborts the rest.

use chrono::{Days, NaiveDate, NaiveTime};
use tracing::{info, instrument};

use crate::application::executor::QueryExecutor;
use crate::application::report::DemoSummary;
use crate::domain::model::{Client, Meeting, MeetingStatus};
use crate::domain::outcome::StatementOutcome;
use crate::domain::schema::{
    CLIENTS_TABLE, CREATE_CLIENTS_TABLE, CREATE_MEETINGS_TABLE, MEETINGS_TABLE,
    create_database_if_not_exists, drop_table_if_exists, multi_row_insert, use_database,
};
use crate::domain::value::SqlValue;
use crate::error::SqlRunnerError;
use crate::params;

/// Dates the seed meetings are spread over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoCalendar {
    pub yesterday: NaiveDate,
    pub today: NaiveDate,
    pub next_week: NaiveDate,
}

impl DemoCalendar {
    pub fn around(today: NaiveDate) -> Result<Self, SqlRunnerError> {
        let out_of_range = || SqlRunnerError::InternalError(format!("Date out of range around {}", today));
        Ok(Self {
            yesterday: today.checked_sub_days(Days::new(1)).ok_or_else(out_of_range)?,
            today,
            next_week: today.checked_add_days(Days::new(7)).ok_or_else(out_of_range)?,
        })
    }
}

fn at(hour: u32, minute: u32) -> Result<NaiveTime, SqlRunnerError> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| SqlRunnerError::InternalError(format!("Invalid time {}:{}", hour, minute)))
}

pub fn sample_clients() -> Vec<Client> {
    vec![
        Client::new("Alice Johnson", "alice.johnson@acme.example")
            .with_company("Acme Corp")
            .with_phone("+1-555-0101")
            .with_address("12 Market St, Springfield"),
        Client::new("Bob Smith", "bob.smith@globex.example")
            .with_company("Globex Inc")
            .with_phone("+1-555-0102")
            .with_address("400 Industrial Ave, Shelbyville"),
        Client::new("Carol Martinez", "carol.martinez@initech.example")
            .with_company("Initech")
            .with_phone("+1-555-0103")
            .with_address("9 Loop Rd, Capital City"),
        Client::new("David Chen", "david.chen@umbrella.example")
            .with_company("Umbrella Ltd")
            .with_phone("+1-555-0104"),
    ]
}

/// `client_ids` are the ids of `sample_clients()`, in insertion order.
pub fn sample_meetings(
    client_ids: &[i64; 4],
    calendar: &DemoCalendar,
) -> Result<Vec<Meeting>, SqlRunnerError> {
    let [alice, bob, carol, david] = *client_ids;
    Ok(vec![
        Meeting::scheduled(alice, calendar.yesterday, at(10, 0)?, "Quarterly business review")
            .with_agenda("Q3 results; renewal terms")
            .with_details("On-site at Acme HQ"),
        Meeting::scheduled(bob, calendar.today, at(14, 30)?, "Product demo")
            .with_agenda("New reporting module walkthrough")
            .with_details("Video call"),
        Meeting::scheduled(carol, calendar.next_week, at(9, 0)?, "Contract renewal")
            .with_agenda("Pricing review; SLA changes")
            .with_details("Legal to attend"),
        Meeting::scheduled(alice, calendar.next_week, at(15, 0)?, "Implementation planning")
            .with_agenda("Timeline and milestones")
            .with_details("Bring project plan"),
        Meeting::scheduled(david, calendar.today, at(11, 0)?, "Support escalation review")
            .with_agenda("Open tickets; root causes")
            .with_details("Phone call"),
    ])
}

fn insert_id(outcome: &StatementOutcome, label: &str) -> Result<i64, SqlRunnerError> {
    outcome
        .last_insert_id()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| SqlRunnerError::UnexpectedOutcome {
            label: label.to_string(),
            expected: "a generated id",
        })
}

fn count(outcome: &StatementOutcome, column: &str, label: &str) -> Result<i64, SqlRunnerError> {
    outcome
        .rows()
        .and_then(|set| set.first_value(column))
        .and_then(SqlValue::as_i64)
        .ok_or_else(|| SqlRunnerError::UnexpectedOutcome {
            label: label.to_string(),
            expected: "a numeric count",
        })
}

/// Runs every step against an executor whose session is already connected.
#[instrument(skip(exec))]
pub async fn run_demo(
    exec: &mut QueryExecutor<'_>,
    database: &str,
    today: NaiveDate,
) -> Result<DemoSummary, SqlRunnerError> {
    let calendar = DemoCalendar::around(today)?;

    // --- SCHEMA ---
    exec.execute_sql(&create_database_if_not_exists(database), &[], Some("1. Create database"))
        .await?;
    exec.execute_sql(&use_database(database), &[], Some("2. Select database"))
        .await?;
    // meetings first: it references clients
    exec.execute_sql(&drop_table_if_exists(MEETINGS_TABLE), &[], Some("3. Drop meetings table"))
        .await?;
    exec.execute_sql(&drop_table_if_exists(CLIENTS_TABLE), &[], Some("4. Drop clients table"))
        .await?;
    exec.execute_sql(CREATE_CLIENTS_TABLE, &[], Some("5. Create clients table"))
        .await?;
    exec.execute_sql(CREATE_MEETINGS_TABLE, &[], Some("6. Create meetings table"))
        .await?;

    // --- SEED DATA ---
    let clients = sample_clients();
    let label = "7. Insert sample clients";
    let outcome = exec
        .execute_sql(
            &multi_row_insert(CLIENTS_TABLE, &Client::COLUMNS, clients.len()),
            &clients.iter().flat_map(Client::to_params).collect::<Vec<_>>(),
            Some(label),
        )
        .await?;
    // a multi-row insert reports the id of its first row
    let first_client = insert_id(&outcome, label)?;
    let client_ids = [first_client, first_client + 1, first_client + 2, first_client + 3];

    let meetings = sample_meetings(&client_ids, &calendar)?;
    let label = "8. Insert sample meetings";
    let outcome = exec
        .execute_sql(
            &multi_row_insert(MEETINGS_TABLE, &Meeting::COLUMNS, meetings.len()),
            &meetings.iter().flat_map(Meeting::to_params).collect::<Vec<_>>(),
            Some(label),
        )
        .await?;
    let first_meeting = insert_id(&outcome, label)?;

    // --- READS ---
    exec.execute_sql(
        "SELECT client_id, name, email, company, phone FROM clients ORDER BY client_id",
        &[],
        Some("9. Read all clients"),
    )
    .await?;

    exec.execute_sql(
        r#"SELECT m.meeting_id, c.name AS client, c.company, m.meeting_date, m.meeting_time, m.subject, m.status
FROM meetings m
INNER JOIN clients c ON c.client_id = m.client_id
ORDER BY m.meeting_date, m.meeting_time"#,
        &[],
        Some("10. Meetings with client details (INNER JOIN)"),
    )
    .await?;

    exec.execute_sql(
        r#"SELECT c.client_id, c.name, c.company,
       COUNT(m.meeting_id) AS total_meetings,
       SUM(CASE WHEN m.status = ? THEN 1 ELSE 0 END) AS upcoming_meetings,
       MAX(m.meeting_date) AS latest_meeting
FROM clients c
LEFT JOIN meetings m ON m.client_id = c.client_id
GROUP BY c.client_id, c.name, c.company
ORDER BY c.client_id"#,
        &params![MeetingStatus::Scheduled],
        Some("11. Meeting counts per client (LEFT JOIN + GROUP BY)"),
    )
    .await?;

    // The proposed slot collides with the seeded product demo.
    let slot_date = calendar.today;
    let slot_time = at(14, 30)?;
    exec.execute_sql(
        r#"SELECT 'available' AS availability, NULL AS meeting_id, NULL AS subject
FROM DUAL
WHERE NOT EXISTS (
    SELECT 1 FROM meetings
    WHERE meeting_date = ? AND meeting_time = ? AND status <> ?
)
UNION ALL
SELECT 'booked', m.meeting_id, m.subject
FROM meetings m
WHERE m.meeting_date = ? AND m.meeting_time = ? AND m.status <> ?"#,
        &params![
            slot_date,
            slot_time,
            MeetingStatus::Cancelled,
            slot_date,
            slot_time,
            MeetingStatus::Cancelled
        ],
        Some("12. Check slot availability (NOT EXISTS / UNION ALL)"),
    )
    .await?;

    // --- WRITES ---
    let follow_up = Meeting::scheduled(client_ids[1], calendar.next_week, at(10, 30)?, "Follow-up call")
        .with_agenda("Demo feedback; pilot scope")
        .with_details("Video call");
    let label = "13. Insert a single meeting";
    let outcome = exec
        .execute_sql(
            &multi_row_insert(MEETINGS_TABLE, &Meeting::COLUMNS, 1),
            &follow_up.to_params(),
            Some(label),
        )
        .await?;
    let follow_up_id = insert_id(&outcome, label)?;

    exec.execute_sql(
        "UPDATE meetings SET status = ?, minutes = ? WHERE meeting_id = ?",
        &params![
            MeetingStatus::Completed,
            "Q3 targets met. Renewal agreed in principle; revised quote due Friday.",
            first_meeting
        ],
        Some("14. Complete a meeting with minutes"),
    )
    .await?;

    exec.execute_sql(
        r#"SELECT m.meeting_id, c.name AS client, m.subject, m.agenda
FROM meetings m
INNER JOIN clients c ON c.client_id = m.client_id
WHERE m.subject LIKE ? OR m.agenda LIKE ?
ORDER BY m.meeting_id"#,
        &params!["%review%", "%review%"],
        Some("15. Search meetings by keyword (LIKE)"),
    )
    .await?;

    exec.execute_sql(
        "UPDATE meetings SET status = ? WHERE meeting_id = ?",
        &params![MeetingStatus::Cancelled, follow_up_id],
        Some("16. Soft delete: cancel a meeting"),
    )
    .await?;

    exec.execute_sql(
        "DELETE FROM meetings WHERE meeting_id = ? AND status = ?",
        &params![follow_up_id, MeetingStatus::Cancelled],
        Some("17. Hard delete the cancelled meeting"),
    )
    .await?;

    exec.execute_sql(
        "SELECT meeting_id, subject, status FROM meetings WHERE meeting_id = ?",
        &params![follow_up_id],
        Some("18. Verify the meeting is gone"),
    )
    .await?;

    // --- CASCADE ---
    let temp = Client::new("Temporary Client", "temp.client@example.invalid")
        .with_company("Ephemeral LLC");
    let label = "19a. Insert temporary client";
    let outcome = exec
        .execute_sql(
            &multi_row_insert(CLIENTS_TABLE, &Client::COLUMNS, 1),
            &temp.to_params(),
            Some(label),
        )
        .await?;
    let temp_id = insert_id(&outcome, label)?;

    exec.execute_sql(
        "SELECT client_id, name, email, company FROM clients WHERE client_id = ?",
        &params![temp_id],
        Some("19b. Read temporary client"),
    )
    .await?;

    let temp_meeting = Meeting::scheduled(temp_id, calendar.today, at(16, 0)?, "Intro call")
        .with_agenda("Introductions")
        .with_details("Will be removed by cascade");
    exec.execute_sql(
        &multi_row_insert(MEETINGS_TABLE, &Meeting::COLUMNS, 1),
        &temp_meeting.to_params(),
        Some("19c. Insert meeting for temporary client"),
    )
    .await?;

    exec.execute_sql(
        "SELECT meeting_id, client_id, subject, status FROM meetings WHERE client_id = ?",
        &params![temp_id],
        Some("19d. Read temporary client's meetings"),
    )
    .await?;

    exec.execute_sql(
        "DELETE FROM clients WHERE client_id = ?",
        &params![temp_id],
        Some("19e. Delete temporary client (cascades to meetings)"),
    )
    .await?;

    let label = "19f. Count meetings left for temporary client";
    let outcome = exec
        .execute_sql(
            "SELECT COUNT(*) AS remaining_meetings FROM meetings WHERE client_id = ?",
            &params![temp_id],
            Some(label),
        )
        .await?;
    let orphaned_meetings = count(&outcome, "remaining_meetings", label)?;

    // --- SUMMARY ---
    let label = "20. Final summary";
    let outcome = exec
        .execute_sql(
            r#"SELECT
    (SELECT COUNT(*) FROM clients) AS total_clients,
    (SELECT COUNT(*) FROM meetings) AS total_meetings,
    (SELECT COUNT(*) FROM meetings WHERE status = ?) AS scheduled_meetings,
    (SELECT COUNT(*) FROM meetings WHERE status = ?) AS completed_meetings,
    (SELECT COUNT(*) FROM meetings WHERE status = ?) AS cancelled_meetings"#,
            &params![
                MeetingStatus::Scheduled,
                MeetingStatus::Completed,
                MeetingStatus::Cancelled
            ],
            Some(label),
        )
        .await?;

    let summary = DemoSummary {
        statements: exec.executed(),
        clients: count(&outcome, "total_clients", label)?,
        meetings: count(&outcome, "total_meetings", label)?,
        scheduled: count(&outcome, "scheduled_meetings", label)?,
        completed: count(&outcome, "completed_meetings", label)?,
        cancelled: count(&outcome, "cancelled_meetings", label)?,
        orphaned_meetings,
    };
    info!(?summary, "Walkthrough finished");
    Ok(summary)
}
