// sqlrunner-core/src/domain/model.rs

use chrono::{NaiveDate, NaiveTime};
use std::fmt;

use crate::domain::value::SqlValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeetingStatus {
    #[default]
    Scheduled,
    Completed,
    /// Soft-deleted.
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MeetingStatus> for SqlValue {
    fn from(status: MeetingStatus) -> Self {
        SqlValue::Text(status.as_str().to_string())
    }
}

/// A client row as inserted (ids and timestamps are assigned by the server).
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Client {
    pub const COLUMNS: [&'static str; 5] = ["name", "email", "company", "phone", "address"];

    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            company: None,
            phone: None,
            address: None,
        }
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.company = Some(company.to_string());
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// Values in `COLUMNS` order.
    pub fn to_params(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.email.clone().into(),
            self.company.clone().into(),
            self.phone.clone().into(),
            self.address.clone().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
    pub client_id: i64,
    pub meeting_date: NaiveDate,
    pub meeting_time: NaiveTime,
    pub subject: String,
    pub agenda: String,
    pub details: String,
    pub minutes: Option<String>,
    pub status: MeetingStatus,
}

impl Meeting {
    pub const COLUMNS: [&'static str; 8] = [
        "client_id",
        "meeting_date",
        "meeting_time",
        "subject",
        "agenda",
        "details",
        "minutes",
        "status",
    ];

    pub fn scheduled(
        client_id: i64,
        meeting_date: NaiveDate,
        meeting_time: NaiveTime,
        subject: &str,
    ) -> Self {
        Self {
            client_id,
            meeting_date,
            meeting_time,
            subject: subject.to_string(),
            agenda: String::new(),
            details: String::new(),
            minutes: None,
            status: MeetingStatus::Scheduled,
        }
    }

    pub fn with_agenda(mut self, agenda: &str) -> Self {
        self.agenda = agenda.to_string();
        self
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = details.to_string();
        self
    }

    /// Values in `COLUMNS` order.
    pub fn to_params(&self) -> Vec<SqlValue> {
        vec![
            self.client_id.into(),
            self.meeting_date.into(),
            self.meeting_time.into(),
            self.subject.clone().into(),
            self.agenda.clone().into(),
            self.details.clone().into(),
            self.minutes.clone().into(),
            self.status.into(),
        ]
    }
}
