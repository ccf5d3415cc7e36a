// sqlrunner-core/src/domain/connection.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Where the runner connects. The database itself is created by the script.
#[derive(Deserialize, Serialize, Validate, Clone, PartialEq)]
pub struct ConnectionSettings {
    #[validate(length(min = 1, message = "Host cannot be empty"))]
    #[serde(default = "default_host")]
    pub host: String,

    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    #[serde(default = "default_port")]
    pub port: u16,

    #[validate(length(min = 1, message = "User cannot be empty"))]
    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,

    #[validate(custom(function = "validate_identifier"))]
    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default)]
    pub tls: bool,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: String::new(),
            database: default_database(),
            tls: false,
        }
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("tls", &self.tls)
            .finish()
    }
}

// The database name is spliced into CREATE DATABASE / USE, which cannot be bound.
fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("identifier")
            .with_message("Database name must be non-empty and use only [A-Za-z0-9_]".into()));
    }
    Ok(())
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3306
}
fn default_user() -> String {
    "root".to_string()
}
fn default_database() -> String {
    "client_meetings".to_string()
}
