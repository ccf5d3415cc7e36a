// sqlrunner-core/src/domain/schema.rs
//
// Table definitions for the clients/meetings walkthrough (MySQL dialect).

pub const CLIENTS_TABLE: &str = "clients";
pub const MEETINGS_TABLE: &str = "meetings";

pub const CREATE_CLIENTS_TABLE: &str = r#"CREATE TABLE clients (
    client_id   INT AUTO_INCREMENT PRIMARY KEY,
    name        VARCHAR(100) NOT NULL,
    email       VARCHAR(255) NOT NULL UNIQUE,
    company     VARCHAR(150),
    phone       VARCHAR(30),
    address     VARCHAR(255),
    created_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#;

// meetings rows disappear with their client (ON DELETE CASCADE).
pub const CREATE_MEETINGS_TABLE: &str = r#"CREATE TABLE meetings (
    meeting_id    INT AUTO_INCREMENT PRIMARY KEY,
    client_id     INT NOT NULL,
    meeting_date  DATE NOT NULL,
    meeting_time  TIME NOT NULL,
    subject       VARCHAR(200) NOT NULL,
    agenda        TEXT,
    details       TEXT,
    minutes       TEXT NULL,
    status        ENUM('scheduled', 'completed', 'cancelled') NOT NULL DEFAULT 'scheduled',
    created_at    TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at    TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
    CONSTRAINT fk_meetings_client FOREIGN KEY (client_id)
        REFERENCES clients (client_id) ON DELETE CASCADE,
    INDEX idx_meetings_client_date (client_id, meeting_date)
)"#;

pub fn drop_table_if_exists(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", table)
}

pub fn create_database_if_not_exists(database: &str) -> String {
    format!("CREATE DATABASE IF NOT EXISTS {}", database)
}

pub fn use_database(database: &str) -> String {
    format!("USE {}", database)
}

/// Multi-row `INSERT ... VALUES (?, ..), (?, ..)` for `rows` rows.
pub fn multi_row_insert(table: &str, columns: &[&str], rows: usize) -> String {
    let group = format!("({})", vec!["?"; columns.len()].join(", "));
    format!(
        "INSERT INTO {} ({}) VALUES {}",
        table,
        columns.join(", "),
        vec![group; rows].join(", ")
    )
}
