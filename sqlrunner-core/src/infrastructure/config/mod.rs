pub mod connection;

pub use connection::{DEFAULT_CONFIG_FILE, load_connection_settings};
