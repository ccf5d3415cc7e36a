// sqlrunner-core/src/infrastructure/config/connection.rs

use std::fs;
use std::path::Path;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::connection::ConnectionSettings;
use crate::infrastructure::error::InfrastructureError;

pub const DEFAULT_CONFIG_FILE: &str = "sqlrunner.yaml";

/// Loads connection settings: YAML file (optional when it is the default file),
/// then `DB_*` environment overrides, then validation.
#[instrument(skip(lookup))]
pub fn load_connection_settings<F>(
    config_path: &Path,
    explicit: bool,
    lookup: F,
) -> Result<ConnectionSettings, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = if config_path.exists() {
        info!(path = ?config_path, "Loading connection settings");
        let content = fs::read_to_string(config_path)?;
        serde_yaml::from_str::<ConnectionSettings>(&content)?
    } else if explicit {
        return Err(InfrastructureError::ConfigNotFound(
            config_path.display().to_string(),
        ));
    } else {
        info!(path = ?config_path, "No settings file, using built-in defaults");
        ConnectionSettings::default()
    };

    apply_env_overrides(&mut settings, lookup)?;

    settings
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(settings)
}

/// `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`, `DB_TLS`.
pub fn apply_env_overrides<F>(
    settings: &mut ConnectionSettings,
    lookup: F,
) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("DB_HOST") {
        info!(old = %settings.host, new = %val, "Overriding host via ENV");
        settings.host = val;
    }
    if let Some(val) = lookup("DB_PORT") {
        settings.port = val
            .trim()
            .parse()
            .map_err(|_| InfrastructureError::ConfigError(format!("DB_PORT is not a port: '{}'", val)))?;
        info!(port = settings.port, "Overriding port via ENV");
    }
    if let Some(val) = lookup("DB_USER") {
        info!(old = %settings.user, new = %val, "Overriding user via ENV");
        settings.user = val;
    }
    if let Some(val) = lookup("DB_PASSWORD") {
        info!("Overriding password via ENV");
        settings.password = val;
    }
    if let Some(val) = lookup("DB_NAME") {
        info!(old = %settings.database, new = %val, "Overriding database via ENV");
        settings.database = val;
    }
    if let Some(val) = lookup("DB_TLS") {
        settings.tls = parse_flag(&val).ok_or_else(|| {
            InfrastructureError::ConfigError(format!("DB_TLS is not a boolean: '{}'", val))
        })?;
        if !settings.tls {
            warn!("TLS disabled via ENV");
        }
    }
    Ok(())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
