//! Record store configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Record store configuration.
///
/// `provider` selects the backend: `"postgres"` talks to a PostgreSQL
/// server at `url`, `"memory"` keeps everything in process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Backend provider: `"postgres"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// PostgreSQL connection URL.
    #[serde(default)]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Run pending migrations at startup.
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
            auto_migrate: false,
        }
    }
}

impl DatabaseConfig {
    /// Whether the PostgreSQL backend is selected.
    pub fn is_postgres(&self) -> bool {
        self.provider.eq_ignore_ascii_case("postgres")
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        match self.provider.to_ascii_lowercase().as_str() {
            "memory" => Ok(()),
            "postgres" if self.url.is_empty() => Err(AppError::configuration(
                "database.url is required when database.provider = \"postgres\"",
            )),
            "postgres" => Ok(()),
            other => Err(AppError::configuration(format!(
                "Unknown database provider '{other}' (expected \"postgres\" or \"memory\")"
            ))),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_requires_url() {
        let config = DatabaseConfig {
            provider: "postgres".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let config = DatabaseConfig {
            provider: "sqlite".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
