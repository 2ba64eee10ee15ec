//! Database connection configuration
//!
//! Values normally come from the `DB_*` environment variables (see the
//! `cif` binary). A full `DATABASE_URL` takes precedence over the parts.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Fixed per-statement timeout handed to the driver at startup.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(300_000);

/// Default maximum connections for the record pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid DATABASE_URL: {0}")]
    InvalidUrl(#[source] sqlx::Error),
}

/// Connection settings for the record pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; overrides the individual parts when set
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: None,
            password: None,
            database: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Build driver connect options, including the fixed statement timeout.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let options = match &self.url {
            Some(url) => PgConnectOptions::from_str(url).map_err(ConfigError::InvalidUrl)?,
            None => {
                let mut options = PgConnectOptions::new().host(&self.host).port(self.port);
                if let Some(user) = &self.user {
                    options = options.username(user);
                }
                if let Some(password) = &self.password {
                    options = options.password(password);
                }
                if let Some(database) = &self.database {
                    options = options.database(database);
                }
                options
            }
        };

        Ok(options.options([(
            "statement_timeout",
            REQUEST_TIMEOUT.as_millis().to_string(),
        )]))
    }

    /// Connection target for log lines (never includes the password).
    pub fn describe(&self) -> String {
        match &self.url {
            Some(_) => "DATABASE_URL".to_string(),
            None => format!(
                "{}:{}/{}",
                self.host,
                self.port,
                self.database.as_deref().unwrap_or("")
            ),
        }
    }
}
