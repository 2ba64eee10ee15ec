//! Database connection arguments shared by `serve` and `migrate`

use clap::Args;

use cif_server::config::DEFAULT_MAX_CONNECTIONS;
use cif_server::DatabaseConfig;

/// Database connection settings (flags override `DB_*` environment variables)
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Full connection string; overrides the DB_* parts
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "DB_SERVER", default_value = "localhost")]
    pub db_server: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database name
    #[arg(long, env = "DB_DATABASE")]
    pub db_database: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "CIF_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DbArgs {
    pub fn to_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            host: self.db_server.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            database: self.db_database.clone(),
            max_connections: self.max_connections,
        }
    }
}
