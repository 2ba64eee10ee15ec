//! HTTP server command for the CIF record service

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use cif_server::db::{create_pool, migrations};
use cif_server::http::server::DEFAULT_BODY_LIMIT;
use cif_server::{run_server, CifStore, MemoryCifStore, PgCifStore, ServerConfig};

use super::db::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, env = "CIF_BIND_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Largest accepted request body in bytes (uploads included)
    #[arg(long, env = "CIF_BODY_LIMIT_BYTES", default_value_t = DEFAULT_BODY_LIMIT)]
    pub body_limit: usize,

    /// Create the cif table before serving if it does not exist
    #[arg(long)]
    pub migrate: bool,

    /// Keep records in process memory instead of the database
    #[arg(long, conflicts_with = "migrate")]
    pub in_memory: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn CifStore> = if args.in_memory {
        tracing::warn!("Using in-memory storage - records are lost on exit");
        Arc::new(MemoryCifStore::new())
    } else {
        let pool = create_pool(&args.db.to_config())
            .await
            .context("Failed to create database pool")?;
        if args.migrate {
            migrations::run(&pool)
                .await
                .context("Failed to run migrations")?;
        }
        Arc::new(PgCifStore::new(pool))
    };

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        body_limit: args.body_limit,
    };

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
