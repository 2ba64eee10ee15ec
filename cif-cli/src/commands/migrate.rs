//! Create the cif table in the configured database

use anyhow::{Context, Result};
use clap::Parser;

use cif_server::db::{create_pool, migrations};

use super::db::DbArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.db.to_config())
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(())
}
