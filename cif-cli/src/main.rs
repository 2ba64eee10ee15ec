//! cif CLI - runs the CIF record service
//!
//! Subcommands:
//! - `serve`: HTTP API over the cif table (or in-memory storage)
//! - `migrate`: create the cif table if it does not exist
//!
//! Settings come from flags, then environment variables, then a `.env`
//! file in the working directory.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "cif",
    author,
    version,
    about = "CIF member record service",
    long_about = "REST service for CIF member records: multipart submissions with signature \
                  and photo attachments, lookups by key or member name, and raffle-ticket keys."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the cif table if it does not exist
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Real environment variables win over .env entries
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }

    Ok(())
}
