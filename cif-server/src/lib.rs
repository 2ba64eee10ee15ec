//! cif-server: HTTP service for CIF member records
//!
//! Accepts member form submissions (with signature and photo attachments),
//! stores them in a single `cif` table and exposes read, search and update
//! endpoints over JSON.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, DatabaseConfig, REQUEST_TIMEOUT};
pub use db::{CifStore, DbError, MemoryCifStore, PgCifStore};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use models::{CifKeyRow, CifRecord, CifUpdate, NewCifRecord};
