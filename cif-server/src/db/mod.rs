//! Storage layer - record pool, table schema and CIF stores
//!
//! # Design Principles
//!
//! - One pool, opened at startup, shared by every request
//! - Every statement is parameterized and runs on its own (no transactions)
//! - Constraints live in the table; no check-then-insert
//! - Handlers only see the `CifStore` trait

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod schema;
pub mod store;

pub use memory::MemoryCifStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgCifStore;
pub use store::{CifStore, DbError};
