//! SalesDB Store - SQLite-backed data access for departments and sellers
//!
//! Provides:
//! - `ConnectionProvider`: one lazily opened connection, shared by reference
//! - Error translation from `rusqlite::Error` into the canonical `ExError`
//! - Layered connection configuration (file, `.env`, environment)
//! - `SqliteDepartmentDao` / `SqliteSellerDao` and the `DaoFactory` that builds them
//! - Schema bootstrap and demo data for fresh databases

pub mod config;
pub mod dao;
pub mod db;
pub mod errors;
pub mod schema;

// Re-export key types
pub use config::{load_config, DbConfig};
pub use dao::{DaoFactory, SqliteDepartmentDao, SqliteSellerDao};
pub use db::ConnectionProvider;
pub use errors::Result;
