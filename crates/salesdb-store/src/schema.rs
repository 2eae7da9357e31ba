//! Schema bootstrap for fresh databases
//!
//! The DDL is embedded at compile time using include_str! and written with
//! `IF NOT EXISTS`, so running it against an existing database changes
//! nothing. There is no versioning; the tables are owned by whoever
//! provisions the database.

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use tracing::debug;

const SCHEMA_SQL: &str = include_str!("../sql/schema.sql");
const DEMO_SEED_SQL: &str = include_str!("../sql/demo_seed.sql");

/// Create the `department` and `seller` tables if they are missing
///
/// # Errors
///
/// `Persistence` if the DDL fails.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| from_rusqlite(e).with_op("ensure_schema"))?;
    debug!("schema ensured");
    Ok(())
}

/// Insert the demo departments and sellers. Rows whose ids already exist
/// are left untouched.
///
/// # Errors
///
/// `Persistence` if the tables are missing, `ConstraintViolation` if the
/// data conflicts with existing rows.
pub fn seed_demo(conn: &Connection) -> Result<()> {
    conn.execute_batch(DEMO_SEED_SQL)
        .map_err(|e| from_rusqlite(e).with_op("seed_demo"))?;
    debug!("demo data seeded");
    Ok(())
}
