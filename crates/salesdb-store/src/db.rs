//! Database connection management
//!
//! `ConnectionProvider` owns the single connection every DAO works through.
//! The connection is opened on first use, configured once, and handed out
//! by shared reference; DAOs never own it.

use crate::config::{DbConfig, Target};
use crate::errors::{connection_error, Result};
use rusqlite::{Connection, OpenFlags};
use std::cell::OnceCell;
use std::time::Duration;
use tracing::{debug, info};

/// Holds at most one open connection built from a `DbConfig`.
///
/// The provider is not `Sync`; sharing it across threads does not compile.
/// Closing requires `&mut self`, so no DAO borrowing the provider can be
/// alive while the connection goes away.
#[derive(Debug)]
pub struct ConnectionProvider {
    config: DbConfig,
    conn: OnceCell<Connection>,
}

impl ConnectionProvider {
    /// Create a provider without opening anything. Never fails; connection
    /// errors surface on the first operation that needs the connection.
    pub fn new(config: DbConfig) -> Self {
        Self {
            config,
            conn: OnceCell::new(),
        }
    }

    /// Create a provider and open its connection immediately
    ///
    /// # Errors
    ///
    /// `Connection` if the database cannot be opened or configured.
    pub fn open(config: DbConfig) -> Result<Self> {
        let provider = Self::new(config);
        provider.connection()?;
        Ok(provider)
    }

    /// Open a provider over a private in-memory database (for testing)
    ///
    /// # Errors
    ///
    /// `Connection` if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(DbConfig::in_memory())
    }

    /// The configuration this provider opens connections with
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Whether a live connection is currently held
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Borrow the connection, opening it on first use
    ///
    /// # Errors
    ///
    /// `Configuration` for an unusable url, `Connection` if the open or the
    /// initial settings fail. A failed open leaves the provider closed, so a
    /// later call tries again.
    pub fn connection(&self) -> Result<&Connection> {
        if let Some(conn) = self.conn.get() {
            return Ok(conn);
        }
        let conn = connect(&self.config)?;
        Ok(self.conn.get_or_init(|| conn))
    }

    /// Check that the held connection answers a trivial query
    ///
    /// # Errors
    ///
    /// `Connection` if the query fails or the connection cannot be opened.
    pub fn health_check(&self) -> Result<()> {
        self.connection()?
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(connection_error)?;
        Ok(())
    }

    /// Release the connection. Closing a provider that is already closed,
    /// or was never opened, is a no-op.
    ///
    /// # Errors
    ///
    /// `Connection` if SQLite reports a failure while closing; the handle is
    /// dropped either way and the provider ends up closed.
    pub fn close(&mut self) -> Result<()> {
        match self.conn.take() {
            None => {
                debug!("close on a closed provider; nothing to do");
                Ok(())
            }
            Some(conn) => {
                conn.close().map_err(|(_, e)| connection_error(e))?;
                info!(url = %self.config.url, "database connection closed");
                Ok(())
            }
        }
    }
}

/// Open and configure a connection for `config`
fn connect(config: &DbConfig) -> Result<Connection> {
    let target = config.target()?;

    let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    // An in-memory database always starts empty
    if config.create_if_missing || target == Target::Memory {
        flags |= OpenFlags::SQLITE_OPEN_CREATE;
    }

    let conn = match &target {
        Target::Memory => Connection::open_in_memory_with_flags(flags),
        Target::File(path) => Connection::open_with_flags(path, flags),
    }
    .map_err(connection_error)?;

    configure(&conn, config)?;
    info!(url = %config.url, "database connection opened");
    Ok(conn)
}

/// Apply per-connection settings and prove the file is a usable database
fn configure(conn: &Connection, config: &DbConfig) -> Result<()> {
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(connection_error)?;

    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(connection_error)?;

    if let Some(mode) = &config.journal_mode {
        let applied: String = conn
            .pragma_update_and_check(None, "journal_mode", mode, |row| row.get(0))
            .map_err(connection_error)?;
        debug!(requested = %mode, applied = %applied, "journal mode set");
    }

    // Reading the schema table fails fast on files that are not databases
    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(connection_error)?;

    Ok(())
}
