//! DAO construction
//!
//! The factory owns the [`ConnectionProvider`]; the DAOs it hands out
//! borrow it, so the borrow checker guarantees none of them outlives the
//! connection or survives a `close()`.

use super::{SqliteDepartmentDao, SqliteSellerDao};
use crate::config::DbConfig;
use crate::db::ConnectionProvider;
use crate::errors::Result;
use tracing::debug;

/// Builds DAOs over one shared connection
#[derive(Debug)]
pub struct DaoFactory {
    provider: ConnectionProvider,
}

impl DaoFactory {
    /// Create a factory for `config`. Nothing is opened yet; a bad
    /// configuration or unreachable database surfaces as an error from the
    /// first DAO operation.
    pub fn new(config: DbConfig) -> Self {
        debug!(url = %config.url, "dao factory created");
        Self::with_provider(ConnectionProvider::new(config))
    }

    /// Create a factory around an existing provider
    pub fn with_provider(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    pub fn department_dao(&self) -> SqliteDepartmentDao<'_> {
        SqliteDepartmentDao::new(&self.provider)
    }

    pub fn seller_dao(&self) -> SqliteSellerDao<'_> {
        SqliteSellerDao::new(&self.provider)
    }

    /// The provider every DAO from this factory shares
    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }

    /// Close the shared connection. Idempotent.
    ///
    /// # Errors
    ///
    /// `Connection` if SQLite reports a failure while closing.
    pub fn close(&mut self) -> Result<()> {
        self.provider.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ensure_schema;
    use salesdb_core::model::Department;
    use salesdb_core::{DepartmentDao, ExErrorKind, SellerDao};

    #[test]
    fn test_daos_share_one_connection() {
        let factory = DaoFactory::new(DbConfig::in_memory());
        assert!(!factory.provider().is_open());

        ensure_schema(factory.provider().connection().unwrap()).unwrap();

        let mut books = Department::new("Books");
        factory.department_dao().insert(&mut books).unwrap();

        // A second DAO sees the first DAO's write on the same in-memory database
        let sellers = factory.seller_dao().find_by_department(&books).unwrap();
        assert!(sellers.is_empty());
        assert_eq!(factory.department_dao().find_all().unwrap(), vec![books]);
    }

    #[test]
    fn test_bad_config_fails_on_first_operation() {
        let config = DbConfig {
            url: String::new(),
            ..DbConfig::default()
        };
        let factory = DaoFactory::new(config);

        let err = factory.department_dao().find_all().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Configuration);
        assert_eq!(err.op(), Some("department_find_all"));
    }

    #[test]
    fn test_close_twice() {
        let mut factory = DaoFactory::new(DbConfig::in_memory());
        factory.provider().health_check().unwrap();

        factory.close().unwrap();
        factory.close().unwrap();
        assert!(!factory.provider().is_open());
    }
}
