//! SQLite DAO implementations
//!
//! Every operation borrows the provider's connection, prepares one
//! parameterized statement, and lets the `Statement` (and any `Rows` cursor
//! over it) fall out of scope inside the helper that created it. Both are
//! finalized on drop, so they are released on every exit path: success, a
//! mapped error, or an early `?` return.
//!
//! ## Logging Ownership
//!
//! The public trait methods own lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Row mapping and the `*_impl` helpers use only `tracing::debug!()`.

pub mod department_dao;
pub mod factory;
pub mod seller_dao;

pub use department_dao::SqliteDepartmentDao;
pub use factory::DaoFactory;
pub use seller_dao::SqliteSellerDao;

use salesdb_core::errors::ExError;
use salesdb_core::log_op_error;
use std::time::Instant;

pub(crate) fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Stamp the public operation name on a failure and log its end_error event
pub(crate) fn fail(op: &'static str, start: Instant) -> impl FnOnce(ExError) -> ExError {
    move |err| {
        let err = err.with_op(op);
        log_op_error!(op, err.clone(), duration_ms = elapsed_ms(start));
        err
    }
}
