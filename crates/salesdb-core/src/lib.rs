//! SalesDB Core - Entity models, DAO contracts and shared facilities
//!
//! This crate provides the storage-agnostic half of SalesDB:
//! - Department and Seller entity models
//! - The `DepartmentDao` / `SellerDao` capability traits
//! - The structured error facility (`ExError`, `ExErrorKind`, `DaoError`)
//! - The logging facility (`init`, `log_op_start!`, `log_op_end!`, `log_op_error!`)
//!
//! Storage backends live in `salesdb-store`.

pub mod dao;
pub mod errors;
pub mod logging_facility;
pub mod model;

#[doc(hidden)]
pub use salesdb_core_types;

// Re-export commonly used types
pub use dao::{DepartmentDao, SellerDao};
pub use errors::{DaoError, ExError, ExErrorKind, Result};
pub use model::{Department, Seller};
