//! DAO capability traits.
//!
//! Each trait is the complete operation set for one entity type. Storage
//! backends implement them; callers hold `&impl DepartmentDao` or
//! `&dyn SellerDao` and never see SQL.

use crate::errors::Result;
use crate::model::{Department, Seller};

/// Data access for the `department` table.
pub trait DepartmentDao {
    /// Persist a new department and write the store-assigned id back into `department.id`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the department already has an id; `ConstraintViolation`
    /// or `Persistence` if the store rejects the write.
    fn insert(&self, department: &mut Department) -> Result<()>;

    /// Update the row identified by `department.id`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the id is unset; `NotFound` if no row has that id.
    fn update(&self, department: &Department) -> Result<()>;

    /// Delete by id. Returns `true` if a row was removed, `false` if none existed.
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if sellers still reference the department.
    fn delete(&self, id: i64) -> Result<bool>;

    /// Look up one department.
    ///
    /// # Errors
    ///
    /// `NotFound` if no row has that id.
    fn find_by_id(&self, id: i64) -> Result<Department>;

    /// All departments, ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Any store failure.
    fn find_all(&self) -> Result<Vec<Department>>;
}

/// Data access for the `seller` table, joined with `department` on reads.
pub trait SellerDao {
    /// Persist a new seller and write the store-assigned id back into `seller.id`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the seller already has an id or its department has none;
    /// `ConstraintViolation` if the department does not exist.
    fn insert(&self, seller: &mut Seller) -> Result<()>;

    /// Update every column of the row identified by `seller.id`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if an id is unset; `NotFound` if no row has that id.
    fn update(&self, seller: &Seller) -> Result<()>;

    /// Delete by id. Returns `true` if a row was removed, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Any store failure.
    fn delete(&self, id: i64) -> Result<bool>;

    /// Look up one seller with its department populated.
    ///
    /// # Errors
    ///
    /// `NotFound` if no row has that id.
    fn find_by_id(&self, id: i64) -> Result<Seller>;

    /// All sellers, ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Any store failure.
    fn find_all(&self) -> Result<Vec<Seller>>;

    /// Sellers whose department id equals `department.id`, ordered by name.
    /// Only the id is used; `department.name` is ignored.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the department has no id.
    fn find_by_department(&self, department: &Department) -> Result<Vec<Seller>>;
}
