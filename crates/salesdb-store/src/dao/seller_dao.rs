//! SQLite implementation of [`SellerDao`]
//!
//! Reads always go through an inner join with `department`, so every
//! returned seller carries its department's id and name. Each row builds
//! its own `Department` value; sellers of the same department get equal
//! but independent copies.

use super::{elapsed_ms, fail};
use crate::db::ConnectionProvider;
use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, OptionalExtension, Row};
use salesdb_core::errors::DaoError;
use salesdb_core::model::{Department, Seller};
use salesdb_core::{log_op_end, log_op_start, SellerDao};
use std::time::Instant;
use tracing::debug;

const OP_INSERT: &str = "seller_insert";
const OP_UPDATE: &str = "seller_update";
const OP_DELETE: &str = "seller_delete";
const OP_FIND_BY_ID: &str = "seller_find_by_id";
const OP_FIND_ALL: &str = "seller_find_all";
const OP_FIND_BY_DEPARTMENT: &str = "seller_find_by_department";

/// Projection shared by every read; department columns are aliased so the
/// row mappers can address them by name.
const SELECT_JOINED: &str = "SELECT seller.Id AS Id, seller.Name AS Name, seller.Email AS Email, \
     seller.BirthDate AS BirthDate, seller.BaseSalary AS BaseSalary, \
     seller.DepartmentId AS DepartmentId, department.Name AS DepName \
     FROM seller INNER JOIN department ON seller.DepartmentId = department.Id";

/// Seller DAO bound to a borrowed [`ConnectionProvider`]
#[derive(Debug, Clone, Copy)]
pub struct SqliteSellerDao<'p> {
    provider: &'p ConnectionProvider,
}

impl<'p> SqliteSellerDao<'p> {
    pub fn new(provider: &'p ConnectionProvider) -> Self {
        Self { provider }
    }

    fn insert_impl(&self, seller: &mut Seller) -> Result<i64> {
        if let Some(id) = seller.id {
            return Err(DaoError::AlreadyPersisted {
                entity: "Seller",
                id,
            }
            .into());
        }
        let department_id = seller
            .department_id()
            .ok_or(DaoError::MissingDepartmentId)?;

        let conn = self.provider.connection()?;
        let mut stmt = conn
            .prepare(
                "INSERT INTO seller (Name, Email, BirthDate, BaseSalary, DepartmentId) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .map_err(from_rusqlite)?;
        let id = stmt
            .insert(params![
                seller.name,
                seller.email,
                seller.birth_date,
                seller.base_salary,
                department_id
            ])
            .map_err(from_rusqlite)?;

        seller.id = Some(id);
        Ok(id)
    }

    fn update_impl(&self, seller: &Seller) -> Result<()> {
        let id = seller.id.ok_or(DaoError::MissingId {
            entity: "Seller",
            action: "updated",
        })?;
        let department_id = seller
            .department_id()
            .ok_or(DaoError::MissingDepartmentId)?;

        let conn = self.provider.connection()?;
        let mut stmt = conn
            .prepare(
                "UPDATE seller SET Name = ?1, Email = ?2, BirthDate = ?3, BaseSalary = ?4, \
                 DepartmentId = ?5 WHERE Id = ?6",
            )
            .map_err(from_rusqlite)?;
        let changed = stmt
            .execute(params![
                seller.name,
                seller.email,
                seller.birth_date,
                seller.base_salary,
                department_id,
                id
            ])
            .map_err(from_rusqlite)?;

        if changed == 0 {
            return Err(DaoError::SellerNotFound { id }.into());
        }
        Ok(())
    }

    fn delete_impl(&self, id: i64) -> Result<bool> {
        let conn = self.provider.connection()?;
        let mut stmt = conn
            .prepare("DELETE FROM seller WHERE Id = ?1")
            .map_err(from_rusqlite)?;
        let changed = stmt.execute(params![id]).map_err(from_rusqlite)?;
        debug!(seller_id = id, changed = changed as u64, "seller delete executed");
        Ok(changed > 0)
    }

    fn find_by_id_impl(&self, id: i64) -> Result<Seller> {
        let conn = self.provider.connection()?;
        let mut stmt = conn
            .prepare(&format!("{} WHERE seller.Id = ?1", SELECT_JOINED))
            .map_err(from_rusqlite)?;
        let seller = stmt
            .query_row(params![id], map_seller_row)
            .optional()
            .map_err(from_rusqlite)?;

        seller.ok_or_else(|| DaoError::SellerNotFound { id }.into())
    }

    fn find_all_impl(&self) -> Result<Vec<Seller>> {
        self.query_sellers(
            &format!("{} ORDER BY seller.Name, seller.Id", SELECT_JOINED),
            None,
        )
    }

    fn find_by_department_impl(&self, department: &Department) -> Result<Vec<Seller>> {
        let department_id = department.id.ok_or(DaoError::MissingId {
            entity: "Department",
            action: "used as a filter",
        })?;
        self.query_sellers(
            &format!(
                "{} WHERE seller.DepartmentId = ?1 ORDER BY seller.Name, seller.Id",
                SELECT_JOINED
            ),
            Some(department_id),
        )
    }

    /// Run a joined query and materialize every row before returning
    fn query_sellers(&self, sql: &str, department_id: Option<i64>) -> Result<Vec<Seller>> {
        let conn = self.provider.connection()?;
        let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
        let rows = match department_id {
            Some(id) => stmt.query_map(params![id], map_seller_row),
            None => stmt.query_map([], map_seller_row),
        }
        .map_err(from_rusqlite)?;

        let sellers = rows
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        debug!(row_count = sellers.len() as u64, "seller rows mapped");
        Ok(sellers)
    }
}

impl SellerDao for SqliteSellerDao<'_> {
    fn insert(&self, seller: &mut Seller) -> Result<()> {
        log_op_start!(
            OP_INSERT,
            name = seller.name.as_str(),
            department_id = ?seller.department_id()
        );
        let start = Instant::now();

        let id = self.insert_impl(seller).map_err(fail(OP_INSERT, start))?;

        log_op_end!(OP_INSERT, duration_ms = elapsed_ms(start), seller_id = id);
        Ok(())
    }

    fn update(&self, seller: &Seller) -> Result<()> {
        log_op_start!(OP_UPDATE, seller_id = ?seller.id);
        let start = Instant::now();

        self.update_impl(seller).map_err(fail(OP_UPDATE, start))?;

        log_op_end!(OP_UPDATE, duration_ms = elapsed_ms(start));
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<bool> {
        log_op_start!(OP_DELETE, seller_id = id);
        let start = Instant::now();

        let deleted = self.delete_impl(id).map_err(fail(OP_DELETE, start))?;

        log_op_end!(OP_DELETE, duration_ms = elapsed_ms(start), deleted = deleted);
        Ok(deleted)
    }

    fn find_by_id(&self, id: i64) -> Result<Seller> {
        log_op_start!(OP_FIND_BY_ID, seller_id = id);
        let start = Instant::now();

        let seller = self
            .find_by_id_impl(id)
            .map_err(fail(OP_FIND_BY_ID, start))?;

        log_op_end!(OP_FIND_BY_ID, duration_ms = elapsed_ms(start));
        Ok(seller)
    }

    fn find_all(&self) -> Result<Vec<Seller>> {
        log_op_start!(OP_FIND_ALL);
        let start = Instant::now();

        let sellers = self.find_all_impl().map_err(fail(OP_FIND_ALL, start))?;

        log_op_end!(
            OP_FIND_ALL,
            duration_ms = elapsed_ms(start),
            row_count = sellers.len() as u64
        );
        Ok(sellers)
    }

    fn find_by_department(&self, department: &Department) -> Result<Vec<Seller>> {
        log_op_start!(OP_FIND_BY_DEPARTMENT, department_id = ?department.id);
        let start = Instant::now();

        let sellers = self
            .find_by_department_impl(department)
            .map_err(fail(OP_FIND_BY_DEPARTMENT, start))?;

        log_op_end!(
            OP_FIND_BY_DEPARTMENT,
            duration_ms = elapsed_ms(start),
            row_count = sellers.len() as u64
        );
        Ok(sellers)
    }
}

fn map_seller_row(row: &Row<'_>) -> rusqlite::Result<Seller> {
    let department = instantiate_department(row)?;
    instantiate_seller(row, department)
}

fn instantiate_department(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department::with_id(
        row.get("DepartmentId")?,
        row.get::<_, String>("DepName")?,
    ))
}

fn instantiate_seller(row: &Row<'_>, department: Department) -> rusqlite::Result<Seller> {
    Ok(Seller {
        id: Some(row.get("Id")?),
        name: row.get("Name")?,
        email: row.get("Email")?,
        birth_date: row.get("BirthDate")?,
        base_salary: row.get("BaseSalary")?,
        department,
    })
}
