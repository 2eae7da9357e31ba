//! SQLite implementation of [`DepartmentDao`]

use super::{elapsed_ms, fail};
use crate::db::ConnectionProvider;
use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, OptionalExtension, Row};
use salesdb_core::errors::DaoError;
use salesdb_core::model::Department;
use salesdb_core::{log_op_end, log_op_start, DepartmentDao};
use std::time::Instant;
use tracing::debug;

const OP_INSERT: &str = "department_insert";
const OP_UPDATE: &str = "department_update";
const OP_DELETE: &str = "department_delete";
const OP_FIND_BY_ID: &str = "department_find_by_id";
const OP_FIND_ALL: &str = "department_find_all";

/// Department DAO bound to a borrowed [`ConnectionProvider`]
#[derive(Debug, Clone, Copy)]
pub struct SqliteDepartmentDao<'p> {
    provider: &'p ConnectionProvider,
}

impl<'p> SqliteDepartmentDao<'p> {
    pub fn new(provider: &'p ConnectionProvider) -> Self {
        Self { provider }
    }

    fn insert_impl(&self, department: &mut Department) -> Result<i64> {
        if let Some(id) = department.id {
            return Err(DaoError::AlreadyPersisted {
                entity: "Department",
                id,
            }
            .into());
        }

        let conn = self.provider.connection()?;
        let mut stmt = conn
            .prepare("INSERT INTO department (Name) VALUES (?1)")
            .map_err(from_rusqlite)?;
        let id = stmt
            .insert(params![department.name])
            .map_err(from_rusqlite)?;

        department.id = Some(id);
        Ok(id)
    }

    fn update_impl(&self, department: &Department) -> Result<()> {
        let id = department.id.ok_or(DaoError::MissingId {
            entity: "Department",
            action: "updated",
        })?;

        let conn = self.provider.connection()?;
        let mut stmt = conn
            .prepare("UPDATE department SET Name = ?1 WHERE Id = ?2")
            .map_err(from_rusqlite)?;
        let changed = stmt
            .execute(params![department.name, id])
            .map_err(from_rusqlite)?;

        if changed == 0 {
            return Err(DaoError::DepartmentNotFound { id }.into());
        }
        Ok(())
    }

    fn delete_impl(&self, id: i64) -> Result<bool> {
        let conn = self.provider.connection()?;
        let mut stmt = conn
            .prepare("DELETE FROM department WHERE Id = ?1")
            .map_err(from_rusqlite)?;
        let changed = stmt.execute(params![id]).map_err(from_rusqlite)?;
        debug!(department_id = id, changed = changed as u64, "department delete executed");
        Ok(changed > 0)
    }

    fn find_by_id_impl(&self, id: i64) -> Result<Department> {
        let conn = self.provider.connection()?;
        let mut stmt = conn
            .prepare("SELECT Id, Name FROM department WHERE Id = ?1")
            .map_err(from_rusqlite)?;
        let department = stmt
            .query_row(params![id], instantiate_department)
            .optional()
            .map_err(from_rusqlite)?;

        department.ok_or_else(|| DaoError::DepartmentNotFound { id }.into())
    }

    fn find_all_impl(&self) -> Result<Vec<Department>> {
        let conn = self.provider.connection()?;
        let mut stmt = conn
            .prepare("SELECT Id, Name FROM department ORDER BY Name, Id")
            .map_err(from_rusqlite)?;
        let departments = stmt
            .query_map([], instantiate_department)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(departments)
    }
}

impl DepartmentDao for SqliteDepartmentDao<'_> {
    fn insert(&self, department: &mut Department) -> Result<()> {
        log_op_start!(OP_INSERT, name = department.name.as_str());
        let start = Instant::now();

        let id = self
            .insert_impl(department)
            .map_err(fail(OP_INSERT, start))?;

        log_op_end!(OP_INSERT, duration_ms = elapsed_ms(start), department_id = id);
        Ok(())
    }

    fn update(&self, department: &Department) -> Result<()> {
        log_op_start!(OP_UPDATE, department_id = ?department.id);
        let start = Instant::now();

        self.update_impl(department)
            .map_err(fail(OP_UPDATE, start))?;

        log_op_end!(OP_UPDATE, duration_ms = elapsed_ms(start));
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<bool> {
        log_op_start!(OP_DELETE, department_id = id);
        let start = Instant::now();

        let deleted = self.delete_impl(id).map_err(fail(OP_DELETE, start))?;

        log_op_end!(OP_DELETE, duration_ms = elapsed_ms(start), deleted = deleted);
        Ok(deleted)
    }

    fn find_by_id(&self, id: i64) -> Result<Department> {
        log_op_start!(OP_FIND_BY_ID, department_id = id);
        let start = Instant::now();

        let department = self
            .find_by_id_impl(id)
            .map_err(fail(OP_FIND_BY_ID, start))?;

        log_op_end!(OP_FIND_BY_ID, duration_ms = elapsed_ms(start));
        Ok(department)
    }

    fn find_all(&self) -> Result<Vec<Department>> {
        log_op_start!(OP_FIND_ALL);
        let start = Instant::now();

        let departments = self.find_all_impl().map_err(fail(OP_FIND_ALL, start))?;

        log_op_end!(
            OP_FIND_ALL,
            duration_ms = elapsed_ms(start),
            row_count = departments.len() as u64
        );
        Ok(departments)
    }
}

/// Map a `department` row (columns `Id`, `Name`)
fn instantiate_department(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department::with_id(row.get("Id")?, row.get::<_, String>("Name")?))
}
