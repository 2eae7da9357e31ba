use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::department::Department;

/// Seller - the "many" side of the department/seller relationship
///
/// `department` is a denormalized copy of the referenced department's id and
/// name as read from a join. The department row stays the source of truth;
/// a seller never owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// Store-assigned identifier (None for a not-yet-persisted seller)
    pub id: Option<i64>,

    pub name: String,

    pub email: String,

    pub birth_date: NaiveDateTime,

    /// Monthly base salary
    pub base_salary: f64,

    /// Department this seller belongs to; must carry an id to be persisted
    pub department: Department,
}

impl Seller {
    /// Create a transient seller, ready for insert
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDateTime,
        base_salary: f64,
        department: Department,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            birth_date,
            base_salary,
            department,
        }
    }

    /// Check if this seller has been persisted
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Id of the referenced department, if known
    pub fn department_id(&self) -> Option<i64> {
        self.department.id
    }
}

impl fmt::Display for Seller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Seller #{} {}", id, self.name)?,
            None => write!(f, "Seller (unsaved) {}", self.name)?,
        }
        write!(
            f,
            " <{}> born {} salary {:.2} [{}]",
            self.email,
            self.birth_date.format("%Y-%m-%d"),
            self.base_salary,
            self.department
        )
    }
}
