use serde::{Deserialize, Serialize};
use std::fmt;

/// Department - the "one" side of the department/seller relationship
///
/// A Department is a plain value. Its `id` is `None` until the store assigns
/// one on insert; after that the id never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Store-assigned identifier (None for a not-yet-persisted department)
    pub id: Option<i64>,

    /// Human-readable label
    pub name: String,
}

impl Department {
    /// Create a transient department, ready for insert
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Create a department value for an existing row
    pub fn with_id(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Create an id-only reference, e.g. as a filter argument or a seller's
    /// department before it has been re-read from the store
    pub fn reference(id: i64) -> Self {
        Self {
            id: Some(id),
            name: String::new(),
        }
    }

    /// Check if this department has been persisted
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Department #{} {}", id, self.name),
            None => write!(f, "Department (unsaved) {}", self.name),
        }
    }
}
