use thiserror::Error;

/// Result type alias using the canonical `ExError`
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by a DAO operation carries exactly one kind. Each
/// kind maps to a stable error code that callers may branch on, print, or
/// assert in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Caller supplied an entity in the wrong lifecycle state (e.g. no id on update)
    InvalidInput,
    /// A lookup by id matched no row
    NotFound,
    /// The store rejected a write (unique, not-null, foreign key, check)
    ConstraintViolation,
    /// The connection could not be established or configured
    Connection,
    /// Connection parameters are missing or malformed
    Configuration,
    /// Any other query execution or row mapping failure
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Connection => "ERR_CONNECTION",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the
/// operation name, the entity id involved (if any) and the original
/// human-readable message from the layer that failed.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when a lookup matched nothing
    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain failures raised by the DAO layer itself (as opposed to the store)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DaoError {
    /// No department row with this id
    #[error("Department not found: {id}")]
    DepartmentNotFound { id: i64 },

    /// No seller row with this id
    #[error("Seller not found: {id}")]
    SellerNotFound { id: i64 },

    /// Operation requires a persisted entity but the id is unset
    #[error("{entity} has no id; it must be inserted before it can be {action}")]
    MissingId {
        entity: &'static str,
        action: &'static str,
    },

    /// Insert called on an entity that already carries a store-assigned id
    #[error("{entity} already has id {id}; ids are assigned by the store on insert")]
    AlreadyPersisted { entity: &'static str, id: i64 },

    /// Seller references a department that has no id
    #[error("Seller department has no id")]
    MissingDepartmentId,

    /// A connection parameter is missing or malformed
    #[error("Invalid configuration for '{key}': {reason}")]
    InvalidConfig { key: String, reason: String },
}

/// Conversion from DaoError to ExError
impl From<DaoError> for ExError {
    fn from(err: DaoError) -> Self {
        let message = err.to_string();
        match err {
            DaoError::DepartmentNotFound { id } | DaoError::SellerNotFound { id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(id)
                    .with_message(message)
            }
            DaoError::AlreadyPersisted { id, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(id)
                .with_message(message),
            DaoError::MissingId { .. } | DaoError::MissingDepartmentId => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            DaoError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::Configuration).with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::ConstraintViolation, "ERR_CONSTRAINT_VIOLATION"),
            (ExErrorKind::Connection, "ERR_CONNECTION"),
            (ExErrorKind::Configuration, "ERR_CONFIGURATION"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_code_op_and_message() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("department_find_by_id")
            .with_entity_id(7)
            .with_message("Department not found: 7");

        let rendered = err.to_string();
        assert_eq!(
            rendered,
            "[ERR_NOT_FOUND] in operation 'department_find_by_id': Department not found: 7 (entity_id: 7)"
        );
    }

    #[test]
    fn test_not_found_converts_with_entity_id() {
        let err: ExError = DaoError::SellerNotFound { id: 42 }.into();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert!(err.is_not_found());
        assert_eq!(err.entity_id(), Some("42"));
        assert_eq!(err.message(), "Seller not found: 42");
    }

    #[test]
    fn test_missing_id_is_invalid_input() {
        let err: ExError = DaoError::MissingId {
            entity: "Department",
            action: "updated",
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(
            err.message(),
            "Department has no id; it must be inserted before it can be updated"
        );
    }

    #[test]
    fn test_invalid_config_is_configuration_kind() {
        let err: ExError = DaoError::InvalidConfig {
            key: "url".to_string(),
            reason: "must not be empty".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::Configuration);
        assert!(err.op().is_none());
    }
}
