use directory_core_types::RequestId;
use thiserror::Error;

use crate::model::{DepartmentId, EmployeeId};

/// Result type alias using DirectoryError
pub type Result<T> = std::result::Result<T, DirectoryError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every detailed `DirectoryError` collapses to one of these kinds. Callers
/// (the HTTP layer, tests) branch on the kind, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A required field is empty, or the request is malformed
    Validation,
    /// The entity addressed by the operation does not exist
    NotFound,
    /// A supplied foreign id (department target) does not resolve
    Reference,
    /// A broken internal invariant or a poisoned lock
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Reference => "ERR_REFERENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the kind plus operation and entity context for programmatic
/// handling and for rendering transport-level error bodies.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for directory operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirectoryError {
    // ===== Validation Errors =====
    /// A required name (department name, employee full name) is blank
    #[error("Invalid {field}: {reason}")]
    InvalidName { field: &'static str, reason: String },

    /// The Unassigned bucket was addressed as if it were a department
    #[error("The Unassigned bucket is not a department and cannot be deleted")]
    UnassignedNotDeletable,

    // ===== Not Found Errors =====
    /// Department not found in store
    #[error("Department not found with id: {department_id}")]
    DepartmentNotFound { department_id: DepartmentId },

    /// Employee not found in store
    #[error("Employee not found with id: {employee_id}")]
    EmployeeNotFound { employee_id: EmployeeId },

    // ===== Reference Errors =====
    /// A department supplied as an assignment target does not exist
    #[error("Department not found with id: {department_id}")]
    DepartmentReferenceInvalid { department_id: DepartmentId },

    // ===== Integrity Errors =====
    /// An employee points at a department that is no longer stored
    #[error("Employee {employee_id} references missing department {department_id}")]
    DanglingDepartmentReference {
        employee_id: EmployeeId,
        department_id: DepartmentId,
    },

    /// Every id of this entity type has been handed out
    #[error("No {entity} ids left to assign")]
    IdSpaceExhausted { entity: &'static str },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DirectoryError {
    /// The canonical kind this error collapses to
    pub fn kind(&self) -> ExErrorKind {
        match self {
            DirectoryError::InvalidName { .. } | DirectoryError::UnassignedNotDeletable => {
                ExErrorKind::Validation
            }
            DirectoryError::DepartmentNotFound { .. } | DirectoryError::EmployeeNotFound { .. } => {
                ExErrorKind::NotFound
            }
            DirectoryError::DepartmentReferenceInvalid { .. } => ExErrorKind::Reference,
            DirectoryError::DanglingDepartmentReference { .. }
            | DirectoryError::IdSpaceExhausted { .. }
            | DirectoryError::Internal { .. } => ExErrorKind::Internal,
        }
    }

    pub(crate) fn invalid_name(field: &'static str) -> Self {
        DirectoryError::InvalidName {
            field,
            reason: "cannot be empty or whitespace-only".to_string(),
        }
    }
}

/// Conversion from DirectoryError to the canonical ExError
impl From<DirectoryError> for ExError {
    fn from(err: DirectoryError) -> Self {
        let message = err.to_string();
        let base = ExError::new(err.kind()).with_message(message);
        match err {
            DirectoryError::DepartmentNotFound { department_id }
            | DirectoryError::DepartmentReferenceInvalid { department_id } => {
                base.with_entity_id(department_id.to_string())
            }
            DirectoryError::EmployeeNotFound { employee_id }
            | DirectoryError::DanglingDepartmentReference { employee_id, .. } => {
                base.with_entity_id(employee_id.to_string())
            }
            DirectoryError::InvalidName { .. }
            | DirectoryError::UnassignedNotDeletable
            | DirectoryError::IdSpaceExhausted { .. }
            | DirectoryError::Internal { .. } => base,
        }
    }
}
