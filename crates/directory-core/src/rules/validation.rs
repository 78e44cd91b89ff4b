use crate::errors::{DirectoryError, Result};
use crate::ops::Store;

use super::invariants;

/// Trim a required name, rejecting blank input
///
/// # Errors
/// Returns `InvalidName` if the value is empty or whitespace-only.
pub fn normalize_name(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DirectoryError::invalid_name(field));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional contact field; blank becomes absent
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Validate every employee's department reference
///
/// Run by `apply` after each command. A failure here means an operation
/// bypassed the enforcer; the command's result is discarded.
///
/// # Errors
/// Returns `DanglingDepartmentReference` for the first employee pointing at a
/// department that is not stored.
pub fn validate_references(store: &Store) -> Result<()> {
    let dangling = invariants::find_dangling_references(store);
    if let Some((employee_id, department_id)) = dangling.first() {
        return Err(DirectoryError::DanglingDepartmentReference {
            employee_id: *employee_id,
            department_id: *department_id,
        });
    }
    Ok(())
}
