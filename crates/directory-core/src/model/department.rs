use serde::{Deserialize, Serialize};

use super::department_ref::DepartmentRef;

/// Display name of the synthetic bucket for employees without a department
pub const UNASSIGNED_NAME: &str = "Unassigned";

/// Store-assigned department identifier
///
/// Ids are handed out by the store in increasing order and are never reused,
/// even after the department is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(u64);

impl DepartmentId {
    /// Wrap a raw id (e.g. one parsed from a URL path)
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw integer value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Department - a named grouping of employees
///
/// A department holds no back-reference to its members. Membership lives
/// solely on `Employee::department`, and the member count is always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier assigned by the store
    pub id: DepartmentId,

    /// Trimmed, non-empty display name (not required to be unique)
    pub name: String,
}

impl Department {
    /// Create a new Department with the given id and name
    ///
    /// Does not validate the name; the store does that on write.
    pub fn new(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The reference an employee uses to point at this department
    pub fn reference(&self) -> DepartmentRef {
        DepartmentRef::Assigned(self.id)
    }
}

/// Read view of a department with its live employee count
///
/// `id` is `None` only for the Unassigned bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub id: Option<DepartmentId>,
    pub name: String,
    pub employee_count: usize,
}

impl DepartmentSummary {
    /// Summary of a stored department
    pub fn for_department(department: &Department, employee_count: usize) -> Self {
        Self {
            id: Some(department.id),
            name: department.name.clone(),
            employee_count,
        }
    }

    /// Summary row for the Unassigned bucket
    pub fn unassigned(employee_count: usize) -> Self {
        Self {
            id: None,
            name: UNASSIGNED_NAME.to_string(),
            employee_count,
        }
    }

    /// Whether this row describes the Unassigned bucket
    pub fn is_unassigned(&self) -> bool {
        self.id.is_none()
    }
}
