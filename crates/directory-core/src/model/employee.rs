use serde::{Deserialize, Serialize};

use super::department::DepartmentId;
use super::department_ref::DepartmentRef;

/// Store-assigned employee identifier, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(u64);

impl EmployeeId {
    /// Wrap a raw id (e.g. one parsed from a URL path)
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw integer value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Employee - a person in the directory
///
/// `department` is the only relationship field. It is written exclusively by
/// the invariant enforcer (`rules::invariants`), which keeps it pointing at an
/// existing department or at the Unassigned bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,

    /// Trimmed, non-empty; the primary search key
    pub full_name: String,

    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,

    #[serde(rename = "departmentId")]
    pub department: DepartmentRef,
}

impl Employee {
    /// Build an employee record from creation fields and a fresh id
    pub fn from_new(id: EmployeeId, fields: NewEmployee) -> Self {
        Self {
            id,
            full_name: fields.full_name,
            address: fields.address,
            phone: fields.phone,
            email: fields.email,
            department: fields.department,
        }
    }

    /// Check if this employee sits in the Unassigned bucket
    pub fn is_unassigned(&self) -> bool {
        self.department.is_unassigned()
    }
}

/// Fields for creating an employee
///
/// The department defaults to Unassigned when not set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewEmployee {
    pub full_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department: DepartmentRef,
}

impl NewEmployee {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<DepartmentRef>) -> Self {
        self.department = department.into();
        self
    }
}

/// Partial update of an employee
///
/// `None` leaves a field unchanged. For the optional contact fields, a blank
/// string clears the value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeePatch {
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department: Option<DepartmentRef>,
}

impl EmployeePatch {
    /// Check if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.department.is_none()
    }
}

/// Read view of an employee with the department name resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub full_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<DepartmentId>,
    /// `"Unassigned"` for the Unassigned bucket
    pub department_name: String,
}

impl EmployeeSummary {
    pub fn new(employee: &Employee, department_name: impl Into<String>) -> Self {
        Self {
            id: employee.id,
            full_name: employee.full_name.clone(),
            address: employee.address.clone(),
            phone: employee.phone.clone(),
            email: employee.email.clone(),
            department_id: employee.department.department_id(),
            department_name: department_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_employee_defaults_to_unassigned() {
        let fields = NewEmployee::new("Eve Anderson");
        let employee = Employee::from_new(EmployeeId::new(1), fields);

        assert!(employee.is_unassigned());
        assert_eq!(employee.address, None);
    }

    #[test]
    fn test_builder_sets_fields() {
        let fields = NewEmployee::new("John Doe")
            .with_email("john.doe@company.com")
            .with_phone("+1-555-0101")
            .with_department(DepartmentId::new(2));

        assert_eq!(fields.email.as_deref(), Some("john.doe@company.com"));
        assert_eq!(fields.department, DepartmentRef::Assigned(DepartmentId::new(2)));
    }

    #[test]
    fn test_employee_serializes_department_as_nullable_id() {
        let employee = Employee::from_new(EmployeeId::new(5), NewEmployee::new("Frank Miller"));
        let json = serde_json::to_value(&employee).unwrap();

        assert_eq!(json["fullName"], "Frank Miller");
        assert!(json["departmentId"].is_null());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(EmployeePatch::default().is_empty());
        let patch = EmployeePatch {
            department: Some(DepartmentRef::Unassigned),
            ..EmployeePatch::default()
        };
        assert!(!patch.is_empty());
    }
}
