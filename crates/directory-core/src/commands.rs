//! Command types for every mutating directory operation
//!
//! Commands are the input to `apply::apply()`. Reads never go through here.

use crate::model::{DepartmentId, DepartmentRef, EmployeeId, EmployeePatch, NewEmployee};

/// Command enum representing all directory mutations
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a department with the given name
    DepartmentCreate { name: String },

    /// Rename an existing department
    DepartmentRename {
        department_id: DepartmentId,
        name: String,
    },

    /// Delete a department, moving its members to Unassigned first
    ///
    /// Takes a `DepartmentRef` so that an attempt to delete the Unassigned
    /// bucket is rejected as a validation error rather than a lookup miss.
    DepartmentDelete { department: DepartmentRef },

    /// Create an employee; the department reference is checked
    EmployeeCreate { fields: NewEmployee },

    /// Partially update an employee
    EmployeeUpdate {
        employee_id: EmployeeId,
        patch: EmployeePatch,
    },

    /// Delete an employee
    EmployeeDelete { employee_id: EmployeeId },

    /// Move an employee to a department or to Unassigned
    EmployeeReassign {
        employee_id: EmployeeId,
        department: DepartmentRef,
    },
}

impl Command {
    /// Stable operation name used in logs and error context
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::DepartmentCreate { .. } => "create_department",
            Command::DepartmentRename { .. } => "rename_department",
            Command::DepartmentDelete { .. } => "delete_department",
            Command::EmployeeCreate { .. } => "create_employee",
            Command::EmployeeUpdate { .. } => "update_employee",
            Command::EmployeeDelete { .. } => "delete_employee",
            Command::EmployeeReassign { .. } => "reassign_employee",
        }
    }
}

/// What a successfully applied command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    DepartmentCreated(DepartmentId),
    DepartmentRenamed(DepartmentId),
    DepartmentDeleted {
        department_id: DepartmentId,
        /// Former members, now Unassigned
        moved: Vec<EmployeeId>,
    },
    EmployeeCreated(EmployeeId),
    EmployeeUpdated(EmployeeId),
    EmployeeDeleted(EmployeeId),
    EmployeeReassigned {
        employee_id: EmployeeId,
        previous: DepartmentRef,
    },
}
