pub mod department;
pub mod department_ref;
pub mod employee;

pub use department::{Department, DepartmentId, DepartmentSummary, UNASSIGNED_NAME};
pub use department_ref::DepartmentRef;
pub use employee::{Employee, EmployeeId, EmployeePatch, EmployeeSummary, NewEmployee};
