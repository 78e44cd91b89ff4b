//! Read views with derived fields
//!
//! Counts and department names are resolved from the live store on every
//! call.

use crate::errors::{DirectoryError, Result};
use crate::model::{
    Department, DepartmentId, DepartmentRef, DepartmentSummary, Employee, EmployeeSummary,
    UNASSIGNED_NAME,
};
use crate::ops::Store;
use crate::rules::invariants::{compute_employee_count, count_unassigned};

/// Summary of one stored department
///
/// # Errors
/// * `DepartmentNotFound` - If the department doesn't exist
pub fn department_summary(store: &Store, id: DepartmentId) -> Result<DepartmentSummary> {
    let department = store.get_department(id)?;
    Ok(summarize(store, department))
}

fn summarize(store: &Store, department: &Department) -> DepartmentSummary {
    DepartmentSummary::for_department(department, compute_employee_count(store, department.id))
}

/// Summaries of the given departments, in the order given
pub fn summarize_departments(store: &Store, departments: &[&Department]) -> Vec<DepartmentSummary> {
    departments.iter().map(|d| summarize(store, d)).collect()
}

/// Summaries of every department, followed by an Unassigned row
///
/// The Unassigned row is only present while at least one employee has no
/// department.
pub fn department_summaries(store: &Store) -> Vec<DepartmentSummary> {
    let mut summaries = summarize_departments(store, &store.list_departments());
    let unassigned = count_unassigned(store);
    if unassigned > 0 {
        summaries.push(DepartmentSummary::unassigned(unassigned));
    }
    summaries
}

/// Employee view with the department name resolved
///
/// # Errors
/// * `DanglingDepartmentReference` - If the employee points at a missing department
pub fn employee_summary(store: &Store, employee: &Employee) -> Result<EmployeeSummary> {
    let name = match employee.department {
        DepartmentRef::Unassigned => UNASSIGNED_NAME,
        DepartmentRef::Assigned(department_id) => store
            .departments
            .get(&department_id)
            .map(|d| d.name.as_str())
            .ok_or(DirectoryError::DanglingDepartmentReference {
                employee_id: employee.id,
                department_id,
            })?,
    };
    Ok(EmployeeSummary::new(employee, name))
}

/// Resolve a list of employees, failing on the first dangling reference
///
/// # Errors
/// * `DanglingDepartmentReference` - If any employee points at a missing department
pub fn employee_summaries(store: &Store, employees: &[&Employee]) -> Result<Vec<EmployeeSummary>> {
    employees.iter().map(|e| employee_summary(store, e)).collect()
}
