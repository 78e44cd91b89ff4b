use crate::errors::{DirectoryError, Result};
use crate::model::{DepartmentId, DepartmentRef, EmployeeId};
use crate::ops::employee_ops::update_employee_department;
use crate::ops::Store;

/// Point an employee at a department or at the Unassigned bucket
///
/// Checks the target, then writes through the unchecked store primitive
/// `update_employee_department`. The employee lookup runs first, so a
/// missing employee is reported even when the target is also bad.
///
/// # Returns
/// The employee's previous department reference
///
/// # Errors
/// * `EmployeeNotFound` - If the employee doesn't exist
/// * `DepartmentReferenceInvalid` - If an assigned target department doesn't exist
pub fn assign_employee(
    store: &mut Store,
    employee_id: EmployeeId,
    target: DepartmentRef,
) -> Result<DepartmentRef> {
    let previous = store.get_employee(employee_id)?.department;

    if let DepartmentRef::Assigned(department_id) = target {
        if !store.contains_department(department_id) {
            return Err(DirectoryError::DepartmentReferenceInvalid { department_id });
        }
    }

    update_employee_department(store, employee_id, target)?;
    Ok(previous)
}

/// Move every member of a department to the Unassigned bucket
///
/// Must run before the department record is removed, within the same
/// command, so no reader ever sees a dangling reference.
///
/// # Returns
/// Ids of the moved employees, in store order
///
/// # Errors
/// * `DepartmentNotFound` - If the department doesn't exist
pub fn cascade_on_department_delete(
    store: &mut Store,
    department_id: DepartmentId,
) -> Result<Vec<EmployeeId>> {
    store.get_department(department_id)?;

    let moved: Vec<EmployeeId> = store
        .employees
        .values()
        .filter(|e| e.department.is_department(department_id))
        .map(|e| e.id)
        .collect();
    for &employee_id in &moved {
        update_employee_department(store, employee_id, DepartmentRef::Unassigned)?;
    }

    Ok(moved)
}

/// Count the employees currently referencing a department
///
/// Always computed from the live employee set; never cached.
pub fn compute_employee_count(store: &Store, department_id: DepartmentId) -> usize {
    store
        .employees
        .values()
        .filter(|e| e.department.is_department(department_id))
        .count()
}

/// Count the employees in the Unassigned bucket
pub fn count_unassigned(store: &Store) -> usize {
    store.employees.values().filter(|e| e.is_unassigned()).count()
}

/// Find employees whose department reference points at no stored department
///
/// Returns list of (employee_id, department_id) tuples
pub fn find_dangling_references(store: &Store) -> Vec<(EmployeeId, DepartmentId)> {
    store
        .employees
        .values()
        .filter_map(|employee| match employee.department {
            DepartmentRef::Assigned(department_id) if !store.contains_department(department_id) => {
                Some((employee.id, department_id))
            }
            _ => None,
        })
        .collect()
}
