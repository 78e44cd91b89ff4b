use super::store::Store;
use crate::errors::Result;
use crate::model::{Department, DepartmentId};
use crate::rules::validation::normalize_name;

const NAME_FIELD: &str = "department name";

/// Create a new department with a fresh id
///
/// The name is trimmed before storing. Names need not be unique.
///
/// # Errors
/// * `InvalidName` - If name is empty or contains only whitespace
pub fn create_department(store: &mut Store, name: &str) -> Result<DepartmentId> {
    let name = normalize_name(NAME_FIELD, name)?;
    let id = store.next_department_id()?;
    store.insert_department(Department::new(id, name));
    Ok(id)
}

/// Read a department by id
///
/// # Errors
/// * `DepartmentNotFound` - If the department doesn't exist
pub fn read_department(store: &Store, id: DepartmentId) -> Result<&Department> {
    store.get_department(id)
}

/// Replace a department's name
///
/// The name is validated before the lookup result is touched, so a failed
/// rename leaves the record unchanged.
///
/// # Errors
/// * `DepartmentNotFound` - If the department doesn't exist
/// * `InvalidName` - If name is empty or contains only whitespace
pub fn rename_department(store: &mut Store, id: DepartmentId, name: &str) -> Result<()> {
    store.get_department(id)?;
    let name = normalize_name(NAME_FIELD, name)?;
    store.get_department_mut(id)?.name = name;
    Ok(())
}

/// Remove a department record
///
/// Does not touch employees. Callers go through
/// `rules::invariants::cascade_on_department_delete` first.
///
/// # Errors
/// * `DepartmentNotFound` - If the department doesn't exist
pub fn remove_department(store: &mut Store, id: DepartmentId) -> Result<Department> {
    store.take_department(id)
}

/// List all departments in insertion order
pub fn list_departments(store: &Store) -> Vec<&Department> {
    store.list_departments()
}
