use super::store::Store;
use crate::errors::Result;
use crate::model::{DepartmentRef, Employee, EmployeeId, EmployeePatch, NewEmployee};
use crate::rules::validation::{normalize_name, normalize_optional};

const NAME_FIELD: &str = "full name";

/// Create a new employee with a fresh id
///
/// Trims the full name and contact fields. The department reference is
/// stored as given; checking it is the enforcer's job (see
/// `apply::apply`, which routes creation through the enforcer).
///
/// # Errors
/// * `InvalidName` - If the full name is empty or contains only whitespace
pub fn create_employee(store: &mut Store, fields: NewEmployee) -> Result<EmployeeId> {
    let full_name = normalize_name(NAME_FIELD, &fields.full_name)?;
    let fields = NewEmployee {
        full_name,
        address: normalize_optional(fields.address),
        phone: normalize_optional(fields.phone),
        email: normalize_optional(fields.email),
        department: fields.department,
    };

    let id = store.next_employee_id()?;
    store.insert_employee(Employee::from_new(id, fields));
    Ok(id)
}

/// Read an employee by id
///
/// # Errors
/// * `EmployeeNotFound` - If the employee doesn't exist
pub fn read_employee(store: &Store, id: EmployeeId) -> Result<&Employee> {
    store.get_employee(id)
}

/// Apply the non-relationship fields of a patch
///
/// `patch.department` is ignored here; department changes go through
/// `rules::invariants::assign_employee`. All fields are validated before any
/// is written.
///
/// # Errors
/// * `EmployeeNotFound` - If the employee doesn't exist
/// * `InvalidName` - If a new full name is empty or whitespace-only
pub fn update_employee_fields(store: &mut Store, id: EmployeeId, patch: &EmployeePatch) -> Result<()> {
    store.get_employee(id)?;
    let full_name = patch
        .full_name
        .as_deref()
        .map(|name| normalize_name(NAME_FIELD, name))
        .transpose()?;

    let employee = store.get_employee_mut(id)?;
    if let Some(full_name) = full_name {
        employee.full_name = full_name;
    }
    if let Some(address) = &patch.address {
        employee.address = normalize_optional(Some(address.clone()));
    }
    if let Some(phone) = &patch.phone {
        employee.phone = normalize_optional(Some(phone.clone()));
    }
    if let Some(email) = &patch.email {
        employee.email = normalize_optional(Some(email.clone()));
    }
    Ok(())
}

/// Overwrite an employee's department reference without checking it
///
/// Low-level store primitive. Everything outside `rules` uses
/// `assign_employee` instead.
///
/// # Errors
/// * `EmployeeNotFound` - If the employee doesn't exist
pub fn update_employee_department(
    store: &mut Store,
    id: EmployeeId,
    department: DepartmentRef,
) -> Result<()> {
    store.get_employee_mut(id)?.department = department;
    Ok(())
}

/// Remove an employee record
///
/// # Errors
/// * `EmployeeNotFound` - If the employee doesn't exist
pub fn remove_employee(store: &mut Store, id: EmployeeId) -> Result<Employee> {
    store.take_employee(id)
}

/// List all employees in insertion order
pub fn list_employees(store: &Store) -> Vec<&Employee> {
    store.list_employees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DirectoryError;
    use crate::model::DepartmentId;

    #[test]
    fn test_create_employee_normalizes_fields() {
        let mut store = Store::new();
        let id = create_employee(
            &mut store,
            NewEmployee::new(" John Doe ").with_phone("  ").with_email(" john.doe@company.com"),
        )
        .unwrap();

        let employee = read_employee(&store, id).unwrap();
        assert_eq!(employee.full_name, "John Doe");
        assert_eq!(employee.phone, None);
        assert_eq!(employee.email.as_deref(), Some("john.doe@company.com"));
        assert!(employee.is_unassigned());
    }

    #[test]
    fn test_create_employee_rejects_blank_name() {
        let mut store = Store::new();
        let result = create_employee(&mut store, NewEmployee::new("  "));

        assert!(matches!(result, Err(DirectoryError::InvalidName { .. })));
        assert_eq!(store.employee_count(), 0);
    }

    #[test]
    fn test_update_fields_is_all_or_nothing() {
        let mut store = Store::new();
        let id = create_employee(&mut store, NewEmployee::new("Jane Smith")).unwrap();
        let patch = EmployeePatch {
            full_name: Some(" ".to_string()),
            phone: Some("+1-555-0102".to_string()),
            ..EmployeePatch::default()
        };

        assert!(update_employee_fields(&mut store, id, &patch).is_err());
        assert_eq!(read_employee(&store, id).unwrap().phone, None);
    }

    #[test]
    fn test_update_fields_blank_contact_clears() {
        let mut store = Store::new();
        let id = create_employee(&mut store, NewEmployee::new("Jane Smith").with_phone("123"))
            .unwrap();
        let patch = EmployeePatch {
            phone: Some(String::new()),
            ..EmployeePatch::default()
        };

        update_employee_fields(&mut store, id, &patch).unwrap();
        assert_eq!(read_employee(&store, id).unwrap().phone, None);
    }

    #[test]
    fn test_update_employee_department_does_not_validate() {
        let mut store = Store::new();
        let id = create_employee(&mut store, NewEmployee::new("Bob Johnson")).unwrap();

        update_employee_department(&mut store, id, DepartmentId::new(77).into()).unwrap();

        assert!(read_employee(&store, id)
            .unwrap()
            .department
            .is_department(DepartmentId::new(77)));
    }

    #[test]
    fn test_remove_missing_employee() {
        let mut store = Store::new();
        assert!(matches!(
            remove_employee(&mut store, EmployeeId::new(1)),
            Err(DirectoryError::EmployeeNotFound { .. })
        ));
    }
}
