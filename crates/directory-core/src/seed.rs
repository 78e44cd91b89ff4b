//! Sample directory content for demos and manual testing

use crate::model::{Department, DepartmentId, Employee, EmployeeId, NewEmployee};
use crate::ops::Store;

const DEPARTMENTS: [&str; 4] = ["Engineering", "Human Resources", "Marketing", "Finance"];

/// (full name, address, phone, email, 1-based department index)
type SampleEmployee = (&'static str, &'static str, &'static str, &'static str, Option<u64>);

const EMPLOYEES: [SampleEmployee; 8] = [
    ("John Doe", "123 Main St, Anytown, USA", "+1-555-0101", "john.doe@company.com", Some(1)),
    ("Jane Smith", "456 Oak Ave, Anytown, USA", "+1-555-0102", "jane.smith@company.com", Some(1)),
    ("Bob Johnson", "789 Pine St, Anytown, USA", "+1-555-0103", "bob.johnson@company.com", Some(2)),
    ("Alice Brown", "321 Elm St, Anytown, USA", "+1-555-0104", "alice.brown@company.com", Some(3)),
    ("Charlie Wilson", "654 Cedar Ave, Anytown, USA", "+1-555-0105", "charlie.wilson@company.com", Some(1)),
    ("Diana Davis", "987 Birch St, Anytown, USA", "+1-555-0106", "diana.davis@company.com", Some(4)),
    ("Eve Anderson", "147 Maple Ave, Anytown, USA", "+1-555-0107", "eve.anderson@company.com", None),
    ("Frank Miller", "258 Spruce St, Anytown, USA", "+1-555-0108", "frank.miller@company.com", None),
];

/// Build a store holding four departments and eight employees
///
/// Ids are assigned in listing order starting at 1. Two employees are
/// unassigned.
pub fn sample_store() -> Store {
    let mut store = Store::new();

    for (i, name) in DEPARTMENTS.iter().enumerate() {
        store.insert_department(Department::new(DepartmentId::new(i as u64 + 1), *name));
    }

    for (i, (name, address, phone, email, department)) in EMPLOYEES.into_iter().enumerate() {
        let fields = NewEmployee::new(name)
            .with_address(address)
            .with_phone(phone)
            .with_email(email)
            .with_department(department.map(DepartmentId::new));
        store.insert_employee(Employee::from_new(EmployeeId::new(i as u64 + 1), fields));
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{compute_employee_count, count_unassigned, validate_references};

    #[test]
    fn test_sample_store_is_consistent() {
        let store = sample_store();

        assert!(validate_references(&store).is_ok());
        assert_eq!(store.department_count(), 4);
        assert_eq!(store.employee_count(), 8);
        assert_eq!(count_unassigned(&store), 2);
        assert_eq!(compute_employee_count(&store, DepartmentId::new(1)), 3);
    }

    #[test]
    fn test_sample_ids_continue_after_seed() {
        let mut store = sample_store();
        assert_eq!(store.next_department_id().unwrap().get(), 5);
        assert_eq!(store.next_employee_id().unwrap().get(), 9);
    }
}
