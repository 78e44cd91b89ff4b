use directory_core::{
    Department, DepartmentId, DepartmentRef, Directory, Employee, EmployeeId, NewEmployee, Store,
};

/// Create a new empty Store for testing
#[allow(dead_code)]
pub fn new_store() -> Store {
    Store::new()
}

/// Insert a department directly, bypassing the CRUD operations
#[allow(dead_code)]
pub fn insert_department(store: &mut Store, id: u64, name: &str) -> DepartmentId {
    let id = DepartmentId::new(id);
    store.insert_department(Department::new(id, name));
    id
}

/// Insert an employee directly, bypassing the CRUD operations and the
/// reference check (use this to build deliberately broken stores)
#[allow(dead_code)]
pub fn insert_employee(
    store: &mut Store,
    id: u64,
    name: &str,
    department: impl Into<DepartmentRef>,
) -> EmployeeId {
    let id = EmployeeId::new(id);
    store.insert_employee(Employee::from_new(
        id,
        NewEmployee::new(name).with_department(department),
    ));
    id
}

/// Directory with Engineering (John Doe, Jane Smith), Finance (empty) and
/// one unassigned employee (Eve Anderson)
#[allow(dead_code)]
pub fn small_directory() -> (Directory, DepartmentId, DepartmentId) {
    let directory = Directory::new();
    let engineering = directory.create_department("Engineering").unwrap().id;
    let finance = directory.create_department("Finance").unwrap().id;

    for (name, department) in [
        ("John Doe", DepartmentRef::from(engineering)),
        ("Jane Smith", DepartmentRef::from(engineering)),
        ("Eve Anderson", DepartmentRef::Unassigned),
    ] {
        directory
            .create_employee(NewEmployee::new(name).with_department(department))
            .unwrap();
    }

    (directory, engineering, finance)
}

/// Full names from a list of summaries, in order
#[allow(dead_code)]
pub fn names(employees: &[directory_core::EmployeeSummary]) -> Vec<String> {
    employees.iter().map(|e| e.full_name.clone()).collect()
}
