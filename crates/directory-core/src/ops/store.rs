use std::collections::BTreeMap;

use crate::errors::{DirectoryError, Result};
use crate::model::{Department, DepartmentId, Employee, EmployeeId};

/// In-memory store for departments and employees
///
/// Plain owned maps, no interior locking. Concurrency is the job of
/// `service::Directory`, which clones the store, applies a command, and swaps
/// the result in.
///
/// Maps are keyed by id and ids only grow, so iteration order is insertion
/// order.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) departments: BTreeMap<DepartmentId, Department>,
    pub(crate) employees: BTreeMap<EmployeeId, Employee>,
    /// Highest department id ever handed out
    last_department_id: u64,
    /// Highest employee id ever handed out
    last_employee_id: u64,
}

impl Store {
    /// Create a new empty Store
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next department id
    ///
    /// Ids start at 1 and are never reused, even after deletion.
    ///
    /// # Errors
    ///
    /// Returns `IdSpaceExhausted` once `u64::MAX` has been handed out. The
    /// counter is left untouched in that case.
    pub(crate) fn next_department_id(&mut self) -> Result<DepartmentId> {
        self.last_department_id = self
            .last_department_id
            .checked_add(1)
            .ok_or(DirectoryError::IdSpaceExhausted { entity: "department" })?;
        Ok(DepartmentId::new(self.last_department_id))
    }

    /// Reserve the next employee id
    ///
    /// # Errors
    ///
    /// Returns `IdSpaceExhausted` once `u64::MAX` has been handed out.
    pub(crate) fn next_employee_id(&mut self) -> Result<EmployeeId> {
        self.last_employee_id = self
            .last_employee_id
            .checked_add(1)
            .ok_or(DirectoryError::IdSpaceExhausted { entity: "employee" })?;
        Ok(EmployeeId::new(self.last_employee_id))
    }

    /// Get a department by id
    ///
    /// # Errors
    ///
    /// Returns `DepartmentNotFound` if no department has this id.
    pub fn get_department(&self, id: DepartmentId) -> Result<&Department> {
        self.departments
            .get(&id)
            .ok_or(DirectoryError::DepartmentNotFound { department_id: id })
    }

    /// Get a mutable reference to a department by id
    ///
    /// # Errors
    ///
    /// Returns `DepartmentNotFound` if no department has this id.
    pub fn get_department_mut(&mut self, id: DepartmentId) -> Result<&mut Department> {
        self.departments
            .get_mut(&id)
            .ok_or(DirectoryError::DepartmentNotFound { department_id: id })
    }

    /// Get an employee by id
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if no employee has this id.
    pub fn get_employee(&self, id: EmployeeId) -> Result<&Employee> {
        self.employees
            .get(&id)
            .ok_or(DirectoryError::EmployeeNotFound { employee_id: id })
    }

    /// Get a mutable reference to an employee by id
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if no employee has this id.
    pub fn get_employee_mut(&mut self, id: EmployeeId) -> Result<&mut Employee> {
        self.employees
            .get_mut(&id)
            .ok_or(DirectoryError::EmployeeNotFound { employee_id: id })
    }

    pub fn contains_department(&self, id: DepartmentId) -> bool {
        self.departments.contains_key(&id)
    }

    pub fn contains_employee(&self, id: EmployeeId) -> bool {
        self.employees.contains_key(&id)
    }

    /// List all departments in insertion order
    pub fn list_departments(&self) -> Vec<&Department> {
        self.departments.values().collect()
    }

    /// List all employees in insertion order
    pub fn list_employees(&self) -> Vec<&Employee> {
        self.employees.values().collect()
    }

    /// Insert a department record
    ///
    /// Used by the CRUD operations and by test helpers that need to build
    /// deliberately inconsistent stores. Keeps the id counter ahead of any
    /// inserted id.
    pub fn insert_department(&mut self, department: Department) {
        self.last_department_id = self.last_department_id.max(department.id.get());
        self.departments.insert(department.id, department);
    }

    /// Insert an employee record
    pub fn insert_employee(&mut self, employee: Employee) {
        self.last_employee_id = self.last_employee_id.max(employee.id.get());
        self.employees.insert(employee.id, employee);
    }

    /// Remove a department record without touching its members
    ///
    /// Callers outside `rules::invariants` must go through the cascade instead.
    pub(crate) fn take_department(&mut self, id: DepartmentId) -> Result<Department> {
        self.departments
            .remove(&id)
            .ok_or(DirectoryError::DepartmentNotFound { department_id: id })
    }

    pub(crate) fn take_employee(&mut self, id: EmployeeId) -> Result<Employee> {
        self.employees
            .remove(&id)
            .ok_or(DirectoryError::EmployeeNotFound { employee_id: id })
    }

    pub fn department_count(&self) -> usize {
        self.departments.len()
    }

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }
}
