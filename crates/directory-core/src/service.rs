//! Directory service facade
//!
//! `Directory` is the public entry point. It owns the store behind a
//! `RwLock` and exposes every directory operation as a method returning
//! owned snapshots.
//!
//! Mutations hold the write lock for their whole duration, run
//! `apply::apply` against a clone, build the response from the new state,
//! and only then publish it. Readers therefore never observe a half-applied
//! cascade, and a failed command publishes nothing.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use directory_core_types::Sensitive;

use crate::apply::apply;
use crate::commands::{Command, CommandOutcome};
use crate::errors::{DirectoryError, Result};
use crate::model::{
    Department, DepartmentId, DepartmentRef, DepartmentSummary, EmployeeId, EmployeePatch,
    EmployeeSummary, NewEmployee,
};
use crate::ops::Store;
use crate::queries::{self, search};
use crate::rules::validation;
use crate::seed;
use crate::{log_op_end, log_op_error, log_op_start};

fn poisoned() -> DirectoryError {
    DirectoryError::Internal {
        message: "directory state lock poisoned".to_string(),
    }
}

fn unexpected(outcome: &CommandOutcome) -> DirectoryError {
    DirectoryError::Internal {
        message: format!("unexpected command outcome: {:?}", outcome),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

/// Log the end of an operation and pass its result through
fn finish<T>(op: &'static str, started: Instant, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = elapsed_ms(started));
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = elapsed_ms(started));
        }
    }
    result
}

/// Reject a scope that names a department that does not exist
fn ensure_scope(store: &Store, scope: Option<DepartmentRef>) -> Result<()> {
    if let Some(DepartmentRef::Assigned(department_id)) = scope {
        store.get_department(department_id)?;
    }
    Ok(())
}

/// Thread-safe employee/department directory
#[derive(Debug, Default)]
pub struct Directory {
    state: RwLock<Store>,
}

impl Directory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing store
    ///
    /// # Errors
    /// Returns `DanglingDepartmentReference` if the store already violates the
    /// reference invariant.
    pub fn from_store(store: Store) -> Result<Self> {
        validation::validate_references(&store)?;
        Ok(Self {
            state: RwLock::new(store),
        })
    }

    /// Create a directory preloaded with the sample departments and employees
    pub fn with_sample_data() -> Self {
        Self {
            state: RwLock::new(seed::sample_store()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>> {
        self.state.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>> {
        self.state.write().map_err(|_| poisoned())
    }

    /// Run a command atomically and build the response from the new state
    fn execute<T>(
        &self,
        cmd: Command,
        respond: impl FnOnce(&Store, CommandOutcome) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.write()?;
        let (next, outcome) = apply(guard.clone(), cmd)?;
        let response = respond(&next, outcome)?;
        *guard = next;
        Ok(response)
    }

    /// Owned copy of the whole store
    ///
    /// # Errors
    /// `Internal` if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Store> {
        Ok(self.read()?.clone())
    }

    // ===== Departments =====

    /// Every department with its live employee count, plus an Unassigned row
    /// when at least one employee has no department
    ///
    /// # Errors
    /// `Internal` if the lock is poisoned.
    pub fn list_department_summaries(&self) -> Result<Vec<DepartmentSummary>> {
        const OP: &str = "list_department_summaries";
        log_op_start!(OP);
        let started = Instant::now();
        let result = self.read().map(|store| queries::department_summaries(&store));
        finish(OP, started, result)
    }

    /// # Errors
    /// `DepartmentNotFound` if no department has this id.
    pub fn get_department(&self, id: DepartmentId) -> Result<Department> {
        const OP: &str = "get_department";
        log_op_start!(OP, department_id = id.get());
        let started = Instant::now();
        let result = self
            .read()
            .and_then(|store| store.get_department(id).cloned());
        finish(OP, started, result)
    }

    /// Summary of one department
    ///
    /// # Errors
    /// `DepartmentNotFound` if no department has this id.
    pub fn get_department_summary(&self, id: DepartmentId) -> Result<DepartmentSummary> {
        const OP: &str = "get_department_summary";
        log_op_start!(OP, department_id = id.get());
        let started = Instant::now();
        let result = self
            .read()
            .and_then(|store| queries::department_summary(&store, id));
        finish(OP, started, result)
    }

    /// # Errors
    /// `InvalidName` if the name is blank.
    pub fn create_department(&self, name: &str) -> Result<Department> {
        const OP: &str = "create_department";
        log_op_start!(OP);
        let started = Instant::now();
        let result = self.execute(
            Command::DepartmentCreate {
                name: name.to_string(),
            },
            |store, outcome| match outcome {
                CommandOutcome::DepartmentCreated(id) => store.get_department(id).cloned(),
                other => Err(unexpected(&other)),
            },
        );
        finish(OP, started, result)
    }

    /// # Errors
    /// `DepartmentNotFound`, or `InvalidName` if the new name is blank.
    pub fn rename_department(&self, id: DepartmentId, name: &str) -> Result<DepartmentSummary> {
        const OP: &str = "rename_department";
        log_op_start!(OP, department_id = id.get());
        let started = Instant::now();
        let result = self.execute(
            Command::DepartmentRename {
                department_id: id,
                name: name.to_string(),
            },
            |store, _| queries::department_summary(store, id),
        );
        finish(OP, started, result)
    }

    /// Delete a department, moving its members to Unassigned
    ///
    /// Cascade and removal are one atomic unit.
    ///
    /// # Returns
    /// Ids of the employees that were moved
    ///
    /// # Errors
    /// * `UnassignedNotDeletable` - If asked to delete the Unassigned bucket
    /// * `DepartmentNotFound` - If the department doesn't exist (no employee is touched)
    pub fn delete_department(&self, department: DepartmentRef) -> Result<Vec<EmployeeId>> {
        const OP: &str = "delete_department";
        log_op_start!(OP, department = %department);
        let started = Instant::now();

        let result = self.execute(Command::DepartmentDelete { department }, |_, outcome| {
            match outcome {
                CommandOutcome::DepartmentDeleted { moved, .. } => Ok(moved),
                other => Err(unexpected(&other)),
            }
        });

        match result {
            Ok(moved) => {
                log_op_end!(
                    OP,
                    duration_ms = elapsed_ms(started),
                    moved_count = moved.len()
                );
                Ok(moved)
            }
            Err(err) => {
                log_op_error!(OP, err.clone(), duration_ms = elapsed_ms(started));
                Err(err)
            }
        }
    }

    /// Departments whose name contains the query (case-insensitive)
    ///
    /// A blank query matches nothing. The Unassigned bucket is never a match.
    ///
    /// # Errors
    /// `Internal` if the lock is poisoned.
    pub fn search_departments(&self, query: &str) -> Result<Vec<DepartmentSummary>> {
        const OP: &str = "search_departments";
        log_op_start!(OP);
        let started = Instant::now();
        let result = self.read().map(|store| {
            let found = search::search_departments(&store, query);
            queries::summarize_departments(&store, &found)
        });
        finish(OP, started, result)
    }

    // ===== Employees =====

    /// List employees in a scope, optionally filtered by name
    ///
    /// `scope = None` lists everyone. A missing or blank `search` returns the
    /// whole scope; a non-blank one narrows it by full name.
    ///
    /// # Errors
    /// `DepartmentNotFound` if an assigned scope names an unknown department.
    pub fn list_employees(
        &self,
        scope: Option<DepartmentRef>,
        search: Option<&str>,
    ) -> Result<Vec<EmployeeSummary>> {
        const OP: &str = "list_employees";
        log_op_start!(OP, scope = ?scope);
        let started = Instant::now();
        let result = self.read().and_then(|store| {
            ensure_scope(&store, scope)?;
            let employees = match search.filter(|q| !q.trim().is_empty()) {
                Some(query) => search::search_employees(&store, query, scope),
                None => search::filter_employees(&store, scope),
            };
            queries::employee_summaries(&store, &employees)
        });
        finish(OP, started, result)
    }

    /// Search employees by full name
    ///
    /// Unlike `list_employees`, a blank query returns an empty list.
    ///
    /// # Errors
    /// `DepartmentNotFound` if an assigned scope names an unknown department.
    pub fn search_employees(
        &self,
        query: &str,
        scope: Option<DepartmentRef>,
    ) -> Result<Vec<EmployeeSummary>> {
        const OP: &str = "search_employees";
        log_op_start!(OP, scope = ?scope);
        let started = Instant::now();
        let result = self.read().and_then(|store| {
            ensure_scope(&store, scope)?;
            let found = search::search_employees(&store, query, scope);
            queries::employee_summaries(&store, &found)
        });
        finish(OP, started, result)
    }

    /// # Errors
    /// `EmployeeNotFound` if no employee has this id.
    pub fn get_employee(&self, id: EmployeeId) -> Result<EmployeeSummary> {
        const OP: &str = "get_employee";
        log_op_start!(OP, employee_id = id.get());
        let started = Instant::now();
        let result = self.read().and_then(|store| {
            let employee = store.get_employee(id)?;
            queries::employee_summary(&store, employee)
        });
        finish(OP, started, result)
    }

    /// Create an employee, Unassigned unless a department is given
    ///
    /// # Errors
    /// * `InvalidName` - If the full name is blank (checked first)
    /// * `DepartmentReferenceInvalid` - If the given department doesn't exist
    pub fn create_employee(&self, fields: NewEmployee) -> Result<EmployeeSummary> {
        const OP: &str = "create_employee";
        log_op_start!(
            OP,
            department = %fields.department,
            email = %Sensitive::new(fields.email.as_deref()),
            phone = %Sensitive::new(fields.phone.as_deref())
        );
        let started = Instant::now();
        let result = self.execute(Command::EmployeeCreate { fields }, |store, outcome| {
            match outcome {
                CommandOutcome::EmployeeCreated(id) => {
                    queries::employee_summary(store, store.get_employee(id)?)
                }
                other => Err(unexpected(&other)),
            }
        });
        finish(OP, started, result)
    }

    /// Apply a partial update
    ///
    /// Fields left `None` are unchanged. A department change goes through
    /// the same reference check as `reassign_employee`.
    ///
    /// # Errors
    /// `EmployeeNotFound`, `InvalidName`, or `DepartmentReferenceInvalid`.
    pub fn update_employee(&self, id: EmployeeId, patch: EmployeePatch) -> Result<EmployeeSummary> {
        const OP: &str = "update_employee";
        log_op_start!(OP, employee_id = id.get(), empty_patch = patch.is_empty());
        let started = Instant::now();
        let result = self.execute(
            Command::EmployeeUpdate {
                employee_id: id,
                patch,
            },
            |store, _| queries::employee_summary(store, store.get_employee(id)?),
        );
        finish(OP, started, result)
    }

    /// # Errors
    /// `EmployeeNotFound` if no employee has this id.
    pub fn delete_employee(&self, id: EmployeeId) -> Result<()> {
        const OP: &str = "delete_employee";
        log_op_start!(OP, employee_id = id.get());
        let started = Instant::now();
        let result = self.execute(Command::EmployeeDelete { employee_id: id }, |_, _| Ok(()));
        finish(OP, started, result)
    }

    /// Move an employee to a department or to Unassigned
    ///
    /// # Errors
    /// * `EmployeeNotFound` - If the employee doesn't exist (takes precedence)
    /// * `DepartmentReferenceInvalid` - If the target department doesn't exist
    pub fn reassign_employee(
        &self,
        id: EmployeeId,
        department: DepartmentRef,
    ) -> Result<EmployeeSummary> {
        const OP: &str = "reassign_employee";
        log_op_start!(OP, employee_id = id.get(), department = %department);
        let started = Instant::now();
        let result = self.execute(
            Command::EmployeeReassign {
                employee_id: id,
                department,
            },
            |store, _| queries::employee_summary(store, store.get_employee(id)?),
        );
        finish(OP, started, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_rejects_dangling() {
        let mut store = Store::new();
        store.insert_employee(crate::model::Employee::from_new(
            EmployeeId::new(1),
            NewEmployee::new("John Doe").with_department(DepartmentId::new(2)),
        ));

        assert!(matches!(
            Directory::from_store(store),
            Err(DirectoryError::DanglingDepartmentReference { .. })
        ));
    }

    #[test]
    fn test_failed_mutation_publishes_nothing() {
        let directory = Directory::with_sample_data();
        let before = directory.list_department_summaries().unwrap();

        let result = directory.reassign_employee(EmployeeId::new(1), DepartmentId::new(99).into());

        assert!(result.is_err());
        assert_eq!(directory.list_department_summaries().unwrap(), before);
    }

    #[test]
    fn test_failed_create_does_not_burn_id() {
        let directory = Directory::new();
        assert!(directory.create_department("  ").is_err());

        let created = directory.create_department("Finance").unwrap();
        assert_eq!(created.id, DepartmentId::new(1));
    }

    #[test]
    fn test_poisoned_lock_is_internal_error() {
        let directory = std::sync::Arc::new(Directory::new());
        let clone = std::sync::Arc::clone(&directory);
        let _ = std::thread::spawn(move || {
            let _guard = clone.state.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err = directory.list_department_summaries().unwrap_err();
        assert!(matches!(err, DirectoryError::Internal { .. }));
    }
}
