//! Functional-boundary apply function
//!
//! `apply()` is the single entry point for directory mutations.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: the command either returns a new state that passed
//!   `validate_references`, or an error. The caller's previous state is
//!   untouched either way, because `apply` consumes a copy.
//! - **No panics**: invalid input returns typed errors.
//!
//! ## Example
//!
//! ```
//! use directory_core::{apply::apply, Command, Store};
//!
//! let state = Store::new();
//! let cmd = Command::DepartmentCreate {
//!     name: "Engineering".to_string(),
//! };
//!
//! let (new_state, _outcome) = apply(state, cmd).unwrap();
//! assert_eq!(new_state.list_departments().len(), 1);
//! ```

use crate::commands::{Command, CommandOutcome};
use crate::errors::{DirectoryError, Result};
use crate::model::{DepartmentRef, NewEmployee};
use crate::ops::{department_ops, employee_ops, Store};
use crate::rules::{invariants, validation};

/// Apply a command to a store, returning the new state and what changed
///
/// # Errors
///
/// Returns the first validation, lookup or reference error hit by the
/// command, or `DanglingDepartmentReference` if the resulting state would
/// break the reference invariant.
pub fn apply(mut state: Store, cmd: Command) -> Result<(Store, CommandOutcome)> {
    let outcome = match cmd {
        Command::DepartmentCreate { name } => {
            CommandOutcome::DepartmentCreated(department_ops::create_department(&mut state, &name)?)
        }

        Command::DepartmentRename {
            department_id,
            name,
        } => {
            department_ops::rename_department(&mut state, department_id, &name)?;
            CommandOutcome::DepartmentRenamed(department_id)
        }

        Command::DepartmentDelete { department } => {
            let DepartmentRef::Assigned(department_id) = department else {
                return Err(DirectoryError::UnassignedNotDeletable);
            };
            // cascade fails with DepartmentNotFound before touching anyone
            let moved = invariants::cascade_on_department_delete(&mut state, department_id)?;
            department_ops::remove_department(&mut state, department_id)?;
            CommandOutcome::DepartmentDeleted {
                department_id,
                moved,
            }
        }

        Command::EmployeeCreate { fields } => {
            let target = fields.department;
            let employee_id = employee_ops::create_employee(
                &mut state,
                NewEmployee {
                    department: DepartmentRef::Unassigned,
                    ..fields
                },
            )?;
            invariants::assign_employee(&mut state, employee_id, target)?;
            CommandOutcome::EmployeeCreated(employee_id)
        }

        Command::EmployeeUpdate { employee_id, patch } => {
            employee_ops::update_employee_fields(&mut state, employee_id, &patch)?;
            if let Some(target) = patch.department {
                invariants::assign_employee(&mut state, employee_id, target)?;
            }
            CommandOutcome::EmployeeUpdated(employee_id)
        }

        Command::EmployeeDelete { employee_id } => {
            employee_ops::remove_employee(&mut state, employee_id)?;
            CommandOutcome::EmployeeDeleted(employee_id)
        }

        Command::EmployeeReassign {
            employee_id,
            department,
        } => {
            let previous = invariants::assign_employee(&mut state, employee_id, department)?;
            CommandOutcome::EmployeeReassigned {
                employee_id,
                previous,
            }
        }
    };

    validation::validate_references(&state)?;
    Ok((state, outcome))
}
