//! Directory Core - in-memory employee/department directory
//!
//! This crate keeps a set of departments and employees consistent:
//! - Every employee belongs to exactly one existing department or to the
//!   Unassigned bucket
//! - Deleting a department moves its members to Unassigned, atomically
//! - Employee counts are always derived from live data
//! - Name search over employees and departments
//!
//! `service::Directory` is the thread-safe facade; `apply::apply` is the
//! functional core it drives.

pub mod apply;
pub mod commands;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod queries;
pub mod rules;
pub mod seed;
pub mod service;

#[doc(hidden)]
pub use directory_core_types as core_types;

// Re-export commonly used types
pub use apply::apply;
pub use commands::{Command, CommandOutcome};
pub use errors::{DirectoryError, ExError, ExErrorKind, Result};
pub use model::{
    Department, DepartmentId, DepartmentRef, DepartmentSummary, Employee, EmployeeId,
    EmployeePatch, EmployeeSummary, NewEmployee, UNASSIGNED_NAME,
};
pub use ops::Store;
pub use service::Directory;
