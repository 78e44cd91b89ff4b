//! Relationship rules between employees and departments
//!
//! `invariants` holds the enforcer operations (assignment, cascade, counts)
//! and the finders that detect broken references. `validation` holds input
//! normalization and the whole-store reference check run after every command.

pub mod invariants;
pub mod validation;

pub use invariants::{
    assign_employee, cascade_on_department_delete, compute_employee_count, count_unassigned,
    find_dangling_references,
};
pub use validation::validate_references;
