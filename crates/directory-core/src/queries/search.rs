//! Name search and scope filtering
//!
//! Matching is case-insensitive substring containment on the trimmed query.
//! A blank query matches nothing. Results keep store iteration order.

use crate::model::{Department, DepartmentRef, Employee};
use crate::ops::Store;

/// Lowercased needle for a query, or `None` when the query is blank
fn needle(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn in_scope(employee: &Employee, scope: Option<DepartmentRef>) -> bool {
    scope.map_or(true, |scope| employee.department == scope)
}

/// List the employees in a scope without any name filter
///
/// `None` means every employee; `Some(Unassigned)` means the Unassigned
/// bucket. An assigned scope naming an unknown department yields nothing;
/// the facade reports that case as not-found before calling here.
pub fn filter_employees(store: &Store, scope: Option<DepartmentRef>) -> Vec<&Employee> {
    store
        .employees
        .values()
        .filter(|e| in_scope(e, scope))
        .collect()
}

/// Search employees by full name within an optional scope
///
/// Only `full_name` is matched. Contact fields never participate.
pub fn search_employees<'a>(
    store: &'a Store,
    query: &str,
    scope: Option<DepartmentRef>,
) -> Vec<&'a Employee> {
    let Some(needle) = needle(query) else {
        return Vec::new();
    };

    store
        .employees
        .values()
        .filter(|e| in_scope(e, scope))
        .filter(|e| e.full_name.to_lowercase().contains(&needle))
        .collect()
}

/// Search departments by name
pub fn search_departments<'a>(store: &'a Store, query: &str) -> Vec<&'a Department> {
    let Some(needle) = needle(query) else {
        return Vec::new();
    };

    store
        .departments
        .values()
        .filter(|d| d.name.to_lowercase().contains(&needle))
        .collect()
}
