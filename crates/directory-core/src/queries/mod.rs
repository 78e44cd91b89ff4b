//! Read-only queries over the store
//!
//! Nothing here mutates. Results follow store iteration order (ascending id).

pub mod search;
pub mod summaries;

pub use search::{filter_employees, search_departments, search_employees};
pub use summaries::{
    department_summaries, department_summary, employee_summaries, employee_summary,
    summarize_departments,
};
