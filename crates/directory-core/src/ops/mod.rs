pub mod department_ops;
pub mod employee_ops;
pub mod store;

pub use store::Store;
