//! Structured logging facility for the directory
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//!   emitting the canonical field names from `directory_core_types::schema`
//! - Test capture mode for assertions on emitted events
//!
//! # Usage
//!
//! ```rust
//! use directory_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, ParseProfileError, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
