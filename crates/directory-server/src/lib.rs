//! HTTP surface and process configuration for the directory
//!
//! The binary in `main.rs` wires these together; tests drive
//! `http::build_router` directly.

pub mod config;
pub mod http;
