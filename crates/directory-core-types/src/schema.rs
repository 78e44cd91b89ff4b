//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across the core and server.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_DEPARTMENT_ID: &str = "department_id";
pub const FIELD_EMPLOYEE_ID: &str = "employee_id";

// Collection sizes
pub const FIELD_MOVED_COUNT: &str = "moved_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
/// Rendered `ExError`, including operation and entity context
pub const FIELD_ERROR: &str = "error";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
