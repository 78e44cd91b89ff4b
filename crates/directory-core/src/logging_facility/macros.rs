//! Canonical logging macros
//!
//! Every directory operation logs through these so the `op`, `event` and
//! `duration_ms` keys stay uniform across crates.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use directory_core::log_op_start;
/// log_op_start!("create_department");
/// log_op_start!("get_department", department_id = 3u64);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use directory_core::log_op_end;
/// log_op_end!("delete_department", duration_ms = 1u64, moved_count = 2usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `ExError`. The rendered error carries the
/// operation name. Internal failures log at `error`; the rest are caller
/// mistakes and log at `warn`.
///
/// # Example
///
/// ```
/// # use directory_core::{log_op_error, errors::DirectoryError};
/// let err = DirectoryError::UnassignedNotDeletable;
/// log_op_error!("delete_department", err, duration_ms = 0u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        $crate::log_op_error!($op, $err, duration_ms = $duration,)
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        let ex_err = ex_err.with_op(($op).to_string());
        match ex_err.kind() {
            $crate::errors::ExErrorKind::Internal => tracing::error!(
                component = module_path!(),
                op = $op,
                event = $crate::core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
                error = %ex_err,
                $($field)*
            ),
            _ => tracing::warn!(
                component = module_path!(),
                op = $op,
                event = $crate::core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
                error = %ex_err,
                $($field)*
            ),
        }
    }};
}
