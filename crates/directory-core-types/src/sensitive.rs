//! Redaction wrapper for employee contact data
//!
//! Addresses, phone numbers and emails are personal data. They may be
//! mentioned in logs only through `Sensitive<T>`, which prints a marker
//! instead of the value.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Wrapper that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use directory_core_types::Sensitive;
///
/// let email = Sensitive::new(Some("jane@example.com".to_string()));
/// assert_eq!(format!("{:?}", email), "***REDACTED***");
/// assert!(email.is_set());
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Sensitive<Option<T>> {
    /// Whether an optional contact field carries a value.
    ///
    /// Logging presence is allowed; logging content is not.
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
