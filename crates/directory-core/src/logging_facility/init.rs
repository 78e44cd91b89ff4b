//! Logging initialization

use std::str::FromStr;
use std::sync::Once;

use thiserror::Error;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Human-readable output, `directory=debug`
    #[default]
    Development,
    /// JSON lines, `directory=info`
    Production,
    /// Bare registry; tests attach their own capture layer
    Test,
}

impl Profile {
    fn default_directives(self) -> &'static str {
        match self {
            Profile::Development => "directory=debug,tower_http=debug",
            Profile::Production => "directory=info,tower_http=info",
            Profile::Test => "off",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log profile '{0}' (expected development, production or test)")]
pub struct ParseProfileError(String);

impl FromStr for Profile {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(ParseProfileError(other.to_string())),
        }
    }
}

static INIT_ONCE: Once = Once::new();

fn env_filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(profile.default_directives()))
}

/// Initialize the logging facility
///
/// Call once at process startup. Later calls are no-ops, and so is a call
/// made after some other global subscriber was installed. `RUST_LOG`
/// overrides the profile's default filter.
///
/// # Example
///
/// ```
/// use directory_core::logging_facility::{init, Profile};
///
/// init(Profile::Test);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(env_filter(profile))
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter(profile))
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        // a subscriber installed elsewhere (e.g. a test capture) wins
        drop(installed);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Production);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("production".parse::<Profile>().unwrap(), Profile::Production);
        assert_eq!(" Dev ".parse::<Profile>().unwrap(), Profile::Development);
        assert_eq!("TEST".parse::<Profile>().unwrap(), Profile::Test);
    }

    #[test]
    fn test_profile_from_str_rejects_unknown() {
        let err = "verbose".parse::<Profile>().unwrap_err();
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn test_default_profile() {
        assert_eq!(Profile::default(), Profile::Development);
    }
}
