//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "salesdb_core=debug,salesdb_store=debug,salesdb_cli=debug",
            Profile::Production | Profile::Test => {
                "salesdb_core=info,salesdb_store=info,salesdb_cli=info"
            }
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility with the profile's default filter
///
/// See [`init_with_filter`].
///
/// # Example
///
/// ```
/// use salesdb_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    init_with_filter(profile, profile.default_filter());
}

/// Initialize the logging facility
///
/// Only the first call in a process installs a subscriber; later calls are
/// no-ops. Output goes to stderr so command output on stdout stays
/// machine-readable. `RUST_LOG` overrides `default_filter`.
///
/// # Profiles
///
/// - **Development**: Human-readable lines
/// - **Production**: One JSON object per event
/// - **Test**: The in-memory capture layer (see [`init_test_capture`])
///
/// [`init_test_capture`]: super::test_capture::init_test_capture
pub fn init_with_filter(profile: Profile, default_filter: &str) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter)
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter)
                    .init();
            }
            Profile::Test => {
                super::test_capture::init_test_capture();
            }
        }
    });
}
