//! Shared constants for the Vigil pipeline.

/// Vigil version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable selecting the deployment environment.
pub const ENV_DEPLOY_ENVIRONMENT: &str = "VIGIL_ENV";

/// Environment variable controlling per-subsystem log levels.
pub const ENV_LOG_FILTER: &str = "VIGIL_LOG";

/// Maximum length for free-text fields (bytes).
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 10_000;

/// Maximum length for an email address (RFC 5321 limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Minimum digits in a phone number (ITU E.164 short national numbers).
pub const MIN_PHONE_DIGITS: usize = 7;

/// Maximum digits in a phone number (ITU E.164).
pub const MAX_PHONE_DIGITS: usize = 15;

/// Maximum length for a file name.
pub const MAX_FILE_NAME_LENGTH: usize = 255;

/// Default test coverage minimum (percent).
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 80.0;

/// Default cap on medium-severity findings before the advisory gate trips.
pub const DEFAULT_MEDIUM_CAP: f64 = 10.0;

/// Test suites that must be present for the test-coverage gate.
pub const DEFAULT_REQUIRED_TESTS: [&str; 3] = ["unit", "integration", "security"];
