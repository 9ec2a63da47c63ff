//! VigilErrorCode trait for stable machine-readable error codes.

/// Trait giving every Vigil error a structured code string, for report
/// documents and API consumers that must not parse display messages.
pub trait VigilErrorCode {
    /// Returns the stable error code string (e.g., "VALIDATION_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn code_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const UNSAFE_URL: &str = "UNSAFE_URL";
pub const SOURCE_UNAVAILABLE: &str = "SOURCE_UNAVAILABLE";
pub const SOURCE_PARSE: &str = "SOURCE_PARSE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const GATE_FAILED: &str = "GATE_FAILED";
pub const EVALUATION_ERROR: &str = "EVALUATION_ERROR";
pub const BASELINE_ERROR: &str = "BASELINE_ERROR";
