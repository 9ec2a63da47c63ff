//! Input validation errors.
//!
//! Messages deliberately never echo the rejected input: validators run on
//! untrusted, possibly sensitive data, and rejection reasons end up in logs.

use super::error_code::{self, VigilErrorCode};

/// Errors raised when untrusted input fails validation.
///
/// Callers must reject the request on any of these; never proceed with the
/// unsanitized value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Input is empty")]
    Empty,

    #[error("Input exceeds maximum length ({length} > {max})")]
    TooLong { length: usize, max: usize },

    #[error("Input contains markup or control sequences")]
    MarkupRejected,

    #[error("Invalid email address format")]
    InvalidEmail,

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error("File name contains a path traversal sequence")]
    PathTraversal,

    #[error("File name is an absolute path")]
    AbsolutePath,

    #[error("Input contains a NUL byte")]
    NulByte,

    #[error("URL could not be parsed")]
    MalformedUrl,

    #[error("URL scheme '{scheme}' is not allowed")]
    SchemeDenied { scheme: String },

    #[error("URL embeds credentials")]
    CredentialsEmbedded,

    #[error("URL host resolves to a loopback, link-local, or private address")]
    PrivateAddress,

    #[error("URL host is not on the outbound allowlist")]
    HostNotAllowlisted,
}

impl VigilErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedUrl
            | Self::SchemeDenied { .. }
            | Self::CredentialsEmbedded
            | Self::PrivateAddress
            | Self::HostNotAllowlisted => error_code::UNSAFE_URL,
            _ => error_code::VALIDATION_ERROR,
        }
    }
}
