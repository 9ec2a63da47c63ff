//! Input validation — pure functions over untrusted input.
//!
//! Defends the three attack classes every form and API handler is exposed
//! to: injection (markup, path traversal, scheme smuggling), resource
//! exhaustion (oversized input), and request forgery (outbound URLs to
//! internal network targets).
//!
//! Every function either returns the sanitized value or a typed
//! [`ValidationError`](vigil_core::ValidationError); nothing here logs raw
//! input or silently truncates.

pub mod outbound_url;
pub mod rules;
pub mod sanitize;

pub use outbound_url::{validate_outbound_url, UrlPolicy};
pub use rules::{
    sanitized_text, validate_email, validate_file_name, validate_length, validate_phone,
};
pub use sanitize::{contains_markup, sanitize};
