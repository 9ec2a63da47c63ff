//! Field validators: email, phone, file name, length.

use regex::Regex;
use std::sync::OnceLock;

use vigil_core::constants::{
    DEFAULT_MAX_TEXT_LENGTH, MAX_EMAIL_LENGTH, MAX_FILE_NAME_LENGTH, MAX_PHONE_DIGITS,
    MIN_PHONE_DIGITS,
};
use vigil_core::ValidationError;

use super::sanitize::{contains_markup, sanitize};

fn email_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9][A-Za-z0-9.-]*\.[A-Za-z]{2,}$")
            .expect("static email regex is valid")
    })
}

/// Uniform bound check for free-text fields.
pub fn validate_length(text: &str, max: usize) -> Result<(), ValidationError> {
    if text.len() > max {
        return Err(ValidationError::TooLong {
            length: text.len(),
            max,
        });
    }
    Ok(())
}

/// RFC-5322-plausible email check.
///
/// Single `@`, non-empty local and domain parts, no consecutive dots, no
/// leading/trailing dots on either side, and no markup or control
/// sequences anywhere.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::Empty);
    }
    validate_length(email, MAX_EMAIL_LENGTH)?;
    if contains_markup(email) {
        return Err(ValidationError::MarkupRejected);
    }
    if email.matches('@').count() != 1 || email.contains("..") {
        return Err(ValidationError::InvalidEmail);
    }
    let (local, domain) = email.split_once('@').expect("exactly one @ verified above");
    if local.starts_with('.')
        || local.ends_with('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
    {
        return Err(ValidationError::InvalidEmail);
    }
    if !email_shape().is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Human-entered phone number check.
///
/// Optional leading `+`, digits with common separators (space, dash, dot,
/// parentheses), and a digit count within E.164 bounds.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(ValidationError::Empty);
    }
    if contains_markup(phone) {
        return Err(ValidationError::MarkupRejected);
    }

    let body = phone.strip_prefix('+').unwrap_or(phone);
    let mut digits = 0usize;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return Err(ValidationError::InvalidPhone),
        }
    }
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// File name check: no traversal, no absolute paths, no NUL bytes.
pub fn validate_file_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Empty);
    }
    validate_length(name, MAX_FILE_NAME_LENGTH)?;
    if name.contains('\u{0}') {
        return Err(ValidationError::NulByte);
    }
    if name == ".." || name.contains("../") || name.contains("..\\") {
        return Err(ValidationError::PathTraversal);
    }
    if name.starts_with('/') || name.starts_with('\\') || has_drive_prefix(name) {
        return Err(ValidationError::AbsolutePath);
    }
    Ok(())
}

fn has_drive_prefix(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), Some(':')) if c.is_ascii_alphabetic()
    )
}

/// Length-check then sanitize, in one call.
///
/// Every free-text form field in the application runs both, in this order:
/// the bound applies to what the user sent, not to what survives
/// sanitization.
pub fn sanitized_text(text: &str, max: Option<usize>) -> Result<String, ValidationError> {
    validate_length(text, max.unwrap_or(DEFAULT_MAX_TEXT_LENGTH))?;
    Ok(sanitize(text))
}
