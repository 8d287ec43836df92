//! Email address validation and log masking.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{DomainError, ValidationError};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // Pragmatic pattern: one local part, one @, one dotted domain
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$")
        .expect("email regex is valid")
});

/// Validates an email address format
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(DomainError::Validation(ValidationError::InvalidEmail))
    }
}

/// Masks an email for log output, keeping only the first character of the
/// local part and the domain
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = &local[..local
                .char_indices()
                .nth(1)
                .map(|(i, _)| i)
                .unwrap_or(local.len())];
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
