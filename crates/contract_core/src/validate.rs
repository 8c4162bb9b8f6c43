use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{Field, FormSnapshot};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Reasons a submission is rejected before export. `Display` is the banner text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("❌ Please fill in all required fields (marked with *)")]
    MissingRequired { fields: Vec<Field> },
    #[error("❌ Please enter a valid email address")]
    InvalidEmail,
}

/// Required fields are checked first; the email pattern only runs when all
/// three are present.
pub fn validate_snapshot(snapshot: &FormSnapshot) -> Result<(), ValidationError> {
    let missing: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|field| field.is_required() && snapshot.get(*field).trim().is_empty())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingRequired { fields: missing });
    }

    if !is_valid_email(&snapshot.client_email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// `local@domain.tld` shape check: no whitespace, exactly one `@`, and a dot in
/// the domain part.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}
