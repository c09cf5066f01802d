//! The Validation Engine: decides whether a candidate email is acceptable.
//!
//! # Rules
//!
//! Rules are applied in order and the first match wins:
//!
//! 1. Trim whitespace.  Empty → [`ValidationError::Required`].
//! 2. Match the `local@domain.tld` shape (non-whitespace local part, a single
//!    `@`, non-whitespace domain containing at least one literal dot).
//!    Failing → [`ValidationError::Malformed`].
//! 3. If the domain exactly matches a [`TypoTable`] key →
//!    [`ValidationError::LikelyTypo`] carrying the corrected full address.
//! 4. Otherwise → [`ValidationResult::Valid`].
//!
//! Validation performs no I/O and has no side effects; calling it repeatedly
//! with the same input always yields the same result.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::email::EmailCandidate;
use super::typo::TypoTable;

/// `local@domain.tld` where no part contains whitespace or a second `@`.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email shape regex")
});

/// Why a candidate was rejected.
///
/// The `Display` text is the message shown next to the email field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum ValidationError {
    /// Nothing (or only whitespace) was entered.
    #[error("Email is required")]
    Required,

    /// The text does not look like `local@domain.tld`.
    #[error("Please enter a valid email address")]
    Malformed,

    /// The domain is a known misspelling.  `suggestion` is the full corrected
    /// address, e.g. `user@gmail.com` for `user@gmai.com`.
    #[error("Did you mean {suggestion}?")]
    LikelyTypo { suggestion: String },
}

impl ValidationError {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Required => "required",
            ValidationError::Malformed => "malformed",
            ValidationError::LikelyTypo { .. } => "likely-typo",
        }
    }

    /// The corrected address, for [`ValidationError::LikelyTypo`] only.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ValidationError::LikelyTypo { suggestion } => Some(suggestion),
            _ => None,
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Converts into a `Result`, for callers that want to use `?`.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(e) => Err(e),
        }
    }
}

/// Live styling for the email field while the visitor is typing.
///
/// Hints only look at the shape of the address; the typo table is consulted
/// on blur and on submit, not on every keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldHint {
    /// Field is empty; no styling.
    Neutral,
    Valid,
    Invalid,
}

/// Returns `true` if the trimmed text has the `local@domain.tld` shape.
pub fn is_well_formed(candidate: &str) -> bool {
    EMAIL_SHAPE.is_match(candidate.trim())
}

/// Computes the live field hint for `candidate`.
pub fn field_hint(candidate: &str) -> FieldHint {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        FieldHint::Neutral
    } else if EMAIL_SHAPE.is_match(trimmed) {
        FieldHint::Valid
    } else {
        FieldHint::Invalid
    }
}

/// Validates `candidate` against the built-in typo table.
pub fn validate(candidate: &str) -> ValidationResult {
    validate_with(&TypoTable::builtin(), &EmailCandidate::new(candidate))
}

/// Validates an already-normalised candidate against `table`.
pub fn validate_with(table: &TypoTable, candidate: &EmailCandidate) -> ValidationResult {
    if candidate.is_empty() {
        return ValidationResult::Invalid(ValidationError::Required);
    }

    if !EMAIL_SHAPE.is_match(candidate.as_str()) {
        return ValidationResult::Invalid(ValidationError::Malformed);
    }

    if let Some((local, domain)) = candidate.parts() {
        if let Some(correct) = table.correction_for(domain) {
            return ValidationResult::Invalid(ValidationError::LikelyTypo {
                suggestion: format!("{local}@{correct}"),
            });
        }
    }

    ValidationResult::Valid
}

// ── Tests ─────────────────────────────────────────────────────────────────────
