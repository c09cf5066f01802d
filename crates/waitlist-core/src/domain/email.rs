//! Email candidate values.
//!
//! An [`EmailCandidate`] is the trimmed text a visitor entered into the email
//! field.  It has no identity beyond a single submission attempt and is never
//! persisted.
//!
//! Two constructors exist because the form treats typing and pasting
//! differently:
//!
//! | Source  | Normalisation          |
//! |---------|------------------------|
//! | typed   | trim                   |
//! | pasted  | trim + lowercase       |
//!
//! Pasted text frequently carries stray whitespace and capitalisation from
//! the clipboard, so it is cleaned more aggressively.  Typed text keeps its
//! case so the visitor sees exactly what they typed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A trimmed email address candidate.  Not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailCandidate(String);

impl EmailCandidate {
    /// Creates a candidate from typed input (whitespace trimmed only).
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    /// Creates a candidate from pasted input (trimmed and lowercased).
    pub fn from_paste(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Returns the candidate text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when nothing but whitespace was entered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits the candidate at its first `@` into `(local, domain)`.
    ///
    /// Returns `None` when there is no `@` at all.
    pub fn parts(&self) -> Option<(&str, &str)> {
        self.0.split_once('@')
    }

    /// Consumes the candidate and returns the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for EmailCandidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
