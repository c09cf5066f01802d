//! Common email domain misspellings.
//!
//! The table is small, fixed, and compiled into the binary.  It is consulted
//! only after an address has passed the shape check, and only for an exact
//! match on the whole domain (so `mail.gmai.com` is *not* flagged).

/// `(typo, correction)` pairs.
const DOMAIN_TYPOS: &[(&str, &str)] = &[
    ("gmai.com", "gmail.com"),
    ("gmail.co", "gmail.com"),
    ("gmial.com", "gmail.com"),
    ("yahooo.com", "yahoo.com"),
    ("yaho.com", "yahoo.com"),
    ("hotmial.com", "hotmail.com"),
    ("outlok.com", "outlook.com"),
    ("ymail.co", "ymail.com"),
];

/// Immutable lookup from a mistyped domain to its likely correction.
#[derive(Debug, Clone, Copy)]
pub struct TypoTable {
    entries: &'static [(&'static str, &'static str)],
}

impl TypoTable {
    /// Returns the built-in table.
    pub const fn builtin() -> Self {
        Self {
            entries: DOMAIN_TYPOS,
        }
    }

    /// Returns the corrected domain if `domain` is a known typo.
    ///
    /// The comparison is exact and case-sensitive; callers that want
    /// case-insensitive matching lowercase the candidate first (pasted input
    /// already is).
    pub fn correction_for(&self, domain: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(typo, _)| *typo == domain)
            .map(|(_, correct)| *correct)
    }

    /// Iterates over all `(typo, correction)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypoTable {
    fn default() -> Self {
        Self::builtin()
    }
}
