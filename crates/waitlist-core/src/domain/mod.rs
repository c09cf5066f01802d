//! Domain entities for the waitlist form.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies.  Code in outer layers (application, infrastructure, the
//! terminal front-end) depends on the domain, but the domain never depends on
//! them, so every rule here can be unit-tested in isolation.

/// Candidate email addresses and their normalisation.
pub mod email;

/// Bounded ring buffer of recent key presses.
pub mod key_sequence;

/// Fixed table of common domain misspellings.
pub mod typo;

/// The Validation Engine.
///
/// See [`validation::validate`] for the main entry point.
pub mod validation;
