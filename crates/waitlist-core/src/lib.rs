//! # waitlist-core
//!
//! Shared library for the waitlist signup form containing the email
//! validation rules, the domain typo table, and the submission state machine.
//!
//! This crate has zero dependencies on async runtimes, terminals, browsers,
//! or network sockets.  Everything here is synchronous and deterministic.
//!
//! # Architecture overview
//!
//! A visitor types an email address into the "join the waitlist" form and
//! presses the submit button.  Before anything leaves the page the address is
//! checked locally; if it passes, a (simulated) remote call registers it.
//!
//! - **`domain`** – Pure rules about email candidates: normalisation,
//!   validation, the typo-correction table, and the bounded key-sequence
//!   buffer used for the keyboard easter egg.
//!
//! - **`workflow`** – The submission finite-state machine.  It decides which
//!   transitions are legal and emits [`workflow::Effect`]s describing what the
//!   outer layers must do (show a message, start the remote call, ...).  It
//!   never performs those effects itself.

pub mod domain;
pub mod workflow;

pub use domain::email::EmailCandidate;
pub use domain::key_sequence::{Key, KeySequenceBuffer, KONAMI_SEQUENCE};
pub use domain::typo::TypoTable;
pub use domain::validation::{
    field_hint, is_well_formed, validate, FieldHint, ValidationError, ValidationResult,
};
pub use workflow::{Effect, FormEvent, SubmissionMachine, SubmissionState, TransitionError};
