//! waitlist-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does waitlist-client do?
//!
//! It turns the pure rules from `waitlist-core` into a working signup form:
//!
//! 1. The **input handler** receives typing, pasting, blur, and key events,
//!    keeps the field value up to date, and drives live feedback.
//! 2. The **submission controller** runs one attempt at a time: validate,
//!    call the remote submission port, then report the outcome through the
//!    presentation port.
//! 3. **Infrastructure adapters** implement those ports: a console renderer,
//!    a simulated remote with a fixed delay and a configurable success rate,
//!    recording doubles for tests, TOML configuration, and UI-bridge DTOs.

/// Application layer: the submission controller and input handling.
pub mod application;

/// Infrastructure layer: presentation and remote adapters, config, UI bridge.
pub mod infrastructure;
