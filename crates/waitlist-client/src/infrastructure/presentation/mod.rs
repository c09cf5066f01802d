//! Presentation adapters.
//!
//! - [`console::ConsolePresentation`] renders to a terminal (text or JSON
//!   lines) and is used by the `waitlist` binary.
//! - [`mock::RecordingPresentation`] records every call for assertions.

pub mod console;
pub mod mock;

pub use console::{ConsolePresentation, OutputFormat};
pub use mock::RecordingPresentation;
