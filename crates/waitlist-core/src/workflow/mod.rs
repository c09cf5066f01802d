//! The submission workflow as an explicit finite-state machine.
//!
//! ```text
//!            SubmitRequested
//!   Idle ───────────────────────► Validating
//!    ▲                              │     │
//!    │   ValidationCompleted(Invalid)│     │ ValidationCompleted(Valid)
//!    └──────────────────────────────┘     ▼
//!                                     Submitting
//!                          RemoteSucceeded │ RemoteFailed
//!                            ┌─────────────┴────────────┐
//!                            ▼                          ▼
//!                        Succeeded                    Failed
//!                            │     SubmitRequested      │
//!                            └──────► Validating ◄──────┘
//! ```
//!
//! [`SubmissionMachine::dispatch`] is the single entry point.  It returns the
//! list of [`Effect`]s the caller must perform, in order.  The machine itself
//! never touches the UI or the network, which keeps every transition testable
//! without a runtime.

pub mod machine;
pub mod state;

pub use machine::SubmissionMachine;
pub use state::{Effect, FormEvent, SubmissionState, TransitionError};
