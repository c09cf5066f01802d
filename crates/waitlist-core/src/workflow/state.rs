//! States, events, and effects of the submission workflow.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::validation::{ValidationError, ValidationResult};

/// Where the form currently is in the submission lifecycle.
///
/// Exactly one state is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubmissionState {
    /// Ready for a new attempt.
    #[default]
    Idle,
    /// The current input is being checked by the Validation Engine.
    Validating,
    /// The remote call is in flight; the submit trigger is disabled.
    Submitting,
    /// The last attempt was accepted.
    Succeeded,
    /// The last attempt's remote call failed.
    Failed,
}

impl SubmissionState {
    /// Returns `true` if a new `SubmitRequested` would be accepted.
    pub fn accepts_submit(self) -> bool {
        matches!(
            self,
            SubmissionState::Idle | SubmissionState::Succeeded | SubmissionState::Failed
        )
    }

    pub fn is_busy(self) -> bool {
        matches!(self, SubmissionState::Validating | SubmissionState::Submitting)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The visitor pressed the submit button (or Enter).
    SubmitRequested,
    /// The Validation Engine finished checking the current input.
    ValidationCompleted(ValidationResult),
    /// The remote call resolved successfully.
    RemoteSucceeded,
    /// The remote call resolved with a failure.
    RemoteFailed,
}

impl FormEvent {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            FormEvent::SubmitRequested => "submit-requested",
            FormEvent::ValidationCompleted(_) => "validation-completed",
            FormEvent::RemoteSucceeded => "remote-succeeded",
            FormEvent::RemoteFailed => "remote-failed",
        }
    }
}

/// Work the driver must perform after a transition, in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hide the form message and any field error.
    ClearMessages,
    /// Show the validation reason next to the email field.
    ShowFieldError(ValidationError),
    /// Disable (`true`) or re-enable (`false`) the submit trigger.
    SetBusy(bool),
    /// Issue the remote submission for the current input.
    StartRemoteCall,
    /// Show the success message.
    ShowSuccess,
    /// Show the failure message with the contact fallback.
    ShowFailure,
    /// Fire the celebratory effects.
    Celebrate,
    /// Clear the email field.
    ClearInput,
}

/// A rejected event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// A submit was requested while an attempt is already in progress.
    #[error("a submission is already in progress ({state})")]
    Busy { state: SubmissionState },

    /// The event has no transition from the current state.
    #[error("event {event} is not valid in state {state}")]
    Unexpected {
        state: SubmissionState,
        event: &'static str,
    },
}
