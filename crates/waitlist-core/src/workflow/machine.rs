//! SubmissionMachine: the transition table of the signup workflow.
//!
//! | From                     | Event                         | To         |
//! |--------------------------|-------------------------------|------------|
//! | Idle / Succeeded / Failed| SubmitRequested               | Validating |
//! | Validating               | ValidationCompleted(Valid)    | Submitting |
//! | Validating               | ValidationCompleted(Invalid)  | Idle       |
//! | Submitting               | RemoteSucceeded               | Succeeded  |
//! | Submitting               | RemoteFailed                  | Failed     |
//!
//! `SubmitRequested` while `Validating` or `Submitting` is rejected with
//! [`TransitionError::Busy`]; every other unlisted pair is rejected with
//! [`TransitionError::Unexpected`].  A rejected event never changes state.

use tracing::debug;

use crate::domain::validation::ValidationResult;

use super::state::{Effect, FormEvent, SubmissionState, TransitionError};

/// The submission state machine.
#[derive(Debug, Clone, Default)]
pub struct SubmissionMachine {
    state: SubmissionState,
    /// Most recent validation outcome for the current attempt.
    last_validation: Option<ValidationResult>,
}

impl SubmissionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn last_validation(&self) -> Option<&ValidationResult> {
        self.last_validation.as_ref()
    }

    /// Applies `event` and returns the effects to perform.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] if `event` is not allowed in the current
    /// state.  The machine is left unchanged in that case.
    pub fn dispatch(&mut self, event: FormEvent) -> Result<Vec<Effect>, TransitionError> {
        let from = self.state;
        let (to, effects) = match (from, event) {
            (s, FormEvent::SubmitRequested) if s.accepts_submit() => {
                self.last_validation = None;
                (SubmissionState::Validating, vec![Effect::ClearMessages])
            }
            (s, FormEvent::SubmitRequested) => {
                return Err(TransitionError::Busy { state: s });
            }

            (SubmissionState::Validating, FormEvent::ValidationCompleted(result)) => {
                let next = match &result {
                    ValidationResult::Valid => (
                        SubmissionState::Submitting,
                        vec![Effect::SetBusy(true), Effect::StartRemoteCall],
                    ),
                    ValidationResult::Invalid(reason) => (
                        SubmissionState::Idle,
                        vec![Effect::ShowFieldError(reason.clone()), Effect::SetBusy(false)],
                    ),
                };
                self.last_validation = Some(result);
                next
            }

            (SubmissionState::Submitting, FormEvent::RemoteSucceeded) => (
                SubmissionState::Succeeded,
                vec![
                    Effect::SetBusy(false),
                    Effect::ShowSuccess,
                    Effect::Celebrate,
                    Effect::ClearInput,
                ],
            ),
            (SubmissionState::Submitting, FormEvent::RemoteFailed) => (
                SubmissionState::Failed,
                vec![Effect::SetBusy(false), Effect::ShowFailure],
            ),

            (state, event) => {
                return Err(TransitionError::Unexpected {
                    state,
                    event: event.name(),
                });
            }
        };

        debug_assert!(
            to != SubmissionState::Submitting
                || matches!(self.last_validation, Some(ValidationResult::Valid)),
            "entered Submitting without a valid validation result"
        );

        debug!(%from, %to, "submission transition");
        self.state = to;
        Ok(effects)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
