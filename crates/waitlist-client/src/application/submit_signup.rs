//! SubmissionController: runs one signup attempt at a time.
//!
//! This use case sits at the application layer.  It owns the
//! [`SubmissionMachine`] and the current field value, and delegates all
//! visible output to a [`Presentation`] trait object and the network call to
//! a [`SignupSubmitter`] trait object.  Both are injected at construction
//! time; the infrastructure layer provides real and recording implementations.
//!
//! # One attempt
//!
//! ```text
//! submit()
//!  ├─ dispatch(SubmitRequested)        Idle → Validating      clear messages
//!  ├─ validate(current input)
//!  ├─ dispatch(ValidationCompleted)    Validating → Idle      field error   (stop)
//!  │                                   Validating → Submitting busy on
//!  ├─ submitter.submit(email).await    (state lock released)
//!  └─ dispatch(RemoteSucceeded|Failed) Submitting → Succeeded  message, celebrate, clear input
//!                                      Submitting → Failed     message with contact fallback
//! ```
//!
//! # At most one call in flight
//!
//! The state lock is never held across the `.await` on the remote call.
//! Mutual exclusion comes from the machine instead: while an attempt is
//! `Validating` or `Submitting`, a second `submit()` gets
//! [`TransitionError::Busy`] and returns [`SubmitOutcome::Rejected`] without
//! touching the presentation or the network.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use waitlist_core::domain::validation::validate_with;
use waitlist_core::{
    Effect, EmailCandidate, FieldHint, FormEvent, SubmissionMachine, SubmissionState,
    TransitionError, TypoTable, ValidationError, ValidationResult,
};

/// Error returned by the remote submission port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The request did not reach the backend or the backend refused it.
    #[error("network error: {0}")]
    Network(String),
}

/// Kind of form-level message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

/// Everything the form shows to the visitor.
///
/// Implementations must be cheap and must not block: they are called
/// synchronously from the controller between state transitions.
pub trait Presentation: Send + Sync {
    /// Shows the form-level message.
    fn show_message(&self, kind: MessageKind, text: &str);

    /// Hides the form-level message and the field error.
    fn clear_messages(&self);

    /// Disables (`true`) or re-enables (`false`) the submit trigger and
    /// toggles the busy indicator.
    fn set_busy(&self, busy: bool);

    /// Fires the celebratory effects (confetti, logo shake, ...).
    fn trigger_celebration(&self);

    /// Shows a validation message next to the email field.
    fn show_field_error(&self, text: &str);

    /// Applies live valid/invalid styling to the email field.
    fn set_field_hint(&self, hint: FieldHint);

    /// Empties the email field.
    fn clear_input(&self);

    /// Called after every accepted state transition.
    fn state_changed(&self, _state: SubmissionState) {}
}

/// The remote signup endpoint.
///
/// One call per invocation; no retry, no timeout, no cancellation.
#[async_trait]
pub trait SignupSubmitter: Send + Sync {
    /// Registers `email` on the waitlist.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError`] if the remote call fails.
    async fn submit(&self, email: &EmailCandidate) -> Result<(), SubmissionError>;
}

/// User-facing copy for the two remote outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessages {
    pub success: String,
    /// Address offered as a fallback when submission fails.
    pub contact_email: String,
}

impl FeedbackMessages {
    pub fn failure(&self) -> String {
        format!(
            "❌ Oops! Something went wrong. Please try again or contact us at {}",
            self.contact_email
        )
    }
}

impl Default for FeedbackMessages {
    fn default() -> Self {
        Self {
            success: "🎉 Thank you! You've been added to our waitlist. We'll notify you when we launch!"
                .to_string(),
            contact_email: "hello@example.com".to_string(),
        }
    }
}

/// How a call to [`SubmissionController::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The email was registered.
    Succeeded,
    /// The input failed validation; nothing was sent.
    Invalid(ValidationError),
    /// The remote call failed; the input is preserved for resubmission.
    Failed(SubmissionError),
    /// Another attempt is still in progress.
    Rejected(TransitionError),
}

/// Serialisable view of the form for UI bridges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub state: SubmissionState,
    pub input: String,
    pub busy: bool,
}

struct FormState {
    machine: SubmissionMachine,
    input: String,
}

/// The Submission Controller use case.
pub struct SubmissionController {
    form: Mutex<FormState>,
    presentation: Arc<dyn Presentation>,
    submitter: Arc<dyn SignupSubmitter>,
    messages: FeedbackMessages,
    typos: TypoTable,
}

impl SubmissionController {
    /// Creates a controller in the `Idle` state with an empty field.
    pub fn new(
        presentation: Arc<dyn Presentation>,
        submitter: Arc<dyn SignupSubmitter>,
        messages: FeedbackMessages,
    ) -> Self {
        Self {
            form: Mutex::new(FormState {
                machine: SubmissionMachine::new(),
                input: String::new(),
            }),
            presentation,
            submitter,
            messages,
            typos: TypoTable::builtin(),
        }
    }

    pub fn presentation(&self) -> &Arc<dyn Presentation> {
        &self.presentation
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().machine.state()
    }

    /// Returns the raw field value.
    pub fn input(&self) -> String {
        self.lock().input.clone()
    }

    /// Replaces the raw field value.
    pub fn set_input(&self, text: &str) {
        self.lock().input = text.to_string();
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let form = self.lock();
        let state = form.machine.state();
        FormSnapshot {
            state,
            input: form.input.clone(),
            busy: state == SubmissionState::Submitting,
        }
    }

    /// Runs one attempt against the current field value.
    ///
    /// Never returns an error: every failure mode is reported through the
    /// presentation port and summarised in the returned [`SubmitOutcome`].
    pub async fn submit(&self) -> SubmitOutcome {
        let attempt = Uuid::new_v4();
        self.run_attempt()
            .instrument(info_span!("submit", %attempt))
            .await
    }

    async fn run_attempt(&self) -> SubmitOutcome {
        // Idle/Succeeded/Failed → Validating
        let (candidate, effects) = {
            let mut form = self.lock();
            match form.machine.dispatch(FormEvent::SubmitRequested) {
                Ok(effects) => (EmailCandidate::new(&form.input), effects),
                Err(e) => {
                    warn!("submit ignored: {e}");
                    return SubmitOutcome::Rejected(e);
                }
            }
        };
        self.perform(&effects, SubmissionState::Validating);

        // Validating → Idle | Submitting
        let result = validate_with(&self.typos, &candidate);
        debug!(email = %candidate, valid = result.is_valid(), "validated candidate");
        let (next, effects) = self.advance(FormEvent::ValidationCompleted(result.clone()));
        self.perform(&effects, next);
        if let ValidationResult::Invalid(reason) = result {
            return SubmitOutcome::Invalid(reason);
        }
        if next != SubmissionState::Submitting {
            return SubmitOutcome::Rejected(TransitionError::Unexpected {
                state: next,
                event: "validation-completed",
            });
        }

        // The only suspension point.  No lock is held here.
        let remote = self.submitter.submit(&candidate).await;

        // Submitting → Succeeded | Failed
        let event = match &remote {
            Ok(()) => FormEvent::RemoteSucceeded,
            Err(_) => FormEvent::RemoteFailed,
        };
        let (next, effects) = self.advance(event);
        self.perform(&effects, next);

        match remote {
            Ok(()) => {
                info!(email = %candidate, "signup accepted");
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                warn!(email = %candidate, "signup failed: {e}");
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Dispatches an event that the attempt itself produced.
    ///
    /// These cannot be rejected while this attempt owns the `Validating` or
    /// `Submitting` state; if one is, it is logged and no effects are run.
    fn advance(&self, event: FormEvent) -> (SubmissionState, Vec<Effect>) {
        let mut form = self.lock();
        match form.machine.dispatch(event) {
            Ok(effects) => {
                if effects.contains(&Effect::ClearInput) {
                    form.input.clear();
                }
                (form.machine.state(), effects)
            }
            Err(e) => {
                warn!("internal transition rejected: {e}");
                (form.machine.state(), Vec::new())
            }
        }
    }

    fn perform(&self, effects: &[Effect], state: SubmissionState) {
        if effects.is_empty() {
            return;
        }
        self.presentation.state_changed(state);
        for effect in effects {
            match effect {
                Effect::ClearMessages => self.presentation.clear_messages(),
                Effect::ShowFieldError(reason) => {
                    self.presentation.show_field_error(&reason.to_string())
                }
                Effect::SetBusy(busy) => self.presentation.set_busy(*busy),
                // Issued by run_attempt once the busy indicator is up.
                Effect::StartRemoteCall => {}
                Effect::ShowSuccess => self
                    .presentation
                    .show_message(MessageKind::Success, &self.messages.success),
                Effect::ShowFailure => self
                    .presentation
                    .show_message(MessageKind::Error, &self.messages.failure()),
                Effect::Celebrate => self.presentation.trigger_celebration(),
                Effect::ClearInput => self.presentation.clear_input(),
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
