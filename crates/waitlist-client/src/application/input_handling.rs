//! InputHandler: turns raw form input into field updates and feedback.
//!
//! | Input        | Behaviour                                                     |
//! |--------------|---------------------------------------------------------------|
//! | typing       | store value, clear messages, live valid/invalid hint          |
//! | paste        | trim + lowercase, then as typing                              |
//! | blur         | if non-empty, run full validation and show the field error    |
//! | `Escape`     | clear messages                                                |
//! | `Enter`      | request a submit                                              |
//! | secret code  | extra celebration and a success message                       |
//!
//! Every key press is pushed into a [`KeySequenceBuffer`] owned by the
//! handler; nothing about the key history is global.

use std::sync::Arc;

use tracing::{debug, info};

use waitlist_core::domain::validation::validate_with;
use waitlist_core::{
    field_hint, EmailCandidate, Key, KeySequenceBuffer, TypoTable, ValidationError,
    ValidationResult,
};

use super::submit_signup::{MessageKind, Presentation, SubmissionController, SubmitOutcome};

/// Message shown when the secret key sequence is entered.
pub const SECRET_CODE_MESSAGE: &str = "🎉 Secret code activated! Extra celebration for you!";

/// What a key press led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Nothing visible happened.
    None,
    /// `Escape` dismissed the messages.
    MessagesCleared,
    /// `Enter` asked for a submit; the caller should run
    /// [`InputHandler::submit`].
    SubmitRequested,
    /// The secret sequence was completed.
    SecretCode,
}

/// Form input handling on top of a [`SubmissionController`].
pub struct InputHandler {
    controller: Arc<SubmissionController>,
    keys: KeySequenceBuffer,
    typos: TypoTable,
}

impl InputHandler {
    /// Creates a handler watching for the Konami sequence.
    pub fn new(controller: Arc<SubmissionController>) -> Self {
        Self::with_sequence(controller, KeySequenceBuffer::konami())
    }

    /// Creates a handler watching for a custom key sequence.
    pub fn with_sequence(controller: Arc<SubmissionController>, keys: KeySequenceBuffer) -> Self {
        Self {
            controller,
            keys,
            typos: TypoTable::builtin(),
        }
    }

    pub fn controller(&self) -> &Arc<SubmissionController> {
        &self.controller
    }

    fn presentation(&self) -> &Arc<dyn Presentation> {
        self.controller.presentation()
    }

    /// The visitor typed: `text` is the full new field value.
    pub fn on_input(&self, text: &str) {
        self.controller.set_input(text);
        self.presentation().clear_messages();
        self.presentation().set_field_hint(field_hint(text));
    }

    /// The visitor pasted: the field value becomes the normalised `text`.
    pub fn on_paste(&self, text: &str) {
        let cleaned = EmailCandidate::from_paste(text);
        debug!(email = %cleaned, "normalised pasted input");
        self.on_input(cleaned.as_str());
    }

    /// The field lost focus.
    ///
    /// Returns the validation error shown, if any.  An empty field is left
    /// alone so that tabbing through the page does not nag.
    pub fn on_blur(&self) -> Option<ValidationError> {
        let candidate = EmailCandidate::new(&self.controller.input());
        if candidate.is_empty() {
            return None;
        }
        match validate_with(&self.typos, &candidate) {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(reason) => {
                self.presentation().show_field_error(&reason.to_string());
                Some(reason)
            }
        }
    }

    /// A key was pressed anywhere on the page.
    pub fn on_key(&mut self, key: Key) -> KeyAction {
        let matched = self.keys.push(key);
        if matched {
            info!("secret key sequence entered");
            self.keys.reset();
            self.presentation().trigger_celebration();
            self.presentation()
                .show_message(MessageKind::Success, SECRET_CODE_MESSAGE);
            return KeyAction::SecretCode;
        }

        match key {
            Key::Escape => {
                self.presentation().clear_messages();
                KeyAction::MessagesCleared
            }
            Key::Enter => KeyAction::SubmitRequested,
            _ => KeyAction::None,
        }
    }

    /// Submits the current field value.
    pub async fn submit(&self) -> SubmitOutcome {
        self.controller.submit().await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::presentation::mock::RecordingPresentation;
    use crate::infrastructure::ui_bridge::UiEvent;
    use crate::infrastructure::remote::mock::ScriptedSubmitter;
    use waitlist_core::{FieldHint, KONAMI_SEQUENCE};

    use crate::application::submit_signup::{FeedbackMessages, SignupSubmitter};

    fn make_handler() -> (InputHandler, Arc<RecordingPresentation>) {
        let presentation = Arc::new(RecordingPresentation::new());
        let controller = Arc::new(SubmissionController::new(
            Arc::clone(&presentation) as Arc<dyn Presentation>,
            Arc::new(ScriptedSubmitter::always_ok()) as Arc<dyn SignupSubmitter>,
            FeedbackMessages::default(),
        ));
        (InputHandler::new(controller), presentation)
    }

    // ── Typing and paste ──────────────────────────────────────────────────────

    #[test]
    fn test_typing_updates_value_and_hint() {
        // Arrange
        let (handler, presentation) = make_handler();

        // Act
        handler.on_input("user@example");
        handler.on_input("user@example.com");

        // Assert
        assert_eq!(handler.controller().input(), "user@example.com");
        assert_eq!(
            presentation.hints(),
            vec![FieldHint::Invalid, FieldHint::Valid]
        );
    }

    #[test]
    fn test_typing_clears_messages() {
        let (handler, presentation) = make_handler();
        handler.on_input("u");
        assert!(presentation.calls().contains(&UiEvent::ClearMessages));
    }

    #[test]
    fn test_empty_input_is_neutral() {
        let (handler, presentation) = make_handler();
        handler.on_input("   ");
        assert_eq!(presentation.hints(), vec![FieldHint::Neutral]);
    }

    #[test]
    fn test_paste_is_trimmed_and_lowercased() {
        let (handler, presentation) = make_handler();

        handler.on_paste("  User@Example.COM \n");

        assert_eq!(handler.controller().input(), "user@example.com");
        assert_eq!(presentation.hints(), vec![FieldHint::Valid]);
    }

    // ── Blur ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_blur_on_empty_field_shows_nothing() {
        let (handler, presentation) = make_handler();
        assert_eq!(handler.on_blur(), None);
        assert!(presentation.field_errors().is_empty());
    }

    #[test]
    fn test_blur_shows_typo_suggestion() {
        let (handler, presentation) = make_handler();
        handler.on_input("someone@hotmial.com");

        let shown = handler.on_blur();

        assert_eq!(
            shown,
            Some(ValidationError::LikelyTypo {
                suggestion: "someone@hotmail.com".into()
            })
        );
        assert_eq!(
            presentation.field_errors(),
            vec!["Did you mean someone@hotmail.com?".to_string()]
        );
    }

    #[test]
    fn test_blur_does_not_change_submission_state() {
        let (handler, _) = make_handler();
        handler.on_input("bad");
        handler.on_blur();
        assert_eq!(
            handler.controller().state(),
            waitlist_core::SubmissionState::Idle
        );
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_escape_clears_messages() {
        let (mut handler, presentation) = make_handler();

        let action = handler.on_key(Key::Escape);

        assert_eq!(action, KeyAction::MessagesCleared);
        assert_eq!(presentation.calls(), vec![UiEvent::ClearMessages]);
    }

    #[test]
    fn test_enter_requests_submit() {
        let (mut handler, _) = make_handler();
        assert_eq!(handler.on_key(Key::Enter), KeyAction::SubmitRequested);
    }

    #[test]
    fn test_konami_sequence_triggers_extra_celebration() {
        let (mut handler, presentation) = make_handler();
        handler.on_key(Key::char('q'));

        let actions: Vec<KeyAction> = KONAMI_SEQUENCE.iter().map(|k| handler.on_key(*k)).collect();

        assert_eq!(actions.last(), Some(&KeyAction::SecretCode));
        assert_eq!(presentation.celebrations(), 1);
        assert_eq!(
            presentation.messages(),
            vec![(MessageKind::Success, SECRET_CODE_MESSAGE.to_string())]
        );
    }

    #[test]
    fn test_konami_buffer_resets_after_match() {
        let (mut handler, presentation) = make_handler();
        for k in KONAMI_SEQUENCE {
            handler.on_key(k);
        }

        // The trailing "b a" of the first run must not count toward a second.
        for k in &KONAMI_SEQUENCE[..8] {
            handler.on_key(*k);
        }

        assert_eq!(presentation.celebrations(), 1);
    }

    #[tokio::test]
    async fn test_submit_uses_current_field_value() {
        let (handler, _) = make_handler();
        handler.on_paste(" Someone@Example.com ");

        let outcome = handler.submit().await;

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(handler.controller().input(), "");
    }
}
