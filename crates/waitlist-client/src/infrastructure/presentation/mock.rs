//! Recording presentation for tests.
//!
//! Every call on the [`Presentation`] port is pushed into a `Mutex<Vec<_>>`
//! as a [`UiEvent`], so assertions can inspect exactly what the visitor
//! would have seen and in what order.
//!
//! ```ignore
//! let presentation = Arc::new(RecordingPresentation::new());
//! let controller = SubmissionController::new(presentation.clone(), submitter, messages);
//! controller.set_input("user@example.com");
//! controller.submit().await;
//! assert_eq!(presentation.celebrations(), 1);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use waitlist_core::{FieldHint, SubmissionState};

use crate::application::submit_signup::{MessageKind, Presentation};
use crate::infrastructure::ui_bridge::UiEvent;

/// A presentation that records all calls and renders nothing.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    calls: Mutex<Vec<UiEvent>>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<UiEvent> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Every state passed to `state_changed`.
    pub fn states(&self) -> Vec<SubmissionState> {
        self.filter(|e| match e {
            UiEvent::State { state } => Some(*state),
            _ => None,
        })
    }

    /// Every `(kind, text)` passed to `show_message`.
    pub fn messages(&self) -> Vec<(MessageKind, String)> {
        self.filter(|e| match e {
            UiEvent::Message { kind, text } => Some((*kind, text.clone())),
            _ => None,
        })
    }

    pub fn field_errors(&self) -> Vec<String> {
        self.filter(|e| match e {
            UiEvent::FieldError { text } => Some(text.clone()),
            _ => None,
        })
    }

    pub fn hints(&self) -> Vec<FieldHint> {
        self.filter(|e| match e {
            UiEvent::FieldHint { hint } => Some(*hint),
            _ => None,
        })
    }

    /// Every value passed to `set_busy`.
    pub fn busy_changes(&self) -> Vec<bool> {
        self.filter(|e| match e {
            UiEvent::Busy { busy } => Some(*busy),
            _ => None,
        })
    }

    pub fn celebrations(&self) -> usize {
        self.lock()
            .iter()
            .filter(|e| matches!(e, UiEvent::Celebrate))
            .count()
    }

    fn filter<T>(&self, f: impl Fn(&UiEvent) -> Option<T>) -> Vec<T> {
        self.lock().iter().filter_map(f).collect()
    }

    fn record(&self, event: UiEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<UiEvent>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Presentation for RecordingPresentation {
    fn show_message(&self, kind: MessageKind, text: &str) {
        self.record(UiEvent::Message {
            kind,
            text: text.to_string(),
        });
    }

    fn clear_messages(&self) {
        self.record(UiEvent::ClearMessages);
    }

    fn set_busy(&self, busy: bool) {
        self.record(UiEvent::Busy { busy });
    }

    fn trigger_celebration(&self) {
        self.record(UiEvent::Celebrate);
    }

    fn show_field_error(&self, text: &str) {
        self.record(UiEvent::FieldError {
            text: text.to_string(),
        });
    }

    fn set_field_hint(&self, hint: FieldHint) {
        self.record(UiEvent::FieldHint { hint });
    }

    fn clear_input(&self) {
        self.record(UiEvent::ClearInput);
    }

    fn state_changed(&self, state: SubmissionState) {
        self.record(UiEvent::State { state });
    }
}
