//! Data types shared with a UI front-end.
//!
//! A browser or desktop shell talks to the form logic through two shapes:
//!
//! - [`UiEvent`]: one entry per call on the presentation port, serialised
//!   as a tagged JSON object so a script can apply it to the page:
//!
//!   ```json
//!   { "type": "message", "kind": "success", "text": "..." }
//!   { "type": "busy", "busy": true }
//!   { "type": "state", "state": "Submitting" }
//!   ```
//!
//! - [`FormStatusDto`] wrapped in [`CommandResult`]: a point-in-time
//!   snapshot returned by a status query.
//!
//! # `CommandResult<T>`
//!
//! All queries return the same envelope:
//! ```json
//! { "success": true,  "data": {...}, "error": null  }
//! { "success": false, "data": null,  "error": "..."  }
//! ```

use serde::{Deserialize, Serialize};

use waitlist_core::{FieldHint, SubmissionState};

use crate::application::submit_signup::{FormSnapshot, MessageKind};

/// A single presentation-port call, as seen by a UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    Message { kind: MessageKind, text: String },
    ClearMessages,
    Busy { busy: bool },
    Celebrate,
    FieldError { text: String },
    FieldHint { hint: FieldHint },
    ClearInput,
    State { state: SubmissionState },
}

/// Status snapshot returned to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStatusDto {
    /// Lowercase state name (e.g. `"submitting"`).
    pub state: String,
    pub input: String,
    /// `true` while the submit trigger must stay disabled.
    pub busy: bool,
}

impl From<FormSnapshot> for FormStatusDto {
    fn from(snapshot: FormSnapshot) -> Self {
        Self {
            state: snapshot.state.to_string(),
            input: snapshot.input,
            busy: snapshot.busy,
        }
    }
}

/// Unified response wrapper for UI queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_event_serialises_with_type_tag() {
        let event = UiEvent::Message {
            kind: MessageKind::Error,
            text: "boom".into(),
        };

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "type": "message", "kind": "error", "text": "boom" })
        );
    }

    #[test]
    fn test_field_hint_event_uses_lowercase_hint() {
        let json = serde_json::to_string(&UiEvent::FieldHint {
            hint: FieldHint::Invalid,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"field_hint","hint":"invalid"}"#);
    }

    #[test]
    fn test_unit_events_round_trip() {
        for event in [UiEvent::ClearMessages, UiEvent::Celebrate, UiEvent::ClearInput] {
            let json = serde_json::to_string(&event).unwrap();
            let back: UiEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event);
        }
    }

    #[test]
    fn test_status_dto_from_snapshot() {
        let dto = FormStatusDto::from(FormSnapshot {
            state: SubmissionState::Submitting,
            input: "a@b.co".into(),
            busy: true,
        });
        assert_eq!(dto.state, "submitting");
        assert!(dto.busy);
    }

    #[test]
    fn test_command_result_envelopes() {
        let ok = CommandResult::ok(1u8);
        assert!(ok.success);
        assert_eq!(ok.data, Some(1));
        assert!(ok.error.is_none());

        let err: CommandResult<u8> = CommandResult::err("nope");
        assert!(!err.success);
        assert_eq!(err.error.as_deref(), Some("nope"));
    }
}
