//! Terminal rendering of the form.
//!
//! Two output formats:
//!
//! | Format | Output                                                   |
//! |--------|----------------------------------------------------------|
//! | `Text` | human-readable lines for the visible parts of the form   |
//! | `Json` | one [`UiEvent`] per line, for piping into another tool   |
//!
//! In text mode, purely visual calls (field hints, state changes, clearing)
//! are logged at `debug` level instead of printed.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use waitlist_core::{FieldHint, SubmissionState};

use crate::application::submit_signup::{MessageKind, Presentation};
use crate::infrastructure::ui_bridge::UiEvent;

/// How [`ConsolePresentation`] writes events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Presentation adapter that writes to a terminal or any `Write` sink.
pub struct ConsolePresentation {
    out: Mutex<Box<dyn Write + Send>>,
    format: OutputFormat,
}

impl ConsolePresentation {
    /// Writes to standard output.
    pub fn stdout(format: OutputFormat) -> Self {
        Self::with_writer(Box::new(io::stdout()), format)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, format: OutputFormat) -> Self {
        Self {
            out: Mutex::new(out),
            format,
        }
    }

    fn emit(&self, event: UiEvent) {
        let line = match self.format {
            OutputFormat::Json => match serde_json::to_string(&event) {
                Ok(json) => Some(json),
                Err(e) => {
                    warn!("failed to serialise ui event: {e}");
                    None
                }
            },
            OutputFormat::Text => render_text(&event),
        };

        let Some(line) = line else {
            debug!(?event, "ui event");
            return;
        };

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!("failed to write to console: {e}");
        }
    }
}

/// Returns the text line for `event`, or `None` if it has no visible text.
fn render_text(event: &UiEvent) -> Option<String> {
    match event {
        UiEvent::Message { text, .. } => Some(text.clone()),
        UiEvent::FieldError { text } => Some(format!("  ↳ {text}")),
        UiEvent::Busy { busy: true } => Some("Joining...".to_string()),
        UiEvent::Celebrate => Some("🎊 ✨ 🎊 ✨ 🎊".to_string()),
        UiEvent::Busy { busy: false }
        | UiEvent::ClearMessages
        | UiEvent::FieldHint { .. }
        | UiEvent::ClearInput
        | UiEvent::State { .. } => None,
    }
}

impl Presentation for ConsolePresentation {
    fn show_message(&self, kind: MessageKind, text: &str) {
        self.emit(UiEvent::Message {
            kind,
            text: text.to_string(),
        });
    }

    fn clear_messages(&self) {
        self.emit(UiEvent::ClearMessages);
    }

    fn set_busy(&self, busy: bool) {
        self.emit(UiEvent::Busy { busy });
    }

    fn trigger_celebration(&self) {
        self.emit(UiEvent::Celebrate);
    }

    fn show_field_error(&self, text: &str) {
        self.emit(UiEvent::FieldError {
            text: text.to_string(),
        });
    }

    fn set_field_hint(&self, hint: FieldHint) {
        self.emit(UiEvent::FieldHint { hint });
    }

    fn clear_input(&self) {
        self.emit(UiEvent::ClearInput);
    }

    fn state_changed(&self, state: SubmissionState) {
        self.emit(UiEvent::State { state });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// `Write` sink that can be inspected after the presentation owns it.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn make(format: OutputFormat) -> (ConsolePresentation, SharedBuf) {
        let buf = SharedBuf::default();
        (ConsolePresentation::with_writer(Box::new(buf.clone()), format), buf)
    }

    #[test]
    fn test_text_mode_prints_messages_and_field_errors() {
        // Arrange
        let (console, buf) = make(OutputFormat::Text);

        // Act
        console.show_field_error("Email is required");
        console.show_message(MessageKind::Success, "Thanks!");

        // Assert
        assert_eq!(buf.text(), "  ↳ Email is required\nThanks!\n");
    }

    #[test]
    fn test_text_mode_hides_visual_only_calls() {
        let (console, buf) = make(OutputFormat::Text);

        console.set_field_hint(FieldHint::Valid);
        console.clear_messages();
        console.clear_input();
        console.set_busy(false);
        console.state_changed(SubmissionState::Idle);

        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_text_mode_shows_busy_label() {
        let (console, buf) = make(OutputFormat::Text);
        console.set_busy(true);
        assert_eq!(buf.text(), "Joining...\n");
    }

    #[test]
    fn test_json_mode_writes_one_event_per_line() {
        let (console, buf) = make(OutputFormat::Json);

        console.set_busy(true);
        console.trigger_celebration();

        let text = buf.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![r#"{"type":"busy","busy":true}"#, r#"{"type":"celebrate"}"#]);
    }
}
