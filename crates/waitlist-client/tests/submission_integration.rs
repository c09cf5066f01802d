//! Integration tests for the submission pipeline.
//!
//! These drive `SubmissionController` and `InputHandler` through their public
//! API with the infrastructure doubles and the simulated remote, the same way
//! the `waitlist` binary wires them.

use std::sync::Arc;
use std::time::Duration;

use waitlist_client::application::input_handling::{InputHandler, KeyAction};
use waitlist_client::application::submit_signup::{
    FeedbackMessages, MessageKind, Presentation, SignupSubmitter, SubmissionController,
    SubmissionError, SubmitOutcome,
};
use waitlist_client::infrastructure::presentation::RecordingPresentation;
use waitlist_client::infrastructure::remote::{ScriptedSubmitter, SimulatedSubmitter};
use waitlist_client::infrastructure::ui_bridge::{CommandResult, FormStatusDto};
use waitlist_core::{Key, SubmissionState, TransitionError};

fn wire(
    submitter: Arc<dyn SignupSubmitter>,
) -> (Arc<SubmissionController>, Arc<RecordingPresentation>) {
    let presentation = Arc::new(RecordingPresentation::new());
    let controller = Arc::new(SubmissionController::new(
        Arc::clone(&presentation) as Arc<dyn Presentation>,
        submitter,
        FeedbackMessages::default(),
    ));
    (controller, presentation)
}

// ── At most one call in flight ────────────────────────────────────────────────

#[tokio::test]
async fn test_second_submit_while_submitting_is_rejected() {
    // Arrange: the first call parks inside the submitter
    let submitter = Arc::new(ScriptedSubmitter::always_ok().gated());
    let (controller, presentation) = wire(Arc::clone(&submitter) as Arc<dyn SignupSubmitter>);
    controller.set_input("first@example.com");

    let first = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit().await })
    };
    submitter.wait_for_call().await;
    assert_eq!(controller.state(), SubmissionState::Submitting);
    let calls_before = presentation.calls().len();

    // Act
    let second = controller.submit().await;

    // Assert: rejected without touching the presentation or the network
    assert_eq!(
        second,
        SubmitOutcome::Rejected(TransitionError::Busy {
            state: SubmissionState::Submitting
        })
    );
    assert_eq!(presentation.calls().len(), calls_before);
    assert_eq!(submitter.call_count(), 1);

    submitter.release(1);
    assert_eq!(first.await.unwrap(), SubmitOutcome::Succeeded);
    assert_eq!(submitter.max_in_flight(), 1);
    assert_eq!(controller.state(), SubmissionState::Succeeded);
}

#[tokio::test]
async fn test_snapshot_is_busy_while_submitting() {
    let submitter = Arc::new(ScriptedSubmitter::always_ok().gated());
    let (controller, _) = wire(Arc::clone(&submitter) as Arc<dyn SignupSubmitter>);
    controller.set_input("user@example.com");

    let task = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit().await })
    };
    submitter.wait_for_call().await;

    let status = FormStatusDto::from(controller.snapshot());
    assert_eq!(status.state, "submitting");
    assert!(status.busy);
    assert_eq!(status.input, "user@example.com");

    submitter.release(1);
    task.await.unwrap();

    let status = FormStatusDto::from(controller.snapshot());
    assert_eq!(status.state, "succeeded");
    assert!(!status.busy);
    assert_eq!(status.input, "");
}

#[tokio::test]
async fn test_status_envelope_serialises_to_json() {
    let (controller, _) = wire(Arc::new(ScriptedSubmitter::always_ok()));
    controller.set_input("x");

    let json = serde_json::to_value(CommandResult::ok(FormStatusDto::from(controller.snapshot())))
        .unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["state"], "idle");
    assert_eq!(json["data"]["input"], "x");
    assert!(json["error"].is_null());
}

// ── Outcomes end to end ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_failure_then_retry_then_new_address() {
    let submitter = Arc::new(ScriptedSubmitter::sequence([Err(SubmissionError::Network(
        "timeout".into(),
    ))]));
    let (controller, presentation) = wire(Arc::clone(&submitter) as Arc<dyn SignupSubmitter>);
    controller.set_input("user@example.com");

    assert!(matches!(controller.submit().await, SubmitOutcome::Failed(_)));
    assert_eq!(controller.input(), "user@example.com");

    assert_eq!(controller.submit().await, SubmitOutcome::Succeeded);
    assert_eq!(controller.input(), "");

    // Succeeded accepts a fresh attempt.
    controller.set_input("friend@example.com");
    assert_eq!(controller.submit().await, SubmitOutcome::Succeeded);

    assert_eq!(
        submitter.submitted(),
        vec![
            "user@example.com".to_string(),
            "user@example.com".to_string(),
            "friend@example.com".to_string()
        ]
    );
    assert_eq!(presentation.celebrations(), 2);
    assert_eq!(presentation.busy_changes(), vec![true, false, true, false, true, false]);
}

#[tokio::test]
async fn test_simulated_remote_always_succeeds_at_rate_one() {
    let (controller, presentation) =
        wire(Arc::new(SimulatedSubmitter::new(Duration::ZERO, 1.0)));

    for _ in 0..5 {
        controller.set_input("user@example.com");
        assert_eq!(controller.submit().await, SubmitOutcome::Succeeded);
    }

    assert_eq!(presentation.celebrations(), 5);
}

#[tokio::test]
async fn test_simulated_remote_always_fails_at_rate_zero() {
    let (controller, presentation) =
        wire(Arc::new(SimulatedSubmitter::new(Duration::ZERO, 0.0)));
    controller.set_input("user@example.com");

    let outcome = controller.submit().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(SubmissionError::Network(_))
    ));
    assert_eq!(controller.state(), SubmissionState::Failed);
    assert_eq!(presentation.messages().len(), 1);
    assert_eq!(presentation.messages()[0].0, MessageKind::Error);
    assert!(presentation.messages()[0].1.contains("hello@example.com"));
}

#[tokio::test(start_paused = true)]
async fn test_simulated_delay_elapses_before_outcome() {
    let (controller, _) = wire(Arc::new(SimulatedSubmitter::new(
        Duration::from_millis(1500),
        1.0,
    )));
    controller.set_input("user@example.com");
    let start = tokio::time::Instant::now();

    controller.submit().await;

    assert!(start.elapsed() >= Duration::from_millis(1500));
}

// ── Input handling through to submission ──────────────────────────────────────

#[tokio::test]
async fn test_enter_after_paste_submits_normalised_address() {
    let submitter = Arc::new(ScriptedSubmitter::always_ok());
    let (controller, _) = wire(Arc::clone(&submitter) as Arc<dyn SignupSubmitter>);
    let mut handler = InputHandler::new(controller);

    handler.on_paste("  New.User@Example.COM ");
    assert_eq!(handler.on_key(Key::Enter), KeyAction::SubmitRequested);
    let outcome = handler.submit().await;

    assert_eq!(outcome, SubmitOutcome::Succeeded);
    assert_eq!(submitter.submitted(), vec!["new.user@example.com".to_string()]);
}

#[tokio::test]
async fn test_typo_blocks_submission_until_corrected() {
    let submitter = Arc::new(ScriptedSubmitter::always_ok());
    let (controller, presentation) = wire(Arc::clone(&submitter) as Arc<dyn SignupSubmitter>);
    let handler = InputHandler::new(controller);

    handler.on_input("user@yahooo.com");
    assert!(matches!(handler.submit().await, SubmitOutcome::Invalid(_)));
    assert_eq!(submitter.call_count(), 0);

    handler.on_input("user@yahoo.com");
    assert_eq!(handler.submit().await, SubmitOutcome::Succeeded);
    assert_eq!(
        presentation.field_errors(),
        vec!["Did you mean user@yahoo.com?".to_string()]
    );
}
