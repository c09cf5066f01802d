//! Scripted signup endpoint for tests.
//!
//! # Why a scripted submitter?
//!
//! The simulated endpoint is random and slow.  Tests need to decide each
//! outcome up front and, for the overlapping-submit checks, to hold a call
//! open while they poke at the controller.  `ScriptedSubmitter`:
//!
//! - Returns queued outcomes in order, then a fallback outcome.
//! - Records every email it was called with.
//! - Tracks how many calls are in flight and the maximum ever observed.
//! - Optionally parks each call on a gate until the test calls
//!   [`ScriptedSubmitter::release`].

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use waitlist_core::EmailCandidate;

use crate::application::submit_signup::{SignupSubmitter, SubmissionError};

/// A submitter whose outcomes and timing are controlled by the test.
#[derive(Debug)]
pub struct ScriptedSubmitter {
    outcomes: Mutex<VecDeque<Result<(), SubmissionError>>>,
    fallback: Result<(), SubmissionError>,
    submitted: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    gate: Option<Semaphore>,
    entered: Notify,
}

impl ScriptedSubmitter {
    fn with_fallback(fallback: Result<(), SubmissionError>) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            fallback,
            submitted: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            gate: None,
            entered: Notify::new(),
        }
    }

    /// Every call succeeds immediately.
    pub fn always_ok() -> Self {
        Self::with_fallback(Ok(()))
    }

    /// Every call fails immediately with a network error.
    pub fn always_fail() -> Self {
        Self::with_fallback(Err(SubmissionError::Network("scripted failure".into())))
    }

    /// Returns `outcomes` in order, then succeeds.
    pub fn sequence(outcomes: impl IntoIterator<Item = Result<(), SubmissionError>>) -> Self {
        let s = Self::always_ok();
        s.lock_outcomes().extend(outcomes);
        s
    }

    /// Parks every call until [`release`](Self::release) is called.
    pub fn gated(self) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..self
        }
    }

    /// Lets `n` parked (or future) calls complete.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Waits until a call has entered `submit`.
    pub async fn wait_for_call(&self) {
        self.entered.notified().await;
    }

    /// Emails passed to `submit`, oldest first.
    pub fn submitted(&self) -> Vec<String> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.submitted().len()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous calls observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn lock_outcomes(&self) -> MutexGuard<'_, VecDeque<Result<(), SubmissionError>>> {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SignupSubmitter for ScriptedSubmitter {
    async fn submit(&self, email: &EmailCandidate) -> Result<(), SubmissionError> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.entered.notify_one();

        if let Some(gate) = &self.gate {
            // The semaphore is never closed, so acquire cannot fail.
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let outcome = self
            .lock_outcomes()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}
