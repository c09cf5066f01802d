//! Simulated signup endpoint.
//!
//! Waits a fixed delay, then succeeds with probability `success_rate` and
//! fails with [`SubmissionError::Network`] otherwise.  No retry, no timeout,
//! no cancellation: once `submit` is awaited it always resolves.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use waitlist_core::EmailCandidate;

use crate::application::submit_signup::{SignupSubmitter, SubmissionError};
use crate::infrastructure::storage::config::SubmissionConfig;

/// Stand-in for the real signup API.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    /// Probability in `[0, 1]` that a call succeeds.
    success_rate: f64,
}

impl SimulatedSubmitter {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);
    pub const DEFAULT_SUCCESS_RATE: f64 = 0.95;

    /// Creates a submitter.  `success_rate` is clamped to `[0, 1]`.
    pub fn new(delay: Duration, success_rate: f64) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self {
            delay,
            success_rate,
        }
    }

    pub fn from_config(config: &SubmissionConfig) -> Self {
        Self::new(Duration::from_millis(config.delay_ms), config.success_rate)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY, Self::DEFAULT_SUCCESS_RATE)
    }
}

#[async_trait]
impl SignupSubmitter for SimulatedSubmitter {
    async fn submit(&self, email: &EmailCandidate) -> Result<(), SubmissionError> {
        debug!(%email, delay_ms = self.delay.as_millis() as u64, "simulating signup call");
        tokio::time::sleep(self.delay).await;

        // `random::<f64>()` is in [0, 1), so a rate of 1.0 always succeeds
        // and 0.0 always fails.
        let roll = rand::random::<f64>();
        if roll < self.success_rate {
            debug!(%email, "simulated signup succeeded");
            Ok(())
        } else {
            debug!(%email, roll, "simulated signup failed");
            Err(SubmissionError::Network("Network error".to_string()))
        }
    }
}
