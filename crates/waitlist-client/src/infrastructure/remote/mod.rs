//! Remote submission adapters.
//!
//! There is no real backend: [`simulated::SimulatedSubmitter`] models an
//! unreliable network dependency, and [`mock::ScriptedSubmitter`] gives tests
//! full control over outcomes and timing.  A real HTTP client would be a
//! third implementation of the same port.

pub mod mock;
pub mod simulated;

pub use mock::ScriptedSubmitter;
pub use simulated::SimulatedSubmitter;
