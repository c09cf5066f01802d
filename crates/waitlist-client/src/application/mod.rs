//! Application layer use cases for the waitlist form.
//!
//! - **`submit_signup`** – The Submission Controller.  Drives the
//!   [`SubmissionMachine`](waitlist_core::SubmissionMachine) through one
//!   attempt, performing the effects it emits against the injected
//!   [`Presentation`](submit_signup::Presentation) and
//!   [`SignupSubmitter`](submit_signup::SignupSubmitter) ports.
//!
//! - **`input_handling`** – Translates raw form input (typing, paste, blur,
//!   key presses) into field updates, live feedback, and submit requests.
//!   Owns the key-sequence buffer for the easter egg.

pub mod input_handling;
pub mod submit_signup;
