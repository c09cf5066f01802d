//! Infrastructure layer for the waitlist client.
//!
//! Contains the adapters behind the application-layer ports, plus
//! configuration loading and the UI-bridge data types.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `waitlist_core`, but MUST NOT be imported by the `application` or domain
//! layers (test modules excepted).
//!
//! # Sub-modules
//!
//! - **`presentation`** – Implementations of
//!   [`Presentation`](crate::application::submit_signup::Presentation): a
//!   console renderer (human text or JSON lines) and a recording double.
//!
//! - **`remote`** – Implementations of
//!   [`SignupSubmitter`](crate::application::submit_signup::SignupSubmitter):
//!   the simulated endpoint (fixed delay, configurable success rate) and a
//!   scripted double that tracks in-flight calls.
//!
//! - **`storage`** – TOML configuration file schema and loading.
//!
//! - **`ui_bridge`** – Serialisable events and status DTOs for a UI front-end.

pub mod presentation;
pub mod remote;
pub mod storage;
pub mod ui_bridge;
