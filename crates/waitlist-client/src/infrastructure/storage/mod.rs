//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module reads the optional TOML configuration file and
//! falls back to built-in defaults when it does not exist.  Nothing the form
//! does is ever written back to disk.

pub mod config;
