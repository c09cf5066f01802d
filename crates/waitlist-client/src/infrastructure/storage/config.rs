//! TOML-based configuration for the waitlist client.
//!
//! Looks for the config file at (first match wins):
//! - the path given with `--config` / `WAITLIST_CONFIG`
//! - Linux:    `$XDG_CONFIG_HOME/waitlist/config.toml` or `~/.config/waitlist/config.toml`
//! - macOS:    `~/Library/Application Support/Waitlist/config.toml`
//! - Windows:  `%APPDATA%\Waitlist\config.toml`
//!
//! Example:
//!
//! ```toml
//! [submission]
//! delay_ms = 1500
//! success_rate = 0.95
//!
//! [messages]
//! success = "🎉 Thank you! You've been added to our waitlist."
//! contact_email = "hello@example.com"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every field has a `#[serde(default = ...)]`, so a partial file (or no file
//! at all) yields a working configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::submit_signup::FeedbackMessages;
use crate::infrastructure::remote::SimulatedSubmitter;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Behaviour of the simulated remote call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionConfig {
    /// Fixed delay before the simulated call resolves.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Probability in `[0, 1]` that the simulated call succeeds.
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,
}

/// User-facing copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessagesConfig {
    #[serde(default = "default_success_message")]
    pub success: String,
    /// Offered as a fallback in the failure message.
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_delay_ms() -> u64 {
    SimulatedSubmitter::DEFAULT_DELAY.as_millis() as u64
}
fn default_success_rate() -> f64 {
    SimulatedSubmitter::DEFAULT_SUCCESS_RATE
}
fn default_success_message() -> String {
    FeedbackMessages::default().success
}
fn default_contact_email() -> String {
    FeedbackMessages::default().contact_email
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            success_rate: default_success_rate(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            success: default_success_message(),
            contact_email: default_contact_email(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Checks value ranges that the TOML types cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `success_rate` is outside `[0, 1]`
    /// or `contact_email` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.submission.success_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::Invalid(format!(
                "submission.success_rate must be between 0 and 1, got {rate}"
            )));
        }
        if self.messages.contact_email.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "messages.contact_email must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn feedback_messages(&self) -> FeedbackMessages {
        FeedbackMessages {
            success: self.messages.success.clone(),
            contact_email: self.messages.contact_email.clone(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parses and validates a config from TOML text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed TOML and
/// [`ConfigError::Invalid`] for out-of-range values.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let cfg: AppConfig = toml::from_str(content)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Loads the config at `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// plus any error from [`parse_config`].
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Resolves the default config file path for this platform, if any.
pub fn default_config_path() -> Option<PathBuf> {
    platform_config_dir().map(|dir| dir.join("config.toml"))
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Waitlist"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("waitlist"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Waitlist")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
