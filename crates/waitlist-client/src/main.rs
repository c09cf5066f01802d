//! Waitlist signup form: terminal front-end.
//!
//! Drives the same controller a browser page would, but from the command
//! line.  Each positional argument is typed into the field and submitted.
//! Without arguments, lines are read from stdin:
//!
//! ```text
//! user@example.com     type the address and submit it
//! /paste  User@X.COM   paste (trim + lowercase), do not submit
//! /blur                validate the current field value
//! /esc                 dismiss messages
//! /konami              enter the secret key sequence
//! /key <name>          press a single key (ArrowUp, Enter, b, ...)
//! /status              print the form status as JSON
//! ```
//!
//! # Usage
//!
//! ```text
//! waitlist [OPTIONS] [EMAIL]...
//!
//! Options:
//!   --config       <PATH>  Config file [env: WAITLIST_CONFIG]
//!   --delay-ms     <MS>    Simulated remote delay [env: WAITLIST_DELAY_MS]
//!   --success-rate <P>     Simulated success probability [env: WAITLIST_SUCCESS_RATE]
//!   --json                 Emit UI events as JSON lines
//! ```
//!
//! CLI values take precedence over the config file.  Logs go to stderr so
//! that `--json` output on stdout stays machine-readable.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use waitlist_client::application::input_handling::{InputHandler, KeyAction};
use waitlist_client::application::submit_signup::{
    Presentation, SignupSubmitter, SubmissionController,
};
use waitlist_client::infrastructure::presentation::{ConsolePresentation, OutputFormat};
use waitlist_client::infrastructure::remote::SimulatedSubmitter;
use waitlist_client::infrastructure::storage::config::{
    default_config_path, load_config, AppConfig,
};
use waitlist_client::infrastructure::ui_bridge::{CommandResult, FormStatusDto};
use waitlist_core::{Key, KONAMI_SEQUENCE};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Join the waitlist from the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "waitlist",
    about = "Terminal front-end for the waitlist signup form",
    version
)]
struct Cli {
    /// Path to the TOML config file.
    ///
    /// Defaults to the platform config directory; a missing file means
    /// built-in defaults.
    #[arg(long, env = "WAITLIST_CONFIG")]
    config: Option<PathBuf>,

    /// Delay of the simulated remote call, in milliseconds.
    #[arg(long, env = "WAITLIST_DELAY_MS")]
    delay_ms: Option<u64>,

    /// Probability in [0, 1] that the simulated remote call succeeds.
    #[arg(long, env = "WAITLIST_SUCCESS_RATE")]
    success_rate: Option<f64>,

    /// Print UI events as JSON lines instead of text.
    #[arg(long)]
    json: bool,

    /// Addresses to submit in order.  Reads stdin when empty.
    emails: Vec<String>,
}

impl Cli {
    /// Loads the config file and applies the CLI overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the merged values are out of range.
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match self.config.clone().or_else(default_config_path) {
            Some(path) => load_config(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => AppConfig::default(),
        };

        if let Some(delay_ms) = self.delay_ms {
            config.submission.delay_ms = delay_ms;
        }
        if let Some(rate) = self.success_rate {
            config.submission.success_rate = rate;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

// ── Stdin commands ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Submit(String),
    Paste(String),
    Blur,
    Escape,
    Konami,
    Key(Key),
    Status,
    Skip,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('/') else {
        return if line.trim().is_empty() {
            Command::Skip
        } else {
            Command::Submit(line.to_string())
        };
    };

    let (name, arg) = rest.split_once(' ').unwrap_or((rest, ""));
    match name {
        "paste" => Command::Paste(arg.to_string()),
        "blur" => Command::Blur,
        "esc" => Command::Escape,
        "konami" => Command::Konami,
        "key" => Command::Key(Key::from_name(arg.trim())),
        "status" => Command::Status,
        // Anything else is taken as a literal address so validation can
        // report it.
        _ => Command::Submit(line.to_string()),
    }
}

async fn run_command(handler: &mut InputHandler, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Submit(text) => {
            handler.on_input(&text);
            let outcome = handler.submit().await;
            debug!(?outcome, "attempt finished");
        }
        Command::Paste(text) => handler.on_paste(&text),
        Command::Blur => {
            handler.on_blur();
        }
        Command::Escape => {
            handler.on_key(Key::Escape);
        }
        Command::Konami => {
            for key in KONAMI_SEQUENCE {
                handler.on_key(key);
            }
        }
        Command::Key(key) => {
            if handler.on_key(key) == KeyAction::SubmitRequested {
                handler.submit().await;
            }
        }
        Command::Status => {
            let status = FormStatusDto::from(handler.controller().snapshot());
            let json = serde_json::to_string(&CommandResult::ok(status))
                .context("failed to serialise form status")?;
            println!("{json}");
        }
        Command::Skip => {}
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    // RUST_LOG wins; otherwise the configured level.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        delay_ms = config.submission.delay_ms,
        success_rate = config.submission.success_rate,
        "waitlist form ready"
    );

    let presentation: Arc<dyn Presentation> =
        Arc::new(ConsolePresentation::stdout(cli.output_format()));
    let submitter: Arc<dyn SignupSubmitter> =
        Arc::new(SimulatedSubmitter::from_config(&config.submission));
    let controller = Arc::new(SubmissionController::new(
        presentation,
        submitter,
        config.feedback_messages(),
    ));
    let mut handler = InputHandler::new(controller);

    if !cli.emails.is_empty() {
        for email in &cli.emails {
            run_command(&mut handler, Command::Submit(email.clone())).await?;
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        run_command(&mut handler, parse_command(&line)).await?;
    }

    info!("stdin closed");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        // Arrange / Act
        let cli = Cli::parse_from(["waitlist"]);

        // Assert
        assert_eq!(cli.delay_ms, None);
        assert_eq!(cli.success_rate, None);
        assert!(!cli.json);
        assert!(cli.emails.is_empty());
    }

    #[test]
    fn test_cli_overrides_apply_on_top_of_config() {
        let missing = std::env::temp_dir().join("waitlist-cli-test-missing.toml");
        let cli = Cli::parse_from([
            "waitlist",
            "--config",
            missing.to_str().unwrap(),
            "--delay-ms",
            "0",
            "--success-rate",
            "1.0",
        ]);

        let config = cli.load_config().unwrap();

        assert_eq!(config.submission.delay_ms, 0);
        assert!((config.submission.success_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cli_rejects_out_of_range_success_rate() {
        let missing = std::env::temp_dir().join("waitlist-cli-test-missing.toml");
        let cli = Cli::parse_from([
            "waitlist",
            "--config",
            missing.to_str().unwrap(),
            "--success-rate",
            "2",
        ]);

        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_cli_json_flag_selects_json_output() {
        let cli = Cli::parse_from(["waitlist", "--json", "a@b.co"]);
        assert_eq!(cli.output_format(), OutputFormat::Json);
        assert_eq!(cli.emails, vec!["a@b.co".to_string()]);
    }

    #[test]
    fn test_plain_line_is_submitted() {
        assert_eq!(
            parse_command("user@example.com"),
            Command::Submit("user@example.com".into())
        );
    }

    #[test]
    fn test_blank_line_is_skipped() {
        assert_eq!(parse_command("   "), Command::Skip);
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(parse_command("/esc"), Command::Escape);
        assert_eq!(parse_command("/blur"), Command::Blur);
        assert_eq!(parse_command("/konami"), Command::Konami);
        assert_eq!(parse_command("/status"), Command::Status);
        assert_eq!(
            parse_command("/paste  User@Example.COM"),
            Command::Paste(" User@Example.COM".into())
        );
        assert_eq!(parse_command("/key ArrowUp"), Command::Key(Key::ArrowUp));
    }

    #[test]
    fn test_unknown_command_is_treated_as_input() {
        assert_eq!(parse_command("/nope"), Command::Submit("/nope".into()));
    }
}
