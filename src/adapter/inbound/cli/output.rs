//! Terminal output for the CLI.
//!
//! Human mode prints indented, colored sections to stdout. In `--json` mode
//! stdout carries only answer documents, one per line, so it can be piped
//! straight into a JSON Lines consumer; progress chatter is dropped and
//! warnings and errors go to stderr as JSON objects.
//!
//! Quiet mode keeps answers, warnings and errors and drops everything else.

use std::fmt::Display;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::json;

use super::command::ColorChoice;

/// Output mode selected by the global flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }

    /// Progress and detail lines are printed.
    const fn chatty(self) -> bool {
        !self.json && !self.quiet
    }
}

static MODE: RwLock<OutputConfig> = parking_lot::const_rwlock(OutputConfig::new(false, false, 0));

fn mode() -> OutputConfig {
    *MODE.read()
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Apply the global flags. Call once, before any output.
pub fn configure(config: OutputConfig, color: &ColorChoice) {
    let colored = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => !config.json && std::io::stdout().is_terminal(),
    };
    owo_colors::set_override(colored);
    *MODE.write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    mode().json
}

#[must_use]
pub fn is_quiet() -> bool {
    mode().quiet
}

/// Number of `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    mode().verbose
}

/// Print the tool name and version.
pub fn header(version: &str) {
    if mode().chatty() {
        println!("{} {}", "codemine".bold(), version.dimmed());
    }
}

/// Print a section title.
pub fn section(title: &str) {
    if mode().chatty() {
        println!();
        println!("{}", title.bold());
    }
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if mode().chatty() {
        println!("  {:<14} {}", label.dimmed(), value);
    }
}

pub fn success(message: &str) {
    if mode().chatty() {
        println!("  {} {}", "✓".green(), message);
    }
}

pub fn note(message: &str) {
    if mode().chatty() {
        println!("  {}", message.dimmed());
    }
}

pub fn hint(message: &str) {
    if mode().chatty() {
        println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
    }
}

/// Print preformatted content such as a table, indented.
pub fn lines(content: &str) {
    if mode().chatty() {
        for line in content.lines() {
            println!("  {line}");
        }
    }
}

/// Print a warning. Kept in quiet mode.
pub fn warning(message: &str) {
    if mode().json {
        eprintln!("{}", json!({ "level": "warning", "message": message }));
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error to stderr.
pub fn error(message: &str) {
    if mode().json {
        eprintln!("{}", json!({ "level": "error", "message": message }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a command's answer. Kept in quiet mode; JSON callers use
/// [`json_output`] instead.
pub fn result(message: &str) {
    if !mode().json {
        println!("{message}");
    }
}

/// Print one JSON answer document.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

/// Start a spinner on stderr. Hidden unless stderr is an interactive
/// terminal in human, non-quiet mode.
pub fn spinner(message: &str) -> ProgressBar {
    if !mode().chatty() || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(SPINNER_FRAMES)
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Clear the spinner and report success.
pub fn spinner_success(pb: &ProgressBar, message: &str) {
    pb.finish_and_clear();
    success(message);
}

/// Clear the spinner and report failure.
pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    pb.finish_and_clear();
    error(message);
}

/// Color a value for emphasis.
pub fn highlight(value: impl Display) -> String {
    format!("{}", value.to_string().cyan())
}

/// Join codes for display as `A B C`, which pastes back as a query.
#[must_use]
pub fn codes(codes: &[String]) -> String {
    codes.join(" ")
}
