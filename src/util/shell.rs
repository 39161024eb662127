//! Centralized shell output.
//!
//! All CLI output goes through [`Shell`] so commands never manage colors or
//! alignment themselves. Human and JSON modes are mutually exclusive: when
//! JSON output is requested, no human-readable status lines are printed.

use std::io::{self, IsTerminal, Write};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only
    Quiet,
    /// Default: status lines
    #[default]
    Normal,
    /// --verbose: status lines plus debug detail
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Semantic status for output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Found,
    Cached,
    Cleared,

    // In-progress statuses (cyan)
    Probing,

    // Warning statuses (yellow)
    Missing,
    Skipped,
    Warning,

    // Error status (red)
    Error,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Found => "Found",
            Status::Cached => "Cached",
            Status::Cleared => "Cleared",
            Status::Probing => "Probing",
            Status::Missing => "Missing",
            Status::Skipped => "Skipped",
            Status::Warning => "Warning",
            Status::Error => "Error",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Found | Status::Cached | Status::Cleared => "\x1b[1;32m",
            Status::Probing => "\x1b[1;36m",
            Status::Missing | Status::Skipped | Status::Warning => "\x1b[1;33m",
            Status::Error => "\x1b[1;31m",
        }
    }
}

/// Unified CLI output handle.
#[derive(Debug, Clone)]
pub struct Shell {
    verbosity: Verbosity,
    color: ColorChoice,
    json: bool,
}

impl Shell {
    /// Create a shell with the given settings.
    pub fn new(verbosity: Verbosity, color: ColorChoice, json: bool) -> Self {
        Shell {
            verbosity,
            color,
            json,
        }
    }

    /// Whether JSON mode is active (suppresses human output).
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Current verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Whether ANSI colors are in effect for stderr.
    pub fn color_enabled(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        }
    }

    /// Print a right-aligned status line to stderr.
    pub fn status(&self, status: Status, message: impl AsRef<str>) {
        if self.json || self.verbosity == Verbosity::Quiet {
            return;
        }

        let label = status.as_str();
        if self.color_enabled() {
            eprintln!(
                "{}{:>12}\x1b[0m {}",
                status.color_code(),
                label,
                message.as_ref()
            );
        } else {
            eprintln!("{:>12} {}", label, message.as_ref());
        }
    }

    /// Print a warning regardless of JSON mode suppression rules.
    pub fn warn(&self, message: impl AsRef<str>) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        self.status(Status::Warning, message);
    }

    /// Print a plain line to stdout (export output, JSON payloads).
    pub fn print(&self, message: impl AsRef<str>) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", message.as_ref());
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(Verbosity::Normal, ColorChoice::Auto, false)
    }
}
