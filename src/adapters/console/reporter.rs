//! Console reporter

use std::io::Write;

use colored::Colorize;

use crate::core::ports::Reporter;
use crate::output::OutputMode;

/// Writes reporter messages to the terminal
///
/// Human mode writes to stdout. JSON mode moves everything to stderr so
/// stdout carries only the machine-readable result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    mode: OutputMode,
}

impl ConsoleReporter {
    /// Create a reporter for `mode`
    #[must_use]
    pub const fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    fn emit(&self, line: &str) {
        // A closed pipe is not worth failing the run over
        match self.mode {
            OutputMode::Human => {
                let _ = writeln!(std::io::stdout().lock(), "{line}");
            },
            OutputMode::Json => {
                let _ = writeln!(std::io::stderr().lock(), "{line}");
            },
        }
    }
}

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        self.emit(&format!("{} {message}", "→".cyan().bold()));
    }

    fn warn(&self, message: &str) {
        self.emit(&format!("{} {}", "!".yellow().bold(), message.yellow()));
    }

    fn error(&self, message: &str) {
        self.emit(&format!("{} {}", "✘".red().bold(), message.red()));
    }

    fn success(&self, message: &str) {
        self.emit(&format!("{} {}", "✔".green().bold(), message.green()));
    }

    fn detail(&self, message: &str) {
        self.emit(&format!("  {}", message.bright_black()));
    }

    fn preview(&self, heading: &str, content: &str) {
        let rule = "─".repeat(60);
        self.emit(&format!("{} {}", "↓".cyan().bold(), heading.bold()));
        self.emit(&rule.bright_black().to_string());
        self.emit(content.trim_end());
        self.emit(&rule.bright_black().to_string());
    }
}
