//! Interactive confirmation

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::core::ports::Confirm;

/// Asks on stderr and reads the answer from stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> anyhow::Result<bool> {
        let stdin = io::stdin();
        let stderr = io::stderr();
        ask(&mut stdin.lock(), &mut stderr.lock(), message)
    }
}

/// Prompt with `message` until the answer is yes, no, or empty
///
/// `y`/`yes` accept; `n`/`no`, an empty line, and end of input decline.
/// Anything else prints a hint and asks again.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> anyhow::Result<bool> {
    loop {
        write!(out, "{} {message} {} ", "?".magenta().bold(), "(y/N)".bright_black())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(false);
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            other => {
                writeln!(out, "Invalid input: {other}. Use: y, yes, n, no")?;
            },
        }
    }
}
