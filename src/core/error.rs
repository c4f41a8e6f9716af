//! Input errors
//!
//! Problems with what the user asked for. These are detected before any
//! network call is made.

use thiserror::Error;

/// Invalid or missing user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Milestone identifier is not a positive integer
    #[error("invalid milestone number: {0}")]
    InvalidMilestone(String),

    /// No repository could be selected
    #[error(
        "no repository selected, pass --repo owner/name or run 'issue-digest repo switch <owner/name>'"
    )]
    MissingRepository,

    /// Repository is not in `owner/name` form
    #[error("invalid repository format: {0:?} (expected owner/name)")]
    InvalidRepository(String),

    /// Tracking issue title rendered to an empty string
    #[error("target title must not be empty")]
    EmptyTitle,
}

/// Parse a milestone number given on the command line
pub fn parse_milestone_number(s: &str) -> Result<u64, InputError> {
    match s.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(InputError::InvalidMilestone(s.to_string())),
    }
}
