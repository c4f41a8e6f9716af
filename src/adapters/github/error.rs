//! GitHub client errors

use thiserror::Error;

/// Longest response body excerpt kept in an error
const MAX_BODY_CHARS: usize = 500;

/// Failure talking to the GitHub API
#[derive(Debug, Error)]
pub enum GithubError {
    /// No token was available
    #[error(
        "no GitHub token found, set GITHUB_TOKEN or run 'issue-digest auth login --with-token'"
    )]
    MissingToken,

    /// Token cannot be used as a header value
    #[error("GitHub token contains characters that are not allowed in an HTTP header")]
    InvalidToken,

    /// HTTP client could not be constructed
    #[error("failed to create GitHub client")]
    Client(#[source] reqwest::Error),

    /// Request never produced a response (DNS, TLS, timeout, ...)
    #[error("{operation}: request failed")]
    Transport {
        /// What was being attempted
        operation: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("{operation}: GitHub API returned HTTP {status}: {body}")]
    Status {
        /// What was being attempted
        operation: String,
        /// HTTP status code
        status: u16,
        /// Response body excerpt
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("{operation}: unexpected response from GitHub")]
    Decode {
        /// What was being attempted
        operation: String,
        /// Underlying decode error
        #[source]
        source: reqwest::Error,
    },
}

impl GithubError {
    /// HTTP status, when the server answered
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Trim a response body for inclusion in an error message
#[must_use]
pub fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
