//! GitHub adapter
//!
//! Implements [`IssueTracker`](crate::core::ports::IssueTracker) over the
//! GitHub REST API with a blocking HTTP client.

mod client;
mod error;
mod types;

pub use client::{ClientSettings, DEFAULT_API_URL, DEFAULT_WEB_URL, GithubClient, search_query};
pub use error::GithubError;
