//! Issue tracker port
//!
//! Defines the interface for reading and writing tracker issues. The core
//! only ever sees fully paged, deduplicated collections; pagination, retry
//! and transport concerns belong to implementations.

use crate::core::models::{Issue, Milestone};

/// Issue tracker scoped to a single repository
pub trait IssueTracker {
    /// Fetch one milestone by number
    fn milestone(&self, number: u64) -> anyhow::Result<Milestone>;

    /// List all open milestones
    fn open_milestones(&self) -> anyhow::Result<Vec<Milestone>>;

    /// All issues (open and closed) attached to a milestone.
    ///
    /// May include pull requests; see [`IssueTracker::is_pull_request`].
    fn milestone_issues(&self, number: u64) -> anyhow::Result<Vec<Issue>>;

    /// Issues (open and closed) carrying any of `labels`
    fn issues_with_any_label(&self, labels: &[String]) -> anyhow::Result<Vec<Issue>>;

    /// Issues (open and closed) carrying `label`; candidates for the tracking issue
    fn issues_with_label(&self, label: &str) -> anyhow::Result<Vec<Issue>>;

    /// Create an issue, returning its number
    fn create_issue(&self, title: &str, body: &str, labels: &[String]) -> anyhow::Result<u64>;

    /// Patch an issue's title and/or body
    fn update_issue(&self, number: u64, title: Option<&str>, body: Option<&str>)
    -> anyhow::Result<()>;

    /// Browser URL for an issue number
    fn issue_url(&self, number: u64) -> String;

    /// Whether a fetched item is actually a pull request
    fn is_pull_request(&self, issue: &Issue) -> bool {
        issue.url.contains("/pull/")
    }
}
