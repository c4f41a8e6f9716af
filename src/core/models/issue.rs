//! Issue and milestone snapshots
//!
//! Immutable views of remote tracker state, fetched once per run.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue state as reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Still being worked on (or not started)
    #[default]
    Open,
    /// Done
    Closed,
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for IssueState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("Invalid issue state: {s}. Use: open, closed")),
        }
    }
}

/// A single issue snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number within the repository
    pub number: u64,
    /// Issue title
    pub title: String,
    /// Open or closed
    pub state: IssueState,
    /// Browser URL of the issue
    pub url: String,
    /// Label names; kept as a set so the order the tracker returns them in
    /// never leaks into classification or rendering
    #[serde(default)]
    pub labels: BTreeSet<String>,
    /// Login of the assignee, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

impl Issue {
    /// Create an open, unlabeled, unassigned issue
    #[must_use]
    pub fn new(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            state: IssueState::Open,
            url: String::new(),
            labels: BTreeSet::new(),
            assignee: None,
        }
    }

    /// Set the state
    #[must_use]
    pub fn with_state(mut self, state: IssueState) -> Self {
        self.state = state;
        self
    }

    /// Add labels
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Set the assignee
    #[must_use]
    pub fn with_assignee(mut self, login: impl Into<String>) -> Self {
        self.assignee = Some(login.into());
        self
    }

    /// Set the browser URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Whether the issue is closed
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }

    /// Whether the issue is assigned to someone
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assignee.is_some()
    }
}

/// A milestone snapshot (planning mode)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone number
    pub number: u64,
    /// Milestone title, e.g. "v1.0.0"
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Due date
    #[serde(default)]
    pub due_on: Option<DateTime<Utc>>,
    /// Open or closed
    pub state: IssueState,
    /// Browser URL of the milestone
    pub url: String,
}

impl Milestone {
    /// Create an open milestone with no description or due date
    #[must_use]
    pub fn new(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            description: String::new(),
            due_on: None,
            state: IssueState::Open,
            url: String::new(),
        }
    }
}
