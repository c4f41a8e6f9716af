//! Target resolver
//!
//! The tracker does not enforce a unique tracking issue, so duplicates are
//! possible. Resolution is a pure selection over the candidate list: exact
//! title match, lowest number wins, the rest are reported and ignored.

use serde::Serialize;

use crate::core::models::{Issue, IssueState};

/// The canonical existing tracking issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetIssue {
    /// Issue number
    pub number: u64,
    /// Issue title (equal to the expected title)
    pub title: String,
    /// Open or closed; closed targets are still updated
    pub state: IssueState,
}

/// Outcome of resolving a target
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Selected target; `None` means a new issue must be created
    pub target: Option<TargetIssue>,
    /// Numbers of other issues with the same title, ascending
    pub duplicates: Vec<u64>,
}

impl Resolution {
    /// Whether more than one candidate matched
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Pick the tracking issue titled `expected_title` from `candidates`
#[must_use]
pub fn resolve(candidates: &[Issue], expected_title: &str) -> Resolution {
    let mut matching: Vec<&Issue> =
        candidates.iter().filter(|issue| issue.title == expected_title).collect();
    matching.sort_by_key(|issue| issue.number);
    matching.dedup_by_key(|issue| issue.number);

    let mut rest = matching.into_iter();
    let target = rest.next().map(|issue| TargetIssue {
        number: issue.number,
        title: issue.title.clone(),
        state: issue.state,
    });

    Resolution {
        target,
        duplicates: rest.map(|issue| issue.number).collect(),
    }
}
