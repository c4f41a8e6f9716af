//! Statistics aggregator
//!
//! A pure fold over the issue set. Every issue lands in exactly one of
//! completed, in-progress or unassigned.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::models::Issue;

/// Aggregate statistics for a digest
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    /// Number of issues
    pub total: usize,
    /// Closed issues
    pub completed: usize,
    /// Open issues with an assignee
    pub in_progress: usize,
    /// Open issues without an assignee
    pub unassigned: usize,
    /// Assignees of completed issues, deduplicated and sorted
    pub contributors: Vec<String>,
}

impl Stats {
    /// Completion percentage in `0.0..=100.0`; zero when there are no issues
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }

    /// Issues not yet closed
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.total - self.completed
    }
}

/// Reduce an issue set into [`Stats`]
#[must_use]
pub fn aggregate<'a, I>(issues: I) -> Stats
where
    I: IntoIterator<Item = &'a Issue>,
{
    let mut stats = Stats::default();
    let mut contributors = BTreeSet::new();

    for issue in issues {
        stats.total += 1;
        match (&issue.assignee, issue.is_closed()) {
            (assignee, true) => {
                stats.completed += 1;
                if let Some(login) = assignee {
                    contributors.insert(login.clone());
                }
            },
            (Some(_), false) => stats.in_progress += 1,
            (None, false) => stats.unassigned += 1,
        }
    }

    stats.contributors = contributors.into_iter().collect();
    stats
}
