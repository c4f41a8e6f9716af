//! Label classifier
//!
//! Assigns each issue exactly one category and one rank from the ordered
//! taxonomy lists. The taxonomy list is scanned in configured order, never
//! the issue's label order, so the answer does not depend on how the tracker
//! happened to return labels. Label comparison is ASCII case-insensitive.

use std::collections::BTreeSet;

use crate::core::models::{Issue, LabelTaxonomy};

/// An issue together with its derived classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedIssue {
    /// The underlying issue
    pub issue: Issue,
    /// Matching category label (as spelled in the taxonomy), or `None`
    /// for uncategorized
    pub category: Option<String>,
    /// Index into the rank list; equals the list length when unspecified
    pub rank: usize,
}

impl ClassifiedIssue {
    /// Whether the issue carries no rank label
    #[must_use]
    pub fn is_unranked(&self, taxonomy: &LabelTaxonomy) -> bool {
        self.rank >= taxonomy.unspecified_rank()
    }
}

/// First entry of `list` carried by `labels`, with its index
#[must_use]
pub fn first_match<'a>(labels: &BTreeSet<String>, list: &'a [String]) -> Option<(usize, &'a str)> {
    list.iter()
        .enumerate()
        .find(|(_, wanted)| labels.iter().any(|label| label.eq_ignore_ascii_case(wanted)))
        .map(|(i, wanted)| (i, wanted.as_str()))
}

/// Rank of `labels` against `ranks`, or `ranks.len()` when none match
#[must_use]
pub fn rank_of(labels: &BTreeSet<String>, ranks: &[String]) -> usize {
    first_match(labels, ranks).map_or(ranks.len(), |(i, _)| i)
}

/// Classify a single issue
#[must_use]
pub fn classify(issue: &Issue, taxonomy: &LabelTaxonomy) -> ClassifiedIssue {
    ClassifiedIssue {
        issue: issue.clone(),
        category: first_match(&issue.labels, &taxonomy.categories).map(|(_, c)| c.to_string()),
        rank: rank_of(&issue.labels, &taxonomy.ranks),
    }
}

/// Classify every issue, preserving input order
#[must_use]
pub fn classify_all(issues: &[Issue], taxonomy: &LabelTaxonomy) -> Vec<ClassifiedIssue> {
    issues.iter().map(|issue| classify(issue, taxonomy)).collect()
}
