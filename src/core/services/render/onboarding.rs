//! Contributor onboarding document
//!
//! Issues are grouped by difficulty (easiest first) and then by category.
//! Within a group open issues come before closed ones, then by number.

use crate::core::models::LabelTaxonomy;
use crate::core::services::aggregator::Stats;
use crate::core::services::classifier::ClassifiedIssue;

use super::{
    PROGRESS_WIDTH, RenderContext, any_label_clause, assemble, checkbox, distinct,
    exclude_labels_clause, footer, progress_bar, query,
};

const WELCOME: &str = "As a programming enthusiast, have you ever felt that you want to \
participate in the development of an open source project, but don't know where to start?\n\n\
In order to help everyone better participate in open source projects, we regularly publish \
issues suitable for new contributors to help everyone learn by doing!";

/// Everything an onboarding document is built from
#[derive(Debug, Clone, Copy)]
pub struct OnboardingInput<'a> {
    /// Labels that select onboarding issues (any-of)
    pub onboard_labels: &'a [String],
    /// Selected issues, classified against `taxonomy`
    pub issues: &'a [ClassifiedIssue],
    /// Aggregate statistics over `issues`
    pub stats: &'a Stats,
    /// Category and difficulty labels
    pub taxonomy: &'a LabelTaxonomy,
}

/// Render the full onboarding document
#[must_use]
pub fn render(ctx: &RenderContext, input: &OnboardingInput<'_>) -> String {
    assemble(vec![
        overview(ctx, input),
        format!("## Description\n\n{WELCOME}"),
        issue_list(input),
        contributors(input.stats),
        links(ctx, input),
        footer(ctx),
    ])
}

/// Progress bar and counts, each linking to the matching search
#[must_use]
pub fn overview(ctx: &RenderContext, input: &OnboardingInput<'_>) -> String {
    let stats = input.stats;
    let labels = any_label_clause(input.onboard_labels).unwrap_or_default();
    let link = |parts: &[&str]| ctx.search_url(&query(parts));
    [
        "## Overview".to_string(),
        String::new(),
        format!("- Progress: {}", progress_bar(stats.completed, stats.total, PROGRESS_WIDTH)),
        format!("- [Total Issues: {}]({})", stats.total, link(&["is:issue", labels.as_str()])),
        format!(
            "  - ✅ [Completed: {}]({})",
            stats.completed,
            link(&["is:issue is:closed", labels.as_str()])
        ),
        format!(
            "  - 🚧 [In Progress: {}]({})",
            stats.in_progress,
            link(&["is:issue is:open assignee:*", labels.as_str()])
        ),
        format!(
            "  - 📋 [Unassigned: {}]({})",
            stats.unassigned,
            link(&["is:issue is:open", labels.as_str(), "no:assignee"])
        ),
    ]
    .join("\n")
}

/// Difficulty sections in taxonomy order, "Unspecified" last; category
/// subsections in taxonomy order, "Uncategorized" last. Empty groups are
/// omitted.
#[must_use]
pub fn issue_list(input: &OnboardingInput<'_>) -> String {
    let taxonomy = input.taxonomy;
    let mut blocks = vec![
        format!("## Issue List ({})", input.issues.len()),
        "> The following onboarding issues are organized first by difficulty level \
         (from easy to hard), and then by category within each difficulty level."
            .to_string(),
    ];

    let mut tiers: Vec<(String, Vec<&ClassifiedIssue>)> = distinct(&taxonomy.ranks)
        .into_iter()
        .map(|label| {
            let rank = taxonomy.ranks.iter().position(|r| r == label).unwrap_or(usize::MAX);
            (label.to_string(), input.issues.iter().filter(|c| c.rank == rank).collect())
        })
        .collect();
    tiers.push((
        "Unspecified".to_string(),
        input.issues.iter().filter(|c| c.is_unranked(taxonomy)).collect(),
    ));

    for (difficulty, members) in tiers {
        if members.is_empty() {
            continue;
        }
        blocks.push(format!("### Difficulty: {difficulty} ({})", members.len()));
        for (category, mut group) in by_category(&members, taxonomy) {
            group.sort_by_key(|c| (c.issue.is_closed(), c.issue.number));
            let mut lines = vec![format!("#### Category: {category} ({})", group.len()), String::new()];
            lines.extend(group.iter().map(|c| issue_line(c)));
            blocks.push(lines.join("\n"));
        }
    }

    blocks.join("\n\n")
}

/// Contributors on a single line; empty when there are none
#[must_use]
pub fn contributors(stats: &Stats) -> String {
    if stats.contributors.is_empty() {
        return String::new();
    }
    let names = stats.contributors.iter().map(|c| format!("@{c}")).collect::<Vec<_>>().join(" ");
    format!(
        "## Contributors ({})\n\nThanks to all our contributors who have completed onboarding \
         issues! Your contributions help make our project better:\n\n{names}",
        stats.contributors.len()
    )
}

/// Deep links back into the tracker
#[must_use]
pub fn links(ctx: &RenderContext, input: &OnboardingInput<'_>) -> String {
    let labels = any_label_clause(input.onboard_labels).unwrap_or_default();
    let no_difficulty = exclude_labels_clause(&input.taxonomy.ranks);
    [
        "## Links".to_string(),
        String::new(),
        format!(
            "- 👥 [Unassigned issues]({})",
            ctx.search_url(&query(&["is:issue is:open", labels.as_str(), "no:assignee"]))
        ),
        format!(
            "- 🏷️ [Issues without difficulty]({})",
            ctx.search_url(&query(&["is:issue is:open", labels.as_str(), no_difficulty.as_str()]))
        ),
        format!(
            "- 📋 [All onboarding issues]({})",
            ctx.search_url(&query(&["is:issue", labels.as_str()]))
        ),
    ]
    .join("\n")
}

/// One onboarding issue line, celebrating whoever closed it
#[must_use]
pub fn issue_line(c: &ClassifiedIssue) -> String {
    let issue = &c.issue;
    let head = format!("{} #{}", checkbox(issue.is_closed()), issue.number);
    match (&issue.assignee, issue.is_closed()) {
        (Some(login), true) => format!("{head} **[@{login} did it! Cheers! 🍻]**"),
        (Some(login), false) => format!("{head} (@{login} is working on it)"),
        (None, _) => head,
    }
}

fn by_category<'a>(
    members: &[&'a ClassifiedIssue],
    taxonomy: &LabelTaxonomy,
) -> Vec<(String, Vec<&'a ClassifiedIssue>)> {
    let mut groups: Vec<(String, Vec<&'a ClassifiedIssue>)> = distinct(&taxonomy.categories)
        .into_iter()
        .map(|cat| {
            let group =
                members.iter().copied().filter(|c| c.category.as_deref() == Some(cat)).collect();
            (cat.to_string(), group)
        })
        .collect();
    groups.push((
        "Uncategorized".to_string(),
        members.iter().copied().filter(|c| c.category.is_none()).collect(),
    ));
    groups.retain(|(_, group)| !group.is_empty());
    groups
}
