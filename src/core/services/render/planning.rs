//! Milestone planning document
//!
//! Sections, in order: overview, description, high priority tasks, tasks by
//! category, contributors, links, footer.

use crate::core::models::{LabelTaxonomy, Milestone};
use crate::core::services::aggregator::Stats;
use crate::core::services::classifier::ClassifiedIssue;

use super::{
    PROGRESS_WIDTH, RenderContext, assemble, checkbox, distinct, exclude_labels_clause,
    footer, format_date, progress_bar, query, rank_marker,
};

/// Number of leading priority tiers listed under "High Priority Tasks"
pub const HIGH_PRIORITY_TIERS: usize = 2;

/// Everything a planning document is built from
#[derive(Debug, Clone, Copy)]
pub struct PlanningInput<'a> {
    /// Milestone being summarized
    pub milestone: &'a Milestone,
    /// Its issues, already classified against `taxonomy`
    pub issues: &'a [ClassifiedIssue],
    /// Aggregate statistics over `issues`
    pub stats: &'a Stats,
    /// Category and priority labels
    pub taxonomy: &'a LabelTaxonomy,
}

/// Render the full planning document
#[must_use]
pub fn render(ctx: &RenderContext, input: &PlanningInput<'_>) -> String {
    assemble(vec![
        overview(input),
        description(input.milestone),
        high_priority(input),
        by_category(input),
        contributors(input.stats),
        links(ctx, input),
        footer(ctx),
    ])
}

/// Progress, counts, due date and source link
#[must_use]
pub fn overview(input: &PlanningInput<'_>) -> String {
    let stats = input.stats;
    let due = input.milestone.due_on.as_ref().map_or_else(|| "No due date".to_string(), format_date);
    [
        "## Overview".to_string(),
        String::new(),
        format!("- Progress: {}", progress_bar(stats.completed, stats.total, PROGRESS_WIDTH)),
        format!("- Total Issues: {}", stats.total),
        format!("  - ✅ Completed: {}", stats.completed),
        format!("  - 🚧 In Progress: {}", stats.in_progress),
        format!("  - 📋 Unassigned: {}", stats.unassigned),
        format!("- Due Date: {due}"),
        format!(
            "- Data comes from [Milestone #{}]({})",
            input.milestone.number, input.milestone.url
        ),
    ]
    .join("\n")
}

/// Milestone description
#[must_use]
pub fn description(milestone: &Milestone) -> String {
    let text = milestone.description.trim();
    let text = if text.is_empty() { "_No description provided._" } else { text };
    format!("## Description\n\n{text}")
}

/// Issues in the top priority tiers, by rank then number.
///
/// Empty when fewer than two priority labels are configured or nothing
/// qualifies.
#[must_use]
pub fn high_priority(input: &PlanningInput<'_>) -> String {
    let ranks = &input.taxonomy.ranks;
    if ranks.len() < HIGH_PRIORITY_TIERS {
        return String::new();
    }

    let mut selected: Vec<&ClassifiedIssue> =
        input.issues.iter().filter(|c| c.rank < HIGH_PRIORITY_TIERS).collect();
    if selected.is_empty() {
        return String::new();
    }
    sort_by_rank(&mut selected);

    let tiers = ranks[..HIGH_PRIORITY_TIERS]
        .iter()
        .map(|r| format!("`{r}`"))
        .collect::<Vec<_>>()
        .join(" and ");
    let mut lines = vec![
        "## High Priority Tasks".to_string(),
        String::new(),
        format!("> Issues labeled {tiers}."),
        String::new(),
    ];
    lines.extend(selected.iter().map(|c| issue_line(c, input.taxonomy)));
    lines.join("\n")
}

/// One subsection per non-empty category in taxonomy order, then
/// "Uncategorized"
#[must_use]
pub fn by_category(input: &PlanningInput<'_>) -> String {
    let mut blocks = vec!["## Tasks by Category".to_string()];

    let mut groups: Vec<(&str, Vec<&ClassifiedIssue>)> = distinct(&input.taxonomy.categories)
        .into_iter()
        .map(|cat| {
            let members =
                input.issues.iter().filter(|c| c.category.as_deref() == Some(cat)).collect();
            (cat, members)
        })
        .collect();
    groups.push(("Uncategorized", input.issues.iter().filter(|c| c.category.is_none()).collect()));

    for (name, mut members) in groups {
        if members.is_empty() {
            continue;
        }
        sort_by_rank(&mut members);
        let mut lines = vec![format!("### {name} ({})", members.len()), String::new()];
        lines.extend(members.iter().map(|c| issue_line(c, input.taxonomy)));
        blocks.push(lines.join("\n"));
    }

    if blocks.len() == 1 {
        blocks.push("_No issues in this milestone yet._".to_string());
    }
    blocks.join("\n\n")
}

/// Thanks to assignees of completed issues; empty when there are none
#[must_use]
pub fn contributors(stats: &Stats) -> String {
    if stats.contributors.is_empty() {
        return String::new();
    }
    let mut lines = vec![
        "## Contributors".to_string(),
        String::new(),
        "Thanks to all our contributors for their efforts on completed issues:".to_string(),
        String::new(),
    ];
    lines.extend(stats.contributors.iter().map(|login| format!("- @{login}")));
    lines.join("\n")
}

/// Deep links back into the tracker
#[must_use]
pub fn links(ctx: &RenderContext, input: &PlanningInput<'_>) -> String {
    let milestone = format!("milestone:\"{}\"", input.milestone.title);
    let no_priority = exclude_labels_clause(&input.taxonomy.ranks);
    [
        "## Links".to_string(),
        String::new(),
        format!(
            "- 📋 [Issues without priority]({})",
            ctx.search_url(&query(&["is:open is:issue", milestone.as_str(), no_priority.as_str()]))
        ),
        format!(
            "- 👥 [Unassigned issues]({})",
            ctx.search_url(&query(&["is:open is:issue", milestone.as_str(), "no:assignee"]))
        ),
        format!(
            "- 📊 [All milestone issues]({}/milestone/{})",
            ctx.repo_url, input.milestone.number
        ),
    ]
    .join("\n")
}

/// Checkbox, rank marker, number, assignee and labels of one issue
#[must_use]
pub fn issue_line(c: &ClassifiedIssue, taxonomy: &LabelTaxonomy) -> String {
    let mut line = checkbox(c.issue.is_closed()).to_string();
    let marker = rank_marker(c.rank, taxonomy);
    if !marker.is_empty() {
        line.push(' ');
        line.push_str(&marker);
    }
    line.push_str(&format!(" #{}", c.issue.number));
    if let Some(login) = &c.issue.assignee {
        line.push_str(&format!(" (@{login})"));
    }
    for label in &c.issue.labels {
        line.push_str(&format!(" `{label}`"));
    }
    line
}

fn sort_by_rank(issues: &mut [&ClassifiedIssue]) {
    issues.sort_by_key(|c| (c.rank, c.issue.number));
}
