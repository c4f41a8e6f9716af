//! Tests for the milestone planning document

use chrono::{TimeZone, Utc};
use issue_digest::core::models::{Issue, LabelTaxonomy};
use issue_digest::core::services::aggregate;
use issue_digest::core::services::planning::planning_content;

use crate::common::fixtures::{closed, issue, milestone, milestone_due, render_ctx};

fn taxonomy() -> LabelTaxonomy {
    LabelTaxonomy::new(
        ["bug", "enhancement", "documentation"],
        ["priority-high", "priority-medium", "priority-low"],
    )
}

fn release_issues() -> Vec<Issue> {
    vec![
        closed(1, &["bug", "priority-high"], "user1"),
        issue(2, &["enhancement", "priority-medium"]).with_assignee("user2"),
        issue(3, &["question", "priority-low"]),
    ]
}

// =============================================================================
// END-TO-END DOCUMENT
// =============================================================================

#[test]
fn test_release_milestone_document() {
    let mut v1 = milestone_due(1, "v1.0.0", Utc.with_ymd_and_hms(2025, 2, 28, 8, 0, 0).unwrap());
    v1.description = "First stable release".to_string();
    let issues = release_issues();

    let stats = aggregate(&issues);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert!((stats.progress() - 33.3).abs() < 0.1);
    assert_eq!(stats.contributors, ["user1"]);

    let doc = planning_content(&render_ctx(), &v1, &issues, &taxonomy());
    let (head, tail) = doc.split_once("## Links").unwrap();

    let expected_head = "\
## Overview

- Progress: ██████░░░░░░░░░░░░░░ 33%
- Total Issues: 3
  - ✅ Completed: 1
  - 🚧 In Progress: 1
  - 📋 Unassigned: 1
- Due Date: February 28, 2025
- Data comes from [Milestone #1](https://github.com/octo/widgets/milestone/1)

## Description

First stable release

## High Priority Tasks

> Issues labeled `priority-high` and `priority-medium`.

- [x] !!! #1 (@user1) `bug` `priority-high`
- [ ] !! #2 (@user2) `enhancement` `priority-medium`

## Tasks by Category

### bug (1)

- [x] !!! #1 (@user1) `bug` `priority-high`

### enhancement (1)

- [ ] !! #2 (@user2) `enhancement` `priority-medium`

### Uncategorized (1)

- [ ] ! #3 `priority-low` `question`

## Contributors

Thanks to all our contributors for their efforts on completed issues:

- @user1

";
    assert_eq!(head, expected_head);

    assert!(tail.contains("- 📋 [Issues without priority](https://github.com/octo/widgets/issues?q="));
    assert!(tail.contains("milestone%3A%22v1.0.0%22"));
    assert!(tail.contains("-label%3A%22priority-low%22"));
    assert!(tail.contains("no%3Aassignee"));
    assert!(tail.contains("- 📊 [All milestone issues](https://github.com/octo/widgets/milestone/1)"));
    assert!(tail.ends_with(
        "---\n\n> 🤖 Auto-generated by issue-digest. DO NOT EDIT.\n\
         > Last Updated: January 30, 2025 15:04 UTC\n"
    ));
}

#[test]
fn test_document_is_deterministic() {
    let v1 = milestone(1, "v1.0.0");
    let issues = release_issues();
    let mut shuffled = issues.clone();
    shuffled.reverse();

    let first = planning_content(&render_ctx(), &v1, &issues, &taxonomy());
    let second = planning_content(&render_ctx(), &v1, &issues, &taxonomy());
    let reordered = planning_content(&render_ctx(), &v1, &shuffled, &taxonomy());
    assert_eq!(first, second);
    assert_eq!(first, reordered);
}

// =============================================================================
// SECTION RULES
// =============================================================================

#[test]
fn test_categories_follow_taxonomy_order() {
    let issues = vec![
        issue(1, &["documentation"]),
        issue(2, &["enhancement"]),
        issue(3, &["bug"]),
        issue(4, &[]),
    ];
    let doc = planning_content(&render_ctx(), &milestone(1, "v1"), &issues, &taxonomy());
    let positions: Vec<usize> = ["### bug", "### enhancement", "### documentation", "### Uncategorized"]
        .iter()
        .map(|h| doc.find(h).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{doc}");
}

#[test]
fn test_category_sorted_by_rank_then_number() {
    let issues = vec![
        issue(9, &["bug", "priority-low"]),
        issue(4, &["bug"]),
        issue(7, &["bug", "priority-high"]),
        issue(2, &["bug", "priority-low"]),
    ];
    let doc = planning_content(&render_ctx(), &milestone(1, "v1"), &issues, &taxonomy());
    let section = doc.split("### bug (4)").nth(1).unwrap();
    let order: Vec<usize> = ["#7", "#2", "#9", "#4"].iter().map(|n| section.find(n).unwrap()).collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]), "{section}");
}

#[test]
fn test_missing_description_and_due_date() {
    let doc = planning_content(&render_ctx(), &milestone(1, "v1"), &[], &taxonomy());
    assert!(doc.contains("- Due Date: No due date"));
    assert!(doc.contains("## Description\n\n_No description provided._"));
    assert!(doc.contains("- Progress: ░░░░░░░░░░░░░░░░░░░░ 0%"));
    assert!(doc.contains("## Tasks by Category\n\n_No issues in this milestone yet._"));
    assert!(!doc.contains("## High Priority Tasks"));
    assert!(!doc.contains("## Contributors"));
}

#[test]
fn test_high_priority_needs_two_tiers() {
    let single = LabelTaxonomy::new(["bug"], ["urgent"]);
    let doc = planning_content(
        &render_ctx(),
        &milestone(1, "v1"),
        &[issue(1, &["bug", "urgent"])],
        &single,
    );
    assert!(!doc.contains("## High Priority Tasks"));
    assert!(doc.contains("- [ ] ! #1 `bug` `urgent`"));
}

#[test]
fn test_label_match_is_case_insensitive_but_rendered_as_given() {
    let doc = planning_content(
        &render_ctx(),
        &milestone(1, "v1"),
        &[issue(5, &["Bug", "Priority-High"])],
        &taxonomy(),
    );
    assert!(doc.contains("### bug (1)"));
    assert!(doc.contains("- [ ] !!! #5 `Bug` `Priority-High`"));
}
