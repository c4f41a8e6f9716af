//! Tests for the contributor onboarding document

use issue_digest::core::services::OnboardOptions;
use issue_digest::core::services::onboarding::onboarding_content;

use crate::common::fixtures::{closed, issue, render_ctx};

fn position(doc: &str, needle: &str) -> usize {
    doc.find(needle).unwrap_or_else(|| panic!("{needle:?} missing from:\n{doc}"))
}

#[test]
fn test_groups_by_difficulty_then_category() {
    let issues = vec![
        issue(1, &["help wanted", "documentation"]),
        issue(2, &["good first issue", "bug"]),
        issue(3, &["help wanted", "bug"]),
        issue(4, &["help wanted"]),
        issue(5, &["good first issue", "enhancement"]),
    ];
    let doc = onboarding_content(&render_ctx(), &issues, &OnboardOptions::default());

    assert!(doc.contains("## Issue List (5)"));
    let headings = [
        "### Difficulty: good first issue (2)",
        "#### Category: bug (1)",
        "#### Category: enhancement (1)",
        "### Difficulty: help wanted (3)",
        "#### Category: bug (1)\n\n- [ ] #3",
        "#### Category: documentation (1)",
        "#### Category: Uncategorized (1)",
    ];
    let positions: Vec<usize> = headings.iter().map(|h| position(&doc, h)).collect();
    // "bug (1)" appears in both tiers; compare the distinct ones only
    assert!(positions[0] < positions[1]);
    assert!(positions[1] < positions[2]);
    assert!(positions[2] < positions[3]);
    assert!(positions[3] < positions[4]);
    assert!(positions[4] < positions[5]);
    assert!(positions[5] < positions[6]);
    assert!(!doc.contains("Difficulty: Unspecified"));
}

#[test]
fn test_unspecified_difficulty_last() {
    let issues = vec![issue(8, &["help wanted", "bug"]), issue(9, &["bug"])];
    let doc = onboarding_content(&render_ctx(), &issues, &OnboardOptions::default());
    assert!(position(&doc, "### Difficulty: help wanted (1)") < position(&doc, "### Difficulty: Unspecified (1)"));
}

#[test]
fn test_open_before_closed_within_group() {
    let issues = vec![
        closed(1, &["good first issue", "bug"], "alice"),
        issue(7, &["good first issue", "bug"]).with_assignee("bob"),
        issue(3, &["good first issue", "bug"]),
    ];
    let doc = onboarding_content(&render_ctx(), &issues, &OnboardOptions::default());
    let expected = "#### Category: bug (3)\n\n\
                    - [ ] #3\n\
                    - [ ] #7 (@bob is working on it)\n\
                    - [x] #1 **[@alice did it! Cheers! 🍻]**";
    assert!(doc.contains(expected), "{doc}");
}

#[test]
fn test_overview_and_contributors() {
    let issues = vec![
        closed(1, &["good first issue"], "zoe"),
        closed(2, &["good first issue"], "adam"),
        issue(3, &["help wanted"]).with_assignee("zoe"),
        issue(4, &["help wanted"]),
    ];
    let doc = onboarding_content(&render_ctx(), &issues, &OnboardOptions::default());

    assert!(doc.contains("- Progress: ██████████░░░░░░░░░░ 50%"));
    assert!(doc.contains("- [Total Issues: 4]("));
    assert!(doc.contains("  - ✅ [Completed: 2]("));
    assert!(doc.contains("  - 🚧 [In Progress: 1]("));
    assert!(doc.contains("  - 📋 [Unassigned: 1]("));
    assert!(doc.contains("## Contributors (2)"));
    assert!(doc.contains("\n\n@adam @zoe\n\n"));
    assert!(position(&doc, "## Issue List") < position(&doc, "## Contributors"));
    assert!(position(&doc, "## Contributors") < position(&doc, "## Links"));
}

#[test]
fn test_links_use_onboard_labels() {
    let doc = onboarding_content(&render_ctx(), &[], &OnboardOptions::default());
    // (label:"help wanted" OR label:"good first issue")
    assert!(doc.contains("%28label%3A%22help+wanted%22+OR+label%3A%22good+first+issue%22%29"));
    assert!(doc.contains("- 🏷️ [Issues without difficulty]("));
    assert!(doc.contains("## Issue List (0)"));
    assert!(!doc.contains("## Contributors"));
    assert!(doc.ends_with("> Last Updated: January 30, 2025 15:04 UTC\n"));
}
