//! Tests for the planning and onboarding pipelines

use issue_digest::core::models::IssueState;
use issue_digest::core::services::{OnboardOptions, PlanOptions, Reconciler, WritePolicy};

use crate::common::fakes::{FakeTracker, RecordingReporter, ScriptedConfirm, Write};
use crate::common::fixtures::{closed, issue, milestone, pull_request, render_ctx};

const AUTO: WritePolicy = WritePolicy {
    dry_run: false,
    auto_confirm: true,
};

fn plan_options() -> PlanOptions {
    PlanOptions {
        policy: AUTO,
        ..PlanOptions::default()
    }
}

fn created_body(tracker: &FakeTracker) -> String {
    match tracker.writes().first() {
        Some(Write::Create { body, .. }) => body.clone(),
        other => panic!("expected a create, got {other:?}"),
    }
}

// =============================================================================
// PLANNING
// =============================================================================

#[test]
fn test_plan_excludes_pull_requests_by_default() {
    let tracker = FakeTracker::new()
        .with_milestone(milestone(1, "v1.0.0"), vec![issue(1, &["bug"]), pull_request(2)]);
    let confirm = ScriptedConfirm::default();
    let reporter = RecordingReporter::default();

    let result = Reconciler::new(&tracker, &confirm, &reporter)
        .plan_milestone(1, &plan_options(), &render_ctx())
        .unwrap();

    assert_eq!(result.title, "Planning: v1.0.0");
    let body = created_body(&tracker);
    assert!(body.contains("- [ ] #1"));
    assert!(!body.contains("- [ ] #2"));
}

#[test]
fn test_plan_can_include_pull_requests() {
    let tracker = FakeTracker::new()
        .with_milestone(milestone(1, "v1.0.0"), vec![issue(1, &["bug"]), pull_request(2)]);
    let confirm = ScriptedConfirm::default();
    let reporter = RecordingReporter::default();
    let opts = PlanOptions {
        exclude_pr: false,
        ..plan_options()
    };

    Reconciler::new(&tracker, &confirm, &reporter)
        .plan_milestone(1, &opts, &render_ctx())
        .unwrap();

    assert!(created_body(&tracker).contains("- [ ] #2"));
}

#[test]
fn test_plan_title_template_and_label() {
    let tracker = FakeTracker::new().with_milestone(milestone(4, "v2.0"), vec![]);
    let confirm = ScriptedConfirm::default();
    let reporter = RecordingReporter::default();
    let opts = PlanOptions {
        target_label: "roadmap".to_string(),
        target_title: "Roadmap {title} #{number}".to_string(),
        ..plan_options()
    };

    Reconciler::new(&tracker, &confirm, &reporter)
        .plan_milestone(4, &opts, &render_ctx())
        .unwrap();

    let Some(Write::Create { title, labels, .. }) = tracker.writes().into_iter().next() else {
        panic!("expected a create");
    };
    assert_eq!(title, "Roadmap v2.0 #4");
    assert_eq!(labels, vec!["roadmap".to_string()]);
}

#[test]
fn test_plan_unknown_milestone_fails_without_writing() {
    let tracker = FakeTracker::new();
    let confirm = ScriptedConfirm::default();
    let reporter = RecordingReporter::default();

    let err = Reconciler::new(&tracker, &confirm, &reporter)
        .plan_milestone(9, &plan_options(), &render_ctx())
        .unwrap_err();

    assert!(format!("{err:#}").contains("failed to get milestone #9"));
    assert!(tracker.writes().is_empty());
}

#[test]
fn test_batch_continues_after_failure() {
    let mut tracker = FakeTracker::new()
        .with_milestone(milestone(1, "v1"), vec![issue(10, &[])])
        .with_milestone(milestone(2, "v2"), vec![issue(20, &[])])
        .with_milestone(milestone(3, "v3"), vec![issue(30, &[])]);
    tracker.failing_milestones.push(2);
    let confirm = ScriptedConfirm::default();
    let reporter = RecordingReporter::default();

    let runs = Reconciler::new(&tracker, &confirm, &reporter)
        .plan_open_milestones(&plan_options(), &render_ctx())
        .unwrap();

    let numbers: Vec<u64> = runs.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(runs[0].result.is_ok());
    assert!(runs[1].result.is_err());
    assert!(runs[2].result.is_ok());
    assert_eq!(tracker.writes().len(), 2);
    assert!(reporter.contains("error", "milestone #2 (v2)"));
    assert!(reporter.contains("info", "Found 3 open milestones"));
}

#[test]
fn test_batch_skips_closed_milestones() {
    let mut done = milestone(1, "v0.9");
    done.state = IssueState::Closed;
    let tracker = FakeTracker::new().with_milestone(done, vec![]);
    let confirm = ScriptedConfirm::default();
    let reporter = RecordingReporter::default();

    let runs = Reconciler::new(&tracker, &confirm, &reporter)
        .plan_open_milestones(&plan_options(), &render_ctx())
        .unwrap();

    assert!(runs.is_empty());
    assert!(reporter.contains("info", "No open milestones found"));
    assert!(tracker.writes().is_empty());
}

// =============================================================================
// ONBOARDING
// =============================================================================

#[test]
fn test_onboard_searches_labels_and_dedupes() {
    let shared = issue(1, &["help wanted", "good first issue"]);
    let tracker = FakeTracker::new().with_issues(vec![
        shared.clone(),
        shared,
        issue(2, &["good first issue", "bug"]),
        closed(3, &["help wanted"], "zoe"),
        issue(4, &["wontfix"]),
    ]);
    let confirm = ScriptedConfirm::default();
    let reporter = RecordingReporter::default();
    let opts = OnboardOptions {
        policy: AUTO,
        ..OnboardOptions::default()
    };

    let result = Reconciler::new(&tracker, &confirm, &reporter)
        .onboard(&opts, &render_ctx())
        .unwrap();

    assert_eq!(result.title, "Onboarding: Getting Started with Contributing");
    assert_eq!(
        *tracker.searches.borrow(),
        vec![vec!["help wanted".to_string(), "good first issue".to_string()]]
    );

    let Some(Write::Create { body, labels, .. }) = tracker.writes().into_iter().next() else {
        panic!("expected a create");
    };
    assert_eq!(labels, vec!["onboarding".to_string()]);
    assert!(body.contains("## Issue List (3)"));
    assert!(!body.contains("#4"));
    assert!(body.contains("@zoe"));
}

#[test]
fn test_onboard_dry_run_previews_only() {
    let tracker = FakeTracker::new().with_issues(vec![issue(1, &["help wanted"])]);
    let confirm = ScriptedConfirm::default();
    let reporter = RecordingReporter::default();
    let opts = OnboardOptions {
        policy: WritePolicy {
            dry_run: true,
            auto_confirm: false,
        },
        ..OnboardOptions::default()
    };

    Reconciler::new(&tracker, &confirm, &reporter)
        .onboard(&opts, &render_ctx())
        .unwrap();

    assert!(tracker.writes().is_empty());
    assert_eq!(reporter.previews().len(), 1);
    assert!(reporter.previews()[0].contains("- [ ] #1"));
}
