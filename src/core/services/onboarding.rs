//! Contributor onboarding pipeline
//!
//! search issues carrying any onboarding label -> dedupe -> classify by
//! difficulty and category -> aggregate -> render -> reconcile.

use std::collections::HashSet;

use anyhow::Context;
use log::debug;

use crate::core::models::{Issue, LabelTaxonomy};

use super::aggregator::aggregate;
use super::classifier::classify_all;
use super::reconciler::{Reconciled, Reconciler, TrackingRequest, WritePolicy};
use super::render::RenderContext;
use super::render::onboarding::{OnboardingInput, render};

/// Default label of the onboarding issue
pub const DEFAULT_TARGET_LABEL: &str = "onboarding";

/// Default onboarding issue title
pub const DEFAULT_TARGET_TITLE: &str = "Onboarding: Getting Started with Contributing";

/// Onboarding configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardOptions {
    /// Labels that mark issues suitable for newcomers (any-of)
    pub onboard_labels: Vec<String>,
    /// Category labels and difficulty labels (easiest first)
    pub taxonomy: LabelTaxonomy,
    /// Label that marks the onboarding issue
    pub target_label: String,
    /// Title of the onboarding issue
    pub target_title: String,
    /// Dry run / auto confirm
    pub policy: WritePolicy,
}

impl Default for OnboardOptions {
    fn default() -> Self {
        Self {
            onboard_labels: vec!["help wanted".to_string(), "good first issue".to_string()],
            taxonomy: LabelTaxonomy::new(
                ["bug", "enhancement", "documentation"],
                ["good first issue", "help wanted"],
            ),
            target_label: DEFAULT_TARGET_LABEL.to_string(),
            target_title: DEFAULT_TARGET_TITLE.to_string(),
            policy: WritePolicy::default(),
        }
    }
}

/// Drop repeated issue numbers, keeping the first occurrence
#[must_use]
pub fn dedupe(issues: Vec<Issue>) -> Vec<Issue> {
    let mut seen = HashSet::with_capacity(issues.len());
    issues.into_iter().filter(|issue| seen.insert(issue.number)).collect()
}

/// Classify, aggregate and render onboarding issues
#[must_use]
pub fn onboarding_content(ctx: &RenderContext, issues: &[Issue], opts: &OnboardOptions) -> String {
    let classified = classify_all(issues, &opts.taxonomy);
    let stats = aggregate(issues);
    render(
        ctx,
        &OnboardingInput {
            onboard_labels: &opts.onboard_labels,
            issues: &classified,
            stats: &stats,
            taxonomy: &opts.taxonomy,
        },
    )
}

impl Reconciler<'_> {
    /// Reconcile the onboarding issue
    pub fn onboard(&self, opts: &OnboardOptions, ctx: &RenderContext) -> anyhow::Result<Reconciled> {
        debug!("Onboard labels: [{}]", opts.onboard_labels.join(", "));
        let issues = self
            .tracker
            .issues_with_any_label(&opts.onboard_labels)
            .context("failed to search onboarding issues")?;
        let issues = dedupe(issues);
        debug!("Found {} onboarding issues", issues.len());

        let body = onboarding_content(ctx, &issues, opts);
        debug!("Generated onboarding content with {} bytes", body.len());

        let request = TrackingRequest {
            kind: "onboarding",
            title: opts.target_title.clone(),
            label: opts.target_label.clone(),
            body,
        };
        self.reconcile(&request, opts.policy)
    }
}
