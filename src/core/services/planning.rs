//! Milestone planning pipeline
//!
//! fetch milestone + issues -> drop pull requests -> classify -> aggregate
//! -> render -> reconcile `Planning: <milestone>`.

use anyhow::Context;
use log::debug;

use crate::core::models::{Issue, LabelTaxonomy, Milestone};

use super::aggregator::aggregate;
use super::classifier::classify_all;
use super::reconciler::{Reconciled, Reconciler, TrackingRequest, WritePolicy};
use super::render::RenderContext;
use super::render::planning::{PlanningInput, render};

/// Default label of planning issues
pub const DEFAULT_TARGET_LABEL: &str = "planning";

/// Default planning issue title template
pub const DEFAULT_TARGET_TITLE: &str = "Planning: {title}";

/// Planning configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    /// Label that marks planning issues
    pub target_label: String,
    /// Title template; `{title}`, `{number}` and `{state}` are filled from
    /// the milestone
    pub target_title: String,
    /// Category labels and priority labels (highest first)
    pub taxonomy: LabelTaxonomy,
    /// Leave pull requests out of the digest
    pub exclude_pr: bool,
    /// Dry run / auto confirm
    pub policy: WritePolicy,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            target_label: DEFAULT_TARGET_LABEL.to_string(),
            target_title: DEFAULT_TARGET_TITLE.to_string(),
            taxonomy: LabelTaxonomy::new(
                ["bug", "documentation", "enhancement"],
                ["priority/high", "priority/medium", "priority/low"],
            ),
            exclude_pr: true,
            policy: WritePolicy::default(),
        }
    }
}

/// Fill a title template from milestone fields
#[must_use]
pub fn expand_title(template: &str, milestone: &Milestone) -> String {
    template
        .replace("{title}", &milestone.title)
        .replace("{number}", &milestone.number.to_string())
        .replace("{state}", &milestone.state.to_string())
}

/// Classify, aggregate and render a milestone's issues
#[must_use]
pub fn planning_content(
    ctx: &RenderContext,
    milestone: &Milestone,
    issues: &[Issue],
    taxonomy: &LabelTaxonomy,
) -> String {
    let classified = classify_all(issues, taxonomy);
    let stats = aggregate(issues);
    render(
        ctx,
        &PlanningInput {
            milestone,
            issues: &classified,
            stats: &stats,
            taxonomy,
        },
    )
}

/// One milestone's result within a batch run
#[derive(Debug)]
pub struct MilestoneRun {
    /// Milestone number
    pub number: u64,
    /// Milestone title
    pub title: String,
    /// Reconciliation result; errors are kept, not propagated
    pub result: anyhow::Result<Reconciled>,
}

impl Reconciler<'_> {
    /// Reconcile the planning issue of one milestone by number
    pub fn plan_milestone(
        &self,
        number: u64,
        opts: &PlanOptions,
        ctx: &RenderContext,
    ) -> anyhow::Result<Reconciled> {
        debug!("Updating planning issue for milestone #{number}");
        let milestone = self
            .tracker
            .milestone(number)
            .with_context(|| format!("failed to get milestone #{number}"))?;
        debug!("Found milestone: {} (#{})", milestone.title, milestone.number);
        self.plan(&milestone, opts, ctx)
    }

    /// Reconcile the planning issue of an already fetched milestone
    pub fn plan(
        &self,
        milestone: &Milestone,
        opts: &PlanOptions,
        ctx: &RenderContext,
    ) -> anyhow::Result<Reconciled> {
        let mut issues = self
            .tracker
            .milestone_issues(milestone.number)
            .with_context(|| format!("failed to get issues of milestone #{}", milestone.number))?;
        debug!("Found {} issues in milestone", issues.len());

        if opts.exclude_pr {
            issues.retain(|issue| !self.tracker.is_pull_request(issue));
            debug!("{} issues left after excluding pull requests", issues.len());
        }

        let body = planning_content(ctx, milestone, &issues, &opts.taxonomy);
        debug!("Generated planning content with {} bytes", body.len());

        let request = TrackingRequest {
            kind: "planning",
            title: expand_title(&opts.target_title, milestone),
            label: opts.target_label.clone(),
            body,
        };
        self.reconcile(&request, opts.policy)
    }

    /// Reconcile every open milestone.
    ///
    /// Listing failures abort; a failure on one milestone is reported and
    /// the loop moves on to the next.
    pub fn plan_open_milestones(
        &self,
        opts: &PlanOptions,
        ctx: &RenderContext,
    ) -> anyhow::Result<Vec<MilestoneRun>> {
        let milestones = self.tracker.open_milestones().context("failed to list open milestones")?;

        if milestones.is_empty() {
            self.reporter.info("No open milestones found");
            return Ok(Vec::new());
        }
        self.reporter.info(&format!("Found {} open milestones", milestones.len()));

        let mut runs = Vec::with_capacity(milestones.len());
        for milestone in milestones {
            let result = self.plan(&milestone, opts, ctx);
            if let Err(err) = &result {
                self.reporter.error(&format!(
                    "Failed to update planning for milestone #{} ({}): {err:#}",
                    milestone.number, milestone.title
                ));
            }
            runs.push(MilestoneRun {
                number: milestone.number,
                title: milestone.title,
                result,
            });
        }
        Ok(runs)
    }
}
