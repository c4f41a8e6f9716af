//! Reconciler
//!
//! Decides between create, update and no write for a tracking issue:
//!
//! ```text
//! resolve target -> preview -> dry run?     -> skipped
//!                            -> auto confirm -> write
//!                            -> ask          -> write | declined
//! ```
//!
//! Content is always previewed before any write. A dry run never writes,
//! whatever the confirmation settings say.

use anyhow::Context;
use log::debug;
use serde::Serialize;

use crate::core::error::InputError;
use crate::core::ports::{Confirm, IssueTracker, Reporter};

use super::resolver::{Resolution, resolve};

const PROCEED_PROMPT: &str = "Do you want to proceed with the update?";

/// How much the user has pre-authorized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WritePolicy {
    /// Render and preview only
    pub dry_run: bool,
    /// Write without asking
    pub auto_confirm: bool,
}

/// What to do after the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Do not write (dry run)
    Skip,
    /// Write without asking
    Proceed,
    /// Ask the user first
    Ask,
}

impl WritePolicy {
    /// Dry run beats auto confirm beats asking
    #[must_use]
    pub const fn decide(self) -> Decision {
        if self.dry_run {
            Decision::Skip
        } else if self.auto_confirm {
            Decision::Proceed
        } else {
            Decision::Ask
        }
    }
}

/// Desired state of one tracking issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingRequest {
    /// Human name of the digest ("planning", "onboarding") used in messages
    pub kind: &'static str,
    /// Title used both to find the existing issue and to write it
    pub title: String,
    /// Label carried by tracking issues of this kind
    pub label: String,
    /// Rendered body
    pub body: String,
}

/// What happened to the tracking issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Outcome {
    /// A new issue was created
    Created {
        /// New issue number
        number: u64,
        /// Link to it
        url: String,
    },
    /// The existing issue was overwritten
    Updated {
        /// Issue number
        number: u64,
        /// Link to it
        url: String,
    },
    /// Preview only
    DryRun {
        /// Issue that would have been updated
        target: Option<u64>,
    },
    /// The user said no
    Declined {
        /// Issue that would have been updated
        target: Option<u64>,
    },
}

impl Outcome {
    /// Whether a write happened
    #[must_use]
    pub const fn wrote(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::Updated { .. })
    }
}

/// Result of reconciling one tracking issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciled {
    /// Tracking issue title
    pub title: String,
    /// What happened
    #[serde(flatten)]
    pub outcome: Outcome,
    /// Other issues sharing the title, left untouched
    pub duplicates: Vec<u64>,
}

/// Runs digest pipelines against a tracker
///
/// The planning and onboarding pipelines are implemented as further
/// `impl Reconciler` blocks in their own modules.
#[derive(Clone, Copy)]
pub struct Reconciler<'a> {
    pub(super) tracker: &'a dyn IssueTracker,
    pub(super) confirm: &'a dyn Confirm,
    pub(super) reporter: &'a dyn Reporter,
}

impl std::fmt::Debug for Reconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler").finish_non_exhaustive()
    }
}

impl<'a> Reconciler<'a> {
    /// Wire up a reconciler
    #[must_use]
    pub fn new(
        tracker: &'a dyn IssueTracker,
        confirm: &'a dyn Confirm,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            tracker,
            confirm,
            reporter,
        }
    }

    /// Bring the remote tracking issue in line with `request`
    pub fn reconcile(
        &self,
        request: &TrackingRequest,
        policy: WritePolicy,
    ) -> anyhow::Result<Reconciled> {
        if request.title.trim().is_empty() {
            return Err(InputError::EmptyTitle.into());
        }
        let kind = request.kind;

        let candidates = self
            .tracker
            .issues_with_label(&request.label)
            .with_context(|| format!("failed to get existing {kind} issues"))?;
        debug!("Found {} existing issues with label '{}'", candidates.len(), request.label);

        let resolution = resolve(&candidates, &request.title);
        self.announce(request, &resolution);

        self.reporter.preview(&format!("Preview of the {kind} content:"), &request.body);

        let target = resolution.target.as_ref().map(|t| t.number);
        let outcome = match policy.decide() {
            Decision::Skip => {
                self.reporter.warn("Dry-run mode, skipping update");
                Outcome::DryRun { target }
            },
            Decision::Proceed => {
                self.reporter.warn("Auto-confirm is enabled, skipping confirmation");
                self.write(request, target)?
            },
            Decision::Ask => {
                match target {
                    None => self.reporter.info(&format!(
                        "Will create a new {kind} issue with the above content"
                    )),
                    Some(number) => self.reporter.info(&format!(
                        "Will update existing {kind} issue ({}) with the above content",
                        self.tracker.issue_url(number)
                    )),
                }
                if self.confirm.confirm(PROCEED_PROMPT)? {
                    self.write(request, target)?
                } else {
                    self.reporter.info("Update cancelled");
                    Outcome::Declined { target }
                }
            },
        };

        Ok(Reconciled {
            title: request.title.clone(),
            outcome,
            duplicates: resolution.duplicates,
        })
    }

    fn announce(&self, request: &TrackingRequest, resolution: &Resolution) {
        let kind = request.kind;
        match &resolution.target {
            None => self.reporter.info(&format!("Creating new {kind} issue '{}'", request.title)),
            Some(target) => {
                if resolution.has_duplicates() {
                    let others = resolution
                        .duplicates
                        .iter()
                        .map(|n| format!("#{n}"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.reporter.warn(&format!(
                        "Found multiple {kind} issues titled '{}', will update #{} and ignore {others}",
                        request.title, target.number
                    ));
                }
                self.reporter
                    .info(&format!("Updating existing {kind} issue #{} '{}'", target.number, request.title));
            },
        }
    }

    fn write(&self, request: &TrackingRequest, target: Option<u64>) -> anyhow::Result<Outcome> {
        let kind = request.kind;
        let outcome = match target {
            None => {
                let number = self
                    .tracker
                    .create_issue(&request.title, &request.body, std::slice::from_ref(&request.label))
                    .with_context(|| format!("failed to create {kind} issue"))?;
                let url = self.tracker.issue_url(number);
                self.reporter.success(&format!("Successfully created {kind} issue #{number}"));
                Outcome::Created { number, url }
            },
            Some(number) => {
                self.tracker
                    .update_issue(number, Some(&request.title), Some(&request.body))
                    .with_context(|| format!("failed to update {kind} issue #{number}"))?;
                let url = self.tracker.issue_url(number);
                self.reporter.success(&format!("Successfully updated {kind} issue #{number}"));
                Outcome::Updated { number, url }
            },
        };
        if let Outcome::Created { url, .. } | Outcome::Updated { url, .. } = &outcome {
            self.reporter.detail(&format!("Issue URL: {url}"));
        }
        Ok(outcome)
    }
}
