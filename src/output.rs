//! Output formatting for human and JSON modes
//!
//! Progress and previews stream through the reporter while a command runs;
//! the types here are the final result a command prints.

use serde::Serialize;

use crate::core::services::{MilestoneRun, Outcome, Reconciled};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of one tracking-issue reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// created, updated, `dry_run`, declined or error
    pub action: &'static str,
    /// Tracking issue title
    pub title: String,
    /// Issue written, or the one that would have been updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<u64>,
    /// Link to the written issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Issues sharing the title that were left untouched
    pub duplicates: Vec<u64>,
    /// Milestone the digest was built from (batch planning)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
    /// Failure message (batch planning)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Reconciled> for ReconcileReport {
    fn from(reconciled: Reconciled) -> Self {
        let (action, issue_number, url) = match reconciled.outcome {
            Outcome::Created { number, url } => ("created", Some(number), Some(url)),
            Outcome::Updated { number, url } => ("updated", Some(number), Some(url)),
            Outcome::DryRun { target } => ("dry_run", target, None),
            Outcome::Declined { target } => ("declined", target, None),
        };
        Self {
            action,
            title: reconciled.title,
            issue_number,
            url,
            duplicates: reconciled.duplicates,
            milestone: None,
            error: None,
        }
    }
}

impl ReconcileReport {
    /// Render the result based on output mode
    ///
    /// Human mode prints nothing: the reporter already narrated the run.
    pub fn render(&self, mode: OutputMode) {
        if mode == OutputMode::Json {
            println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
        }
    }
}

/// Result of planning every open milestone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchReport {
    /// One entry per milestone, in processing order
    pub runs: Vec<ReconcileReport>,
}

impl BatchReport {
    /// Collect milestone runs, keeping failures as `error` entries
    #[must_use]
    pub fn from_runs(runs: Vec<MilestoneRun>) -> Self {
        let runs = runs
            .into_iter()
            .map(|run| match run.result {
                Ok(reconciled) => ReconcileReport {
                    milestone: Some(run.number),
                    ..ReconcileReport::from(reconciled)
                },
                Err(err) => ReconcileReport {
                    action: "error",
                    title: run.title,
                    issue_number: None,
                    url: None,
                    duplicates: Vec::new(),
                    milestone: Some(run.number),
                    error: Some(format!("{err:#}")),
                },
            })
            .collect();
        Self { runs }
    }

    /// Entries that failed
    pub fn failures(&self) -> impl Iterator<Item = &ReconcileReport> {
        self.runs.iter().filter(|r| r.error.is_some())
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.runs.is_empty() {
            return;
        }
        let failed = self.failures().count();
        println!();
        println!(
            "Processed {} milestone(s): {} succeeded, {failed} failed",
            self.runs.len(),
            self.runs.len() - failed
        );
        for run in self.failures() {
            println!(
                "  #{} {}: {}",
                run.milestone.unwrap_or_default(),
                run.title,
                run.error.as_deref().unwrap_or_default()
            );
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Known repositories and the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoListResult {
    /// Selected repository
    pub current: Option<String>,
    /// Known repositories
    pub repositories: Vec<String>,
}

impl RepoListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }

    fn render_human(&self) {
        if self.repositories.is_empty() {
            println!("No repositories found.");
            return;
        }
        println!("Managed repositories:");
        for repo in &self.repositories {
            let marker = if self.current.as_deref() == Some(repo.as_str()) { "*" } else { " " };
            println!("{marker} {repo}");
        }
    }
}

/// Whether a token is available and where it comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthStatusResult {
    /// A token was found
    pub authenticated: bool,
    /// Description of its source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl AuthStatusResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => match &self.source {
                Some(source) => println!("Logged in (token from {source})"),
                None => println!("Not logged in"),
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Successful operation with `message`
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
