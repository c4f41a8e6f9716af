//! Content renderer
//!
//! Deterministic markdown builders for tracking issue bodies. Each section
//! is a separate function returning its own block of text; a document is
//! its sections joined by blank lines. Nothing here reads the clock or the
//! environment, so identical input always yields byte-identical output.
//!
//! - [`planning`] - milestone planning digest
//! - [`onboarding`] - contributor onboarding digest

pub mod onboarding;
pub mod planning;

use chrono::{DateTime, Utc};

use crate::core::models::LabelTaxonomy;

/// Width of the progress bar in cells
pub const PROGRESS_WIDTH: usize = 20;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Inputs every document needs besides its issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// Browser URL of the repository, e.g. `https://github.com/owner/name`
    pub repo_url: String,
    /// Generation time shown in the footer
    pub generated_at: DateTime<Utc>,
}

impl RenderContext {
    /// Create a context
    #[must_use]
    pub fn new(repo_url: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            repo_url: repo_url.into().trim_end_matches('/').to_string(),
            generated_at,
        }
    }

    /// Issue search URL for `query` in this repository
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("{}/issues?q={encoded}", self.repo_url)
    }
}

/// Fixed-width bar followed by the whole-number percentage.
///
/// `0/0` renders an empty bar at `0%`.
#[must_use]
pub fn progress_bar(completed: usize, total: usize, width: usize) -> String {
    let (filled, percent) = if total == 0 {
        (0, 0)
    } else {
        let completed = completed.min(total);
        (completed * width / total, completed * 100 / total)
    };

    let mut bar = String::with_capacity(width * 3 + 6);
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, width - filled));
    bar.push_str(&format!(" {percent}%"));
    bar
}

/// Repeated `!` encoding a rank: the highest rank gets one mark per tier,
/// the unspecified sentinel gets none
#[must_use]
pub fn rank_marker(rank: usize, taxonomy: &LabelTaxonomy) -> String {
    "!".repeat(taxonomy.unspecified_rank().saturating_sub(rank))
}

/// `label:"name"` search qualifier
#[must_use]
pub fn label_qualifier(label: &str) -> String {
    format!("label:\"{label}\"")
}

/// Search clause matching any of `labels`; `None` when empty
#[must_use]
pub fn any_label_clause(labels: &[String]) -> Option<String> {
    match labels {
        [] => None,
        [only] => Some(label_qualifier(only)),
        many => Some(format!(
            "({})",
            many.iter().map(|l| label_qualifier(l)).collect::<Vec<_>>().join(" OR ")
        )),
    }
}

/// Search clause excluding every one of `labels`
#[must_use]
pub fn exclude_labels_clause(labels: &[String]) -> String {
    labels.iter().map(|l| format!("-{}", label_qualifier(l))).collect::<Vec<_>>().join(" ")
}

/// Join non-empty query parts with spaces
#[must_use]
pub fn query(parts: &[&str]) -> String {
    parts.iter().filter(|p| !p.is_empty()).copied().collect::<Vec<_>>().join(" ")
}

/// Long-form date, e.g. "February 28, 2025"
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Footer timestamp, e.g. "January 30, 2025 15:04 UTC"
#[must_use]
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y %H:%M UTC").to_string()
}

/// Markdown checkbox for an issue state
#[must_use]
pub const fn checkbox(closed: bool) -> &'static str {
    if closed { "- [x]" } else { "- [ ]" }
}

/// Closing block shared by all documents
#[must_use]
pub fn footer(ctx: &RenderContext) -> String {
    format!(
        "---\n\n> 🤖 Auto-generated by issue-digest. DO NOT EDIT.\n> Last Updated: {}",
        format_timestamp(&ctx.generated_at)
    )
}

/// Join sections with blank lines and finish with a newline
#[must_use]
pub fn assemble(sections: Vec<String>) -> String {
    let mut doc = sections
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    doc.push('\n');
    doc
}

/// Category labels in taxonomy order with exact duplicates dropped
fn distinct(labels: &[String]) -> Vec<&str> {
    let mut seen = Vec::with_capacity(labels.len());
    for label in labels {
        if !seen.contains(&label.as_str()) {
            seen.push(label.as_str());
        }
    }
    seen
}
