//! Wire types for the GitHub REST API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::{Issue, IssueState, Milestone};

#[derive(Debug, Deserialize)]
pub(super) struct ApiLabel {
    pub(super) name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiIssue {
    pub(super) number: u64,
    pub(super) title: String,
    pub(super) state: String,
    pub(super) html_url: String,
    #[serde(default)]
    pub(super) labels: Vec<ApiLabel>,
    #[serde(default)]
    pub(super) assignee: Option<ApiUser>,
    #[serde(default)]
    pub(super) pull_request: Option<serde_json::Value>,
}

impl From<ApiIssue> for Issue {
    fn from(api: ApiIssue) -> Self {
        // Pull requests come back from the issues endpoint with an issue-style
        // URL on some GitHub Enterprise versions; normalize so callers can
        // rely on "/pull/".
        let url = if api.pull_request.is_some() && !api.html_url.contains("/pull/") {
            api.html_url.replace("/issues/", "/pull/")
        } else {
            api.html_url
        };
        Self {
            number: api.number,
            title: api.title,
            state: parse_state(&api.state),
            url,
            labels: api.labels.into_iter().map(|l| l.name).collect(),
            assignee: api.assignee.map(|u| u.login),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiMilestone {
    pub(super) number: u64,
    pub(super) title: String,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) due_on: Option<DateTime<Utc>>,
    pub(super) state: String,
    pub(super) html_url: String,
}

impl From<ApiMilestone> for Milestone {
    fn from(api: ApiMilestone) -> Self {
        Self {
            number: api.number,
            title: api.title,
            description: api.description.unwrap_or_default(),
            due_on: api.due_on,
            state: parse_state(&api.state),
            url: api.html_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponse {
    pub(super) total_count: u64,
    #[serde(default)]
    pub(super) items: Vec<ApiIssue>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreatedIssue {
    pub(super) number: u64,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateIssueBody<'a> {
    pub(super) title: &'a str,
    pub(super) body: &'a str,
    pub(super) labels: &'a [String],
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateIssueBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) body: Option<&'a str>,
}

fn parse_state(state: &str) -> IssueState {
    state.parse().unwrap_or_default()
}
