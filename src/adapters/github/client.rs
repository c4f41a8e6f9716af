//! Blocking GitHub REST client

use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT};
use serde::de::DeserializeOwned;

use super::error::{GithubError, truncate_body};
use super::types::{
    ApiIssue, ApiMilestone, CreateIssueBody, CreatedIssue, SearchResponse, UpdateIssueBody,
};
use crate::core::models::{Issue, Milestone, RepoRef};
use crate::core::ports::IssueTracker;

/// Default REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default browser endpoint
pub const DEFAULT_WEB_URL: &str = "https://github.com";

const PER_PAGE: usize = 100;

/// The search API never returns more than this many results
const SEARCH_RESULT_CAP: usize = 1000;

const BASE_RETRY_DELAY_MS: u64 = 500;
const MAX_RETRY_DELAY_MS: u64 = 10_000;

/// Connection settings for [`GithubClient`]
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// REST endpoint, e.g. `https://api.github.com`
    pub api_url: String,
    /// Browser endpoint, e.g. `https://github.com`
    pub web_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Attempts for read requests, including the first
    pub max_attempts: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            web_url: DEFAULT_WEB_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_attempts: 3,
        }
    }
}

/// GitHub issue tracker for one repository
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_url: String,
    web_url: String,
    repo: RepoRef,
    max_attempts: u32,
}

impl GithubClient {
    /// Build a client authenticated with `token`
    pub fn new(repo: RepoRef, token: &str, settings: &ClientSettings) -> Result<Self, GithubError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(GithubError::MissingToken);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("issue-digest/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static("2022-11-28"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| GithubError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(GithubError::Client)?;

        Ok(Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            web_url: settings.web_url.trim_end_matches('/').to_string(),
            repo,
            max_attempts: settings.max_attempts.max(1),
        })
    }

    /// Repository this client is scoped to
    #[must_use]
    pub const fn repo(&self) -> &RepoRef {
        &self.repo
    }

    /// Browser URL of the repository
    #[must_use]
    pub fn repo_url(&self) -> String {
        self.repo.web_url(&self.web_url)
    }

    fn repo_path(&self, tail: &str) -> String {
        format!("{}/repos/{}/{}/{tail}", self.api_url, self.repo.owner, self.repo.name)
    }

    /// Fetch every page of a list endpoint
    fn get_all_pages(
        &self,
        operation: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<ApiIssue>, GithubError> {
        let mut items = Vec::new();
        for page in 1_u32.. {
            let page_value = page.to_string();
            let chunk: Vec<ApiIssue> = self.get_json(operation, || {
                self.http
                    .get(path)
                    .query(params)
                    .query(&[("per_page", "100"), ("page", page_value.as_str())])
            })?;
            let len = chunk.len();
            log::debug!("{operation}: page {page} returned {len} items");
            items.extend(chunk);
            if len < PER_PAGE {
                break;
            }
        }
        Ok(items)
    }

    /// Run a search query, paging until exhausted or capped
    fn search_issues(&self, query: &str) -> Result<Vec<ApiIssue>, GithubError> {
        let operation = "search issues";
        let url = format!("{}/search/issues", self.api_url);
        let mut items = Vec::new();
        for page in 1_u32.. {
            let page_value = page.to_string();
            let response: SearchResponse = self.get_json(operation, || {
                self.http.get(&url).query(&[
                    ("q", query),
                    ("sort", "updated"),
                    ("order", "desc"),
                    ("per_page", "100"),
                    ("page", page_value.as_str()),
                ])
            })?;
            let len = response.items.len();
            log::debug!(
                "{operation}: page {page} returned {len} of {} items",
                response.total_count
            );
            items.extend(response.items);
            if len < PER_PAGE || items.len() >= SEARCH_RESULT_CAP {
                break;
            }
        }
        Ok(items)
    }

    /// GET with retries on rate limiting, server errors and flaky transport
    fn get_json<T, F>(&self, operation: &str, mut request: F) -> Result<T, GithubError>
    where
        T: DeserializeOwned,
        F: FnMut() -> RequestBuilder,
    {
        let mut attempt = 0_u32;
        loop {
            attempt += 1;
            match request().send() {
                Ok(response) if response.status().is_success() => {
                    return decode(operation, response);
                },
                Ok(response) => {
                    let status = response.status().as_u16();
                    let retry_after = retry_after(&response);
                    if attempt < self.max_attempts && is_retryable_status(status) {
                        let delay = retry_delay(attempt, retry_after);
                        log::debug!("{operation}: HTTP {status}, retrying in {delay:?}");
                        std::thread::sleep(delay);
                        continue;
                    }
                    return Err(status_error(operation, response));
                },
                Err(source) => {
                    if attempt < self.max_attempts && (source.is_timeout() || source.is_connect()) {
                        let delay = retry_delay(attempt, None);
                        log::debug!("{operation}: {source}, retrying in {delay:?}");
                        std::thread::sleep(delay);
                        continue;
                    }
                    return Err(GithubError::Transport {
                        operation: operation.to_string(),
                        source,
                    });
                },
            }
        }
    }

    /// Single-shot write; never retried so a lost response cannot duplicate an issue
    fn send_write<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T, GithubError> {
        let response = request.send().map_err(|source| GithubError::Transport {
            operation: operation.to_string(),
            source,
        })?;
        if !response.status().is_success() {
            return Err(status_error(operation, response));
        }
        decode(operation, response)
    }
}

impl IssueTracker for GithubClient {
    fn milestone(&self, number: u64) -> anyhow::Result<Milestone> {
        let url = self.repo_path(&format!("milestones/{number}"));
        let milestone: ApiMilestone = self.get_json("get milestone", || self.http.get(&url))?;
        Ok(milestone.into())
    }

    fn open_milestones(&self) -> anyhow::Result<Vec<Milestone>> {
        let url = self.repo_path("milestones");
        let mut milestones = Vec::new();
        for page in 1_u32.. {
            let page_value = page.to_string();
            let chunk: Vec<ApiMilestone> = self.get_json("list milestones", || {
                self.http.get(&url).query(&[
                    ("state", "open"),
                    ("per_page", "100"),
                    ("page", page_value.as_str()),
                ])
            })?;
            let len = chunk.len();
            milestones.extend(chunk.into_iter().map(Milestone::from));
            if len < PER_PAGE {
                break;
            }
        }
        Ok(milestones)
    }

    fn milestone_issues(&self, number: u64) -> anyhow::Result<Vec<Issue>> {
        let url = self.repo_path("issues");
        let number = number.to_string();
        let items = self.get_all_pages(
            "list milestone issues",
            &url,
            &[("milestone", number.as_str()), ("state", "all")],
        )?;
        Ok(items.into_iter().map(Issue::from).collect())
    }

    fn issues_with_any_label(&self, labels: &[String]) -> anyhow::Result<Vec<Issue>> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }
        let query = search_query(&self.repo, labels);
        log::debug!("search query: {query}");
        let items = self.search_issues(&query)?;
        Ok(items.into_iter().map(Issue::from).collect())
    }

    fn issues_with_label(&self, label: &str) -> anyhow::Result<Vec<Issue>> {
        let url = self.repo_path("issues");
        let items = self.get_all_pages(
            "list labeled issues",
            &url,
            &[("labels", label), ("state", "all")],
        )?;
        Ok(items
            .into_iter()
            .filter(|item| item.pull_request.is_none())
            .map(Issue::from)
            .collect())
    }

    fn create_issue(&self, title: &str, body: &str, labels: &[String]) -> anyhow::Result<u64> {
        let payload = CreateIssueBody { title, body, labels };
        let request = self.http.post(self.repo_path("issues")).json(&payload);
        let created: CreatedIssue = self.send_write("create issue", request)?;
        Ok(created.number)
    }

    fn update_issue(
        &self,
        number: u64,
        title: Option<&str>,
        body: Option<&str>,
    ) -> anyhow::Result<()> {
        let payload = UpdateIssueBody { title, body };
        let _: serde_json::Value = self
            .send_write(
                "update issue",
                self.http.patch(self.repo_path(&format!("issues/{number}"))).json(&payload),
            )
            .with_context(|| format!("issue #{number}"))?;
        Ok(())
    }

    fn issue_url(&self, number: u64) -> String {
        format!("{}/issues/{number}", self.repo_url())
    }
}

/// Search query matching issues in `repo` that carry any of `labels`
#[must_use]
pub fn search_query(repo: &RepoRef, labels: &[String]) -> String {
    let quoted: Vec<String> = labels.iter().map(|l| format!("\"{l}\"")).collect();
    format!("repo:{repo} is:issue label:{}", quoted.join(","))
}

fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T, GithubError> {
    response.json::<T>().map_err(|source| GithubError::Decode {
        operation: operation.to_string(),
        source,
    })
}

fn status_error(operation: &str, response: Response) -> GithubError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    GithubError::Status {
        operation: operation.to_string(),
        status,
        body: truncate_body(&body),
    }
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

const fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

fn retry_delay(attempt: u32, retry_after: Option<Duration>) -> Duration {
    let backoff = BASE_RETRY_DELAY_MS.saturating_mul(1_u64 << attempt.saturating_sub(1).min(8));
    let backoff = Duration::from_millis(backoff.min(MAX_RETRY_DELAY_MS));
    retry_after.map_or(backoff, |hint| hint.max(backoff))
}
