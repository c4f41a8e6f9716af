//! Git integration adapter
//!
//! Finds the tracker repository a working copy belongs to by reading its
//! `origin` remote.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::models::RepoRef;

/// Remote consulted when no repository is configured
pub const DEFAULT_REMOTE: &str = "origin";

static REMOTE_URL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // https://host/owner/repo(.git), ssh://git@host(:port)/owner/repo(.git), git@host:owner/repo(.git)
    Regex::new(
        r"^(?:(?:https?|ssh|git)://(?:[^@/]+@)?[^/]+/|[^@\s]+@[^:\s]+:)(?P<owner>[^/\s]+)/(?P<name>[^/\s]+?)(?:\.git)?/?$",
    )
    .ok()
});

/// Parse `owner/repo` out of a git remote URL
#[must_use]
pub fn parse_remote_url(url: &str) -> Option<RepoRef> {
    let re = REMOTE_URL.as_ref()?;
    let caps = re.captures(url.trim())?;
    Some(RepoRef::new(&caps["owner"], &caps["name"]))
}

/// Repository of the `remote` configured in the git checkout enclosing `dir`
///
/// Returns `None` outside a git checkout, when the remote is missing, or
/// when its URL does not look like a hosted repository.
#[must_use]
pub fn detect_repo(dir: &Path, remote: &str) -> Option<RepoRef> {
    let repo = git2::Repository::discover(dir).ok()?;
    let remote = repo.find_remote(remote).ok()?;
    let url = remote.url()?;
    let parsed = parse_remote_url(url);
    log::debug!("remote {url} -> {parsed:?}");
    parsed
}
