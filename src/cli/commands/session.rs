//! Shared wiring for commands that talk to GitHub

use anyhow::Context;
use chrono::Utc;

use issue_digest::adapters::console::{ConsoleReporter, StdinConfirm};
use issue_digest::adapters::git::{DEFAULT_REMOTE, detect_repo};
use issue_digest::adapters::github::{GithubClient, GithubError};
use issue_digest::config::GlobalConfig;
use issue_digest::core::error::InputError;
use issue_digest::core::models::RepoRef;
use issue_digest::core::services::{RenderContext, Reconciler, WritePolicy};
use issue_digest::output::OutputMode;

use crate::cli::app::WriteFlags;

/// Pick the repository: flag, then config, then the `origin` remote
pub fn resolve_repo(flag: Option<&str>, config: &GlobalConfig) -> anyhow::Result<RepoRef> {
    if let Some(flag) = flag {
        return Ok(RepoRef::parse(flag)?);
    }
    if let Some(current) = config.current_repo()? {
        return Ok(current);
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    detect_repo(&cwd, DEFAULT_REMOTE).ok_or_else(|| InputError::MissingRepository.into())
}

/// Repository of the enclosing git checkout, if any
pub fn detected_repo() -> Option<RepoRef> {
    let cwd = std::env::current_dir().ok()?;
    detect_repo(&cwd, DEFAULT_REMOTE)
}

/// Everything a digest command needs once input has been validated
pub struct Session {
    pub client: GithubClient,
    pub reporter: ConsoleReporter,
    pub confirm: StdinConfirm,
    pub ctx: RenderContext,
}

impl Session {
    /// Authenticate against `repo`; fails without touching the network when
    /// no token is available
    pub fn open(repo: RepoRef, config: &GlobalConfig, mode: OutputMode) -> anyhow::Result<Self> {
        let (token, source) = config.token().ok_or(GithubError::MissingToken)?;
        log::debug!("using token from {source} for {repo}");
        let client = GithubClient::new(repo, &token, &config.github.client_settings())?;
        let ctx = RenderContext::new(client.repo_url(), Utc::now());
        Ok(Self {
            client,
            reporter: ConsoleReporter::new(mode),
            confirm: StdinConfirm,
            ctx,
        })
    }

    pub fn reconciler(&self) -> Reconciler<'_> {
        Reconciler::new(&self.client, &self.confirm, &self.reporter)
    }
}

impl From<WriteFlags> for WritePolicy {
    fn from(flags: WriteFlags) -> Self {
        Self {
            dry_run: flags.dry_run,
            auto_confirm: flags.yes,
        }
    }
}
