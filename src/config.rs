//! Configuration management
//!
//! Stores the token, known repositories and digest defaults in a TOML file
//! (see [`paths::config_file`]). Every section is optional; missing keys take
//! built-in defaults and CLI flags override both.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::adapters::github::{ClientSettings, DEFAULT_API_URL, DEFAULT_WEB_URL};
use crate::core::models::{LabelTaxonomy, RepoRef};
use crate::core::services::onboarding::{
    DEFAULT_TARGET_LABEL as ONBOARD_TARGET_LABEL, DEFAULT_TARGET_TITLE as ONBOARD_TARGET_TITLE,
};
use crate::core::services::planning::{
    DEFAULT_TARGET_LABEL as PLAN_TARGET_LABEL, DEFAULT_TARGET_TITLE as PLAN_TARGET_TITLE,
};
use crate::core::services::{OnboardOptions, PlanOptions};
use crate::paths;

/// Token environment variables, in lookup order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Global issue-digest configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Credentials
    #[serde(default)]
    pub auth: AuthConfig,
    /// GitHub endpoints and repository selection
    #[serde(default)]
    pub github: GithubConfig,
    /// Planning digest defaults
    #[serde(default)]
    pub plan: PlanConfig,
    /// Onboarding digest defaults
    #[serde(default)]
    pub onboard: OnboardConfig,
}

/// Credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Personal access token; environment variables take precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// GitHub endpoints and repository selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubConfig {
    /// REST endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Browser endpoint used for links
    #[serde(default = "default_web_url")]
    pub web_url: String,
    /// Selected repository (`owner/repo`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Known repositories
    #[serde(default)]
    pub repositories: Vec<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Attempts for read requests, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_web_url() -> String {
    DEFAULT_WEB_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_attempts() -> u32 {
    3
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            web_url: default_web_url(),
            current: None,
            repositories: Vec::new(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl GithubConfig {
    /// HTTP client settings
    #[must_use]
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_url: self.api_url.clone(),
            web_url: self.web_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            max_attempts: self.max_attempts,
        }
    }
}

/// Planning digest defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Label that marks planning issues
    #[serde(default = "default_plan_target_label")]
    pub target_label: String,
    /// Title template (`{title}`, `{number}`, `{state}`)
    #[serde(default = "default_plan_target_title")]
    pub target_title: String,
    /// Category labels in display order
    #[serde(default = "default_plan_categories")]
    pub category_labels: Vec<String>,
    /// Priority labels, highest first
    #[serde(default = "default_priorities")]
    pub priority_labels: Vec<String>,
    /// Leave pull requests out of the digest
    #[serde(default = "default_true")]
    pub exclude_pr: bool,
}

fn default_plan_target_label() -> String {
    PLAN_TARGET_LABEL.to_string()
}

fn default_plan_target_title() -> String {
    PLAN_TARGET_TITLE.to_string()
}

fn default_plan_categories() -> Vec<String> {
    PlanOptions::default().taxonomy.categories
}

fn default_priorities() -> Vec<String> {
    PlanOptions::default().taxonomy.ranks
}

const fn default_true() -> bool {
    true
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            target_label: default_plan_target_label(),
            target_title: default_plan_target_title(),
            category_labels: default_plan_categories(),
            priority_labels: default_priorities(),
            exclude_pr: true,
        }
    }
}

impl PlanConfig {
    /// Planning options seeded from this section
    #[must_use]
    pub fn options(&self) -> PlanOptions {
        PlanOptions {
            target_label: self.target_label.clone(),
            target_title: self.target_title.clone(),
            taxonomy: LabelTaxonomy::new(
                self.category_labels.iter().cloned(),
                self.priority_labels.iter().cloned(),
            ),
            exclude_pr: self.exclude_pr,
            ..PlanOptions::default()
        }
    }
}

/// Onboarding digest defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardConfig {
    /// Labels selecting newcomer issues (any-of)
    #[serde(default = "default_onboard_labels")]
    pub onboard_labels: Vec<String>,
    /// Difficulty labels, easiest first
    #[serde(default = "default_difficulties")]
    pub difficulty_labels: Vec<String>,
    /// Category labels in display order
    #[serde(default = "default_onboard_categories")]
    pub category_labels: Vec<String>,
    /// Label that marks the onboarding issue
    #[serde(default = "default_onboard_target_label")]
    pub target_label: String,
    /// Title of the onboarding issue
    #[serde(default = "default_onboard_target_title")]
    pub target_title: String,
}

fn default_onboard_labels() -> Vec<String> {
    OnboardOptions::default().onboard_labels
}

fn default_difficulties() -> Vec<String> {
    OnboardOptions::default().taxonomy.ranks
}

fn default_onboard_categories() -> Vec<String> {
    OnboardOptions::default().taxonomy.categories
}

fn default_onboard_target_label() -> String {
    ONBOARD_TARGET_LABEL.to_string()
}

fn default_onboard_target_title() -> String {
    ONBOARD_TARGET_TITLE.to_string()
}

impl Default for OnboardConfig {
    fn default() -> Self {
        Self {
            onboard_labels: default_onboard_labels(),
            difficulty_labels: default_difficulties(),
            category_labels: default_onboard_categories(),
            target_label: default_onboard_target_label(),
            target_title: default_onboard_target_title(),
        }
    }
}

impl OnboardConfig {
    /// Onboarding options seeded from this section
    #[must_use]
    pub fn options(&self) -> OnboardOptions {
        OnboardOptions {
            onboard_labels: self.onboard_labels.clone(),
            taxonomy: LabelTaxonomy::new(
                self.category_labels.iter().cloned(),
                self.difficulty_labels.iter().cloned(),
            ),
            target_label: self.target_label.clone(),
            target_title: self.target_title.clone(),
            ..OnboardOptions::default()
        }
    }
}

/// Where the active token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// An environment variable
    Env(&'static str),
    /// The `[auth]` section of the config file
    ConfigFile,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env(var) => write!(f, "environment variable {var}"),
            Self::ConfigFile => write!(f, "config file"),
        }
    }
}

impl GlobalConfig {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::config_file()
    }

    /// Load config from the default location
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`; a missing file yields defaults
    ///
    /// A file that does not parse is moved aside to `<path>.bak.<unix-ts>`
    /// so the next save starts clean, and the load fails naming the backup.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                let backup = backup_path(path);
                fs::rename(path, &backup).with_context(|| {
                    format!("failed to back up invalid config {}", path.display())
                })?;
                anyhow::bail!(
                    "invalid config {}: {err}\nThe file was moved to {}",
                    path.display(),
                    backup.display()
                )
            },
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
        restrict_permissions(path)?;
        Ok(())
    }

    // === Credentials ===

    /// Active token and its source: environment first, then the config file
    #[must_use]
    pub fn token(&self) -> Option<(String, TokenSource)> {
        TOKEN_ENV_VARS
            .iter()
            .find_map(|var| {
                std::env::var(var)
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (v, TokenSource::Env(*var)))
            })
            .or_else(|| {
                self.auth
                    .token
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .map(|t| (t, TokenSource::ConfigFile))
            })
    }

    /// Store a token in the config file section
    pub fn set_token(&mut self, token: &str) {
        self.auth.token = Some(token.trim().to_string());
    }

    /// Forget the stored token; returns whether one was present
    pub fn clear_token(&mut self) -> bool {
        self.auth.token.take().is_some()
    }

    // === Repositories ===

    /// Selected repository, if any
    pub fn current_repo(&self) -> anyhow::Result<Option<RepoRef>> {
        self.github
            .current
            .as_deref()
            .map(RepoRef::parse)
            .transpose()
            .context("invalid [github].current in config")
    }

    /// Remember a repository and select it; returns whether it was new
    pub fn add_repo(&mut self, repo: &RepoRef) -> bool {
        let name = repo.to_string();
        let added = !self.github.repositories.contains(&name);
        if added {
            self.github.repositories.push(name.clone());
        }
        self.github.current = Some(name);
        added
    }

    /// Forget a repository
    ///
    /// Removing the selected repository selects the first remaining one.
    pub fn remove_repo(&mut self, repo: &RepoRef) -> anyhow::Result<()> {
        let name = repo.to_string();
        let before = self.github.repositories.len();
        self.github.repositories.retain(|r| r != &name);
        if self.github.repositories.len() == before {
            anyhow::bail!("repository {name} not found");
        }
        if self.github.current.as_deref() == Some(name.as_str()) {
            self.github.current = self.github.repositories.first().cloned();
        }
        Ok(())
    }

    /// Select a known repository
    ///
    /// `detected` is the repository of the enclosing checkout, which may be
    /// selected without being added first.
    pub fn switch_repo(
        &mut self,
        repo: &RepoRef,
        detected: Option<&RepoRef>,
    ) -> anyhow::Result<()> {
        let name = repo.to_string();
        if !self.github.repositories.contains(&name) && detected != Some(repo) {
            anyhow::bail!("repository {name} not found in config or current git repository");
        }
        self.github.current = Some(name);
        Ok(())
    }

    /// Known repositories, with the detected checkout repository first when
    /// it is not already listed
    #[must_use]
    pub fn list_repos(&self, detected: Option<&RepoRef>) -> Vec<String> {
        let mut repos = Vec::with_capacity(self.github.repositories.len() + 1);
        repos.extend(
            detected
                .map(ToString::to_string)
                .filter(|d| !self.github.repositories.contains(d)),
        );
        repos.extend(self.github.repositories.iter().cloned());
        repos
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".bak.{}", chrono::Utc::now().timestamp()));
    PathBuf::from(name)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}
