//! Repository management command - add, remove, switch, list, current

use issue_digest::config::GlobalConfig;
use issue_digest::core::models::RepoRef;
use issue_digest::output::{OperationResult, OutputMode, RepoListResult};

use super::session::detected_repo;
use crate::cli::app::RepoAction;

/// Handle repository subcommands
pub fn repo(action: &RepoAction, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = GlobalConfig::load()?;
    match action {
        RepoAction::Add { repo } => {
            let repo = RepoRef::parse(repo)?;
            let added = config.add_repo(&repo);
            config.save()?;
            let message = if added {
                format!("Successfully added repository {repo}")
            } else {
                format!("Repository {repo} already added, now selected")
            };
            OperationResult::ok(message).render(mode);
        },
        RepoAction::Remove { repo } => {
            let repo = RepoRef::parse(repo)?;
            config.remove_repo(&repo)?;
            config.save()?;
            OperationResult::ok(format!("Successfully removed repository {repo}")).render(mode);
        },
        RepoAction::Switch { repo } => {
            let repo = RepoRef::parse(repo)?;
            config.switch_repo(&repo, detected_repo().as_ref())?;
            config.save()?;
            OperationResult::ok(format!("Successfully switched to repository {repo}")).render(mode);
        },
        RepoAction::List => {
            let detected = detected_repo();
            RepoListResult {
                current: current(&config, detected.as_ref())?,
                repositories: config.list_repos(detected.as_ref()),
            }
            .render(mode);
        },
        RepoAction::Current => match current(&config, detected_repo().as_ref())? {
            Some(repo) => OperationResult::ok(format!("Current repository: {repo}")).render(mode),
            None => OperationResult {
                success: false,
                message: "No repository selected.".to_string(),
            }
            .render(mode),
        },
    }
    Ok(())
}

/// Selected repository, falling back to the checkout's `origin`
fn current(config: &GlobalConfig, detected: Option<&RepoRef>) -> anyhow::Result<Option<String>> {
    Ok(config
        .current_repo()?
        .or_else(|| detected.cloned())
        .map(|repo| repo.to_string()))
}
