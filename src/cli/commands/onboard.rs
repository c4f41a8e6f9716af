//! Onboard command - update the onboarding issue

use issue_digest::config::GlobalConfig;
use issue_digest::core::services::OnboardOptions;
use issue_digest::output::{OutputMode, ReconcileReport};

use super::session::{Session, resolve_repo};
use crate::cli::app::OnboardArgs;

/// Update the onboarding issue
pub fn onboard(args: &OnboardArgs, repo: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let config = GlobalConfig::load()?;
    let repo = resolve_repo(repo, &config)?;
    let opts = options(args, &config);
    if opts.onboard_labels.is_empty() {
        anyhow::bail!("at least one onboard label is required");
    }

    let session = Session::open(repo, &config, mode)?;
    let reconciled = session.reconciler().onboard(&opts, &session.ctx)?;
    ReconcileReport::from(reconciled).render(mode);
    Ok(())
}

/// Config defaults overridden by flags
fn options(args: &OnboardArgs, config: &GlobalConfig) -> OnboardOptions {
    let mut opts = config.onboard.options();
    if let Some(labels) = &args.onboard_labels {
        opts.onboard_labels.clone_from(labels);
    }
    if let Some(difficulties) = &args.difficulty_labels {
        opts.taxonomy.ranks.clone_from(difficulties);
    }
    if let Some(categories) = &args.category_labels {
        opts.taxonomy.categories.clone_from(categories);
    }
    if let Some(label) = &args.target_label {
        opts.target_label.clone_from(label);
    }
    if let Some(title) = &args.target_title {
        opts.target_title.clone_from(title);
    }
    opts.policy = args.write.into();
    opts
}
