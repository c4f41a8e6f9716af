//! Plan command - update milestone planning issues

use issue_digest::config::GlobalConfig;
use issue_digest::core::error::parse_milestone_number;
use issue_digest::core::services::PlanOptions;
use issue_digest::output::{BatchReport, OutputMode, ReconcileReport};

use super::session::{Session, resolve_repo};
use crate::cli::app::PlanArgs;

/// Update the planning issue of one milestone, or of every open milestone
pub fn plan(args: &PlanArgs, repo: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let milestone = args.milestone.as_deref().map(parse_milestone_number).transpose()?;

    let config = GlobalConfig::load()?;
    let repo = resolve_repo(repo, &config)?;
    let opts = options(args, &config);

    let session = Session::open(repo, &config, mode)?;
    let reconciler = session.reconciler();

    match milestone {
        Some(number) => {
            let reconciled = reconciler.plan_milestone(number, &opts, &session.ctx)?;
            ReconcileReport::from(reconciled).render(mode);
        },
        None => {
            let runs = reconciler.plan_open_milestones(&opts, &session.ctx)?;
            BatchReport::from_runs(runs).render(mode);
        },
    }
    Ok(())
}

/// Config defaults overridden by flags
fn options(args: &PlanArgs, config: &GlobalConfig) -> PlanOptions {
    let mut opts = config.plan.options();
    if let Some(label) = &args.target_label {
        opts.target_label.clone_from(label);
    }
    if let Some(title) = &args.target_title {
        opts.target_title.clone_from(title);
    }
    if let Some(categories) = &args.category_labels {
        opts.taxonomy.categories.clone_from(categories);
    }
    if let Some(priorities) = &args.priority_labels {
        opts.taxonomy.ranks.clone_from(priorities);
    }
    if args.exclude_pr {
        opts.exclude_pr = true;
    }
    if args.include_pr {
        opts.exclude_pr = false;
    }
    opts.policy = args.write.into();
    opts
}
