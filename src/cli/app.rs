//! CLI definitions and entry point

use clap::{Args, Parser, Subcommand};

use super::commands;
use issue_digest::output::OutputMode;

/// issue-digest - Keep GitHub planning and onboarding issues up to date
#[derive(Parser, Debug)]
#[command(
    name = "issue-digest",
    version,
    about = "Keep GitHub planning and onboarding issues up to date",
    long_about = "Generate markdown digests of GitHub issues and keep them in a single tracking issue.\n\n\
                  'plan' summarizes a milestone into 'Planning: <milestone>'.\n\
                  'onboard' collects newcomer-friendly issues into an onboarding issue."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Repository to work on (owner/name); defaults to the configured or detected one
    #[arg(short = 'R', long, global = true, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Update the planning issue of a milestone (all open milestones when omitted)
    Plan(PlanArgs),

    /// Update the onboarding issue for new contributors
    Onboard(OnboardArgs),

    /// Manage repositories
    Repo {
        #[command(subcommand)]
        action: RepoAction,
    },

    /// Manage the GitHub token
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Inspect the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version
    Version,
}

/// Shared write-policy flags
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct WriteFlags {
    /// Preview the changes without modifying any issues
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Automatically apply changes without confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Milestone number
    pub milestone: Option<String>,

    /// Label used to locate the planning issue
    #[arg(short = 't', long)]
    pub target_label: Option<String>,

    /// Title template of the planning issue ({title}, {number}, {state})
    #[arg(short = 'T', long)]
    pub target_title: Option<String>,

    /// Labels used to classify issues by type
    #[arg(short, long, value_delimiter = ',')]
    pub category_labels: Option<Vec<String>>,

    /// Priority labels, ordered from high to low
    #[arg(short, long, value_delimiter = ',')]
    pub priority_labels: Option<Vec<String>>,

    /// Exclude pull requests from the digest
    #[arg(short, long, conflicts_with = "include_pr")]
    pub exclude_pr: bool,

    /// Include pull requests in the digest
    #[arg(long)]
    pub include_pr: bool,

    #[command(flatten)]
    pub write: WriteFlags,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OnboardArgs {
    /// Labels used to find issues suitable for new contributors (any-of)
    #[arg(short, long, value_delimiter = ',')]
    pub onboard_labels: Option<Vec<String>>,

    /// Difficulty labels, ordered from easy to hard
    #[arg(short, long, value_delimiter = ',')]
    pub difficulty_labels: Option<Vec<String>>,

    /// Labels used to classify issues by type within each difficulty
    #[arg(short, long, value_delimiter = ',')]
    pub category_labels: Option<Vec<String>>,

    /// Label used to locate the onboarding issue
    #[arg(short = 't', long)]
    pub target_label: Option<String>,

    /// Title of the onboarding issue
    #[arg(short = 'T', long)]
    pub target_title: Option<String>,

    #[command(flatten)]
    pub write: WriteFlags,
}

#[derive(Subcommand, Debug)]
pub enum RepoAction {
    /// Add a repository and select it
    Add {
        /// Repository (owner/name)
        repo: String,
    },

    /// Remove a repository
    Remove {
        /// Repository (owner/name)
        repo: String,
    },

    /// Select the repository to work on
    Switch {
        /// Repository (owner/name)
        repo: String,
    },

    /// List managed repositories
    List,

    /// Show the selected repository
    Current,
}

#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Store a token in the config file
    Login {
        /// Read the token from standard input
        #[arg(long, required = true)]
        with_token: bool,
    },

    /// Remove the stored token
    Logout,

    /// Show where the token comes from
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file location
    Path,

    /// Print the effective configuration (token redacted)
    Show,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let repo = cli.repo.as_deref();

    match cli.command {
        Some(Command::Plan(args)) => commands::plan(&args, repo, output_mode),
        Some(Command::Onboard(args)) => commands::onboard(&args, repo, output_mode),
        Some(Command::Repo { action }) => commands::repo(&action, output_mode),
        Some(Command::Auth { action }) => commands::auth(&action, output_mode),
        Some(Command::Config { action }) => commands::config(&action, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("issue-digest v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("issue-digest v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'issue-digest --help' for usage");
                println!("Run 'issue-digest plan <milestone>' to update a planning issue");
            }
            Ok(())
        },
    }
}
