//! Auth command - store, remove and inspect the GitHub token

use std::io::{self, Read};

use issue_digest::config::GlobalConfig;
use issue_digest::output::{AuthStatusResult, OperationResult, OutputMode};

use crate::cli::app::AuthAction;

/// Handle auth subcommands
pub fn auth(action: &AuthAction, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = GlobalConfig::load()?;
    match action {
        AuthAction::Login { .. } => {
            let mut token = String::new();
            io::stdin().read_to_string(&mut token)?;
            if token.trim().is_empty() {
                anyhow::bail!("no token received on standard input");
            }
            config.set_token(&token);
            config.save()?;
            OperationResult::ok(format!(
                "Token saved to {}",
                GlobalConfig::config_path().display()
            ))
            .render(mode);
        },
        AuthAction::Logout => {
            let removed = config.clear_token();
            config.save()?;
            let message = if removed {
                "Token removed"
            } else {
                "No stored token"
            };
            OperationResult::ok(message).render(mode);
        },
        AuthAction::Status => {
            let source = config.token().map(|(_, source)| source.to_string());
            AuthStatusResult {
                authenticated: source.is_some(),
                source,
            }
            .render(mode);
        },
    }
    Ok(())
}
