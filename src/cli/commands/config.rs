//! Config command - show the configuration file and its location

use issue_digest::config::GlobalConfig;
use issue_digest::output::OutputMode;

use crate::cli::app::ConfigAction;

const REDACTED: &str = "********";

/// Handle config subcommands
pub fn config(action: &ConfigAction, mode: OutputMode) -> anyhow::Result<()> {
    let path = GlobalConfig::config_path();
    match action {
        ConfigAction::Path => {
            if mode == OutputMode::Json {
                println!("{}", serde_json::json!({ "path": path }));
            } else {
                println!("{}", path.display());
            }
        },
        ConfigAction::Show => {
            let mut config = GlobalConfig::load_from(&path)?;
            if config.auth.token.is_some() {
                config.auth.token = Some(REDACTED.to_string());
            }
            if mode == OutputMode::Json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        },
    }
    Ok(())
}
