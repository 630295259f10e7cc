//! CLI Config Command

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use tokio::fs;

use chatforge_config::{apply_all_defaults, write_config, ChatForgeConfig};

use crate::terminal::note_success;

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective config (file, env overrides and defaults) as YAML
    Show,
    /// Write a config file with every default spelled out
    Init {
        /// Overwrite an existing file (the old one is kept as a backup)
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path
    Path,
}

pub async fn run(
    action: ConfigAction,
    path: &Path,
    loaded: Result<ChatForgeConfig>,
) -> Result<()> {
    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Show => {
            let config = loaded?;
            let yaml = serde_yaml::to_string(&config).context("Failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Init { force } => {
            if !force && fs::try_exists(path).await.unwrap_or(false) {
                bail!(
                    "{} already exists; pass --force to overwrite it",
                    path.display()
                );
            }
            write_config(&apply_all_defaults(ChatForgeConfig::default()), path).await?;
            note_success(&format!("Wrote {}", path.display()));
        }
    }
    Ok(())
}
