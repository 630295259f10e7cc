mod ask_cmd;
mod config_cmd;
mod render_cmd;
mod status_cmd;
mod terminal;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use chatforge_config::{
    config_dir, config_file_path, defaults::DEFAULT_LOG_LEVEL, load_and_prepare, validate,
    ChatForgeConfig,
};
use chatforge_core::PromptTemplate;
use chatforge_logging::init_logger;
use chatforge_markdown::Formatter;

use ask_cmd::AskOverrides;
use config_cmd::ConfigAction;

#[derive(Parser)]
#[command(name = "chatforge")]
#[command(about = "ChatForge: format local-model replies as chat HTML")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $CHATFORGE_CONFIG_DIR/config.yaml or ~/.chatforge/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format model text from FILE (or stdin) as HTML
    Render {
        file: Option<PathBuf>,
        /// JSON file with search results to append as references
        #[arg(long)]
        results: Option<PathBuf>,
        /// Wrap the output in a chat message container
        #[arg(long)]
        message: bool,
    },
    /// Send one prompt to the server and print the rendered reply
    Ask {
        prompt: String,
        /// Skip the web search for this prompt
        #[arg(long)]
        no_search: bool,
        /// Use deep search
        #[arg(long)]
        deep: bool,
        /// System prompt template
        #[arg(long)]
        template: Option<PromptTemplate>,
        /// Print the raw reply instead of HTML
        #[arg(long)]
        raw: bool,
    },
    /// Check whether the server and model are available
    Status,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let loaded = load_and_prepare(&path).await;

    // No subscriber exists while loading; `ready` reports warnings again.
    match &loaded {
        Ok(config) => init_logger(log_dir(config), config.log_level()),
        Err(_) => init_logger(config_dir().join("logs"), DEFAULT_LOG_LEVEL),
    }
    debug!(path = %path.display(), "Config resolved");

    match cli.command {
        Commands::Config { action } => config_cmd::run(action, &path, loaded).await?,
        Commands::Render {
            file,
            results,
            message,
        } => {
            let config = ready(loaded)?;
            let formatter = Formatter::new(config.format_options());
            let html =
                render_cmd::run(&formatter, file.as_deref(), results.as_deref(), message)?;
            println!("{html}");
        }
        Commands::Ask {
            prompt,
            no_search,
            deep,
            template,
            raw,
        } => {
            let config = ready(loaded)?;
            let overrides = AskOverrides {
                no_search,
                deep,
                template,
            };
            let output = ask_cmd::run(&config, &prompt, &overrides, raw).await?;
            println!("{output}");
        }
        Commands::Status => {
            let config = ready(loaded)?;
            if !status_cmd::run(&config).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Unwrap the loaded config, reporting its warnings through the now-installed
/// subscriber.
fn ready(loaded: Result<ChatForgeConfig>) -> Result<ChatForgeConfig> {
    let config = loaded?;
    for warning in validate(&config).warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    Ok(config)
}

fn log_dir(config: &ChatForgeConfig) -> PathBuf {
    config
        .log_dir()
        .map(PathBuf::from)
        .unwrap_or_else(|| config_dir().join("logs"))
}
