//! CLI Ask Command
//!
//! One exchange with the local generation server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use chatforge_client::{ChatSession, HttpBackend};
use chatforge_config::ChatForgeConfig;
use chatforge_core::{ChatBackend, ChatError, ChatSettings, PromptTemplate, ServerStatus};
use chatforge_markdown::Formatter;

use crate::terminal::{note_warn, status_line};

/// Per-invocation overrides on top of the configured settings.
#[derive(Debug, Default)]
pub struct AskOverrides {
    pub no_search: bool,
    pub deep: bool,
    pub template: Option<PromptTemplate>,
}

impl AskOverrides {
    fn apply(&self, mut settings: ChatSettings) -> ChatSettings {
        if self.no_search {
            settings.web_search = false;
        }
        if self.deep {
            settings.deep_search = true;
        }
        if let Some(template) = self.template {
            settings.template = template;
        }
        settings
    }
}

pub async fn run(
    config: &ChatForgeConfig,
    prompt: &str,
    overrides: &AskOverrides,
    raw: bool,
) -> Result<String> {
    let backend = HttpBackend::new(
        config.server_url(),
        Duration::from_secs(config.timeout_secs()),
    )?;

    match backend.status().await {
        ServerStatus::Connected => {}
        ServerStatus::ModelMissing => {
            note_warn("Model not found on the server. Run \"ollama pull gemma2:2b\" first.");
        }
        down => {
            return Err(ChatError::ServerUnavailable(status_line(&down)).into());
        }
    }

    let settings = overrides.apply(config.chat_settings());
    let mut session = ChatSession::new(
        Arc::new(backend),
        settings,
        Formatter::new(config.format_options()),
    );
    info!(session = %session.id(), "Asking");

    let exchange = session.send(prompt).await?;
    Ok(if raw { exchange.reply } else { exchange.html })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_layer_on_configured_settings() {
        let overrides = AskOverrides {
            no_search: true,
            deep: true,
            template: Some(PromptTemplate::Creative),
        };
        let settings = overrides.apply(ChatSettings::default());
        assert!(!settings.web_search);
        assert!(settings.deep_search);
        assert_eq!(settings.template, PromptTemplate::Creative);
    }

    #[test]
    fn no_overrides_keep_settings() {
        let settings = AskOverrides::default().apply(ChatSettings::default());
        assert_eq!(settings, ChatSettings::default());
    }
}
