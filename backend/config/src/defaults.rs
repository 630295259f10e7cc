//! Config defaults: fills every unset field with its documented value.

use crate::schema::{
    ChatForgeConfig, FormatterConfig, GenerationConfig, LoggingConfig, PromptConfig,
    SearchConfig, ServerConfig,
};
use chatforge_core::PromptTemplate;

/// Local inference server the browser client talks to.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Generation on a 2B model can be slow on CPU.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 0.9;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

pub const DEFAULT_WEB_SEARCH: bool = true;
pub const DEFAULT_DEEP_SEARCH: bool = false;

pub const DEFAULT_FALLBACK_LANGUAGE: &str = "code";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: ChatForgeConfig) -> ChatForgeConfig {
    let config = apply_server_defaults(config);
    let config = apply_generation_defaults(config);
    let config = apply_search_defaults(config);
    let config = apply_prompt_defaults(config);
    let config = apply_formatter_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: ChatForgeConfig) -> ChatForgeConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server
        .base_url
        .get_or_insert_with(|| DEFAULT_SERVER_URL.to_string());
    server.timeout_secs.get_or_insert(DEFAULT_TIMEOUT_SECS);
    config
}

fn apply_generation_defaults(mut config: ChatForgeConfig) -> ChatForgeConfig {
    let generation = config.generation.get_or_insert_with(GenerationConfig::default);
    generation.temperature.get_or_insert(DEFAULT_TEMPERATURE);
    generation.top_p.get_or_insert(DEFAULT_TOP_P);
    generation.max_tokens.get_or_insert(DEFAULT_MAX_TOKENS);
    config
}

fn apply_search_defaults(mut config: ChatForgeConfig) -> ChatForgeConfig {
    let search = config.search.get_or_insert_with(SearchConfig::default);
    search.enabled.get_or_insert(DEFAULT_WEB_SEARCH);
    search.deep.get_or_insert(DEFAULT_DEEP_SEARCH);
    config
}

fn apply_prompt_defaults(mut config: ChatForgeConfig) -> ChatForgeConfig {
    let prompt = config.prompt.get_or_insert_with(PromptConfig::default);
    prompt.template.get_or_insert(PromptTemplate::default());
    prompt.custom_prompt.get_or_insert_with(String::new);
    config
}

fn apply_formatter_defaults(mut config: ChatForgeConfig) -> ChatForgeConfig {
    let formatter = config.formatter.get_or_insert_with(FormatterConfig::default);
    formatter
        .fallback_language
        .get_or_insert_with(|| DEFAULT_FALLBACK_LANGUAGE.to_string());
    formatter.copy_button.get_or_insert(true);
    formatter.definitions.get_or_insert(true);
    formatter.step_containers.get_or_insert(true);
    config
}

/// The log directory is left unset; the CLI resolves it under the config dir.
fn apply_logging_defaults(mut config: ChatForgeConfig) -> ChatForgeConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatforge_core::ChatSettings;
    use chatforge_markdown::FormatOptions;

    #[test]
    fn fills_every_section() {
        let cfg = apply_all_defaults(ChatForgeConfig::default());
        let generation = cfg.generation.as_ref().unwrap();
        assert_eq!(generation.temperature, Some(DEFAULT_TEMPERATURE));
        assert_eq!(generation.top_p, Some(DEFAULT_TOP_P));
        assert_eq!(generation.max_tokens, Some(DEFAULT_MAX_TOKENS));
        assert_eq!(cfg.server.as_ref().unwrap().timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
        assert_eq!(cfg.search.as_ref().unwrap().enabled, Some(true));
        assert_eq!(cfg.prompt.as_ref().unwrap().template, Some(PromptTemplate::Standard));
        assert_eq!(cfg.logging.as_ref().unwrap().level.as_deref(), Some("info"));
        assert!(cfg.logging.as_ref().unwrap().dir.is_none());
    }

    #[test]
    fn defaults_agree_with_runtime_records() {
        let cfg = apply_all_defaults(ChatForgeConfig::default());
        assert_eq!(cfg.chat_settings(), ChatSettings::default());
        assert_eq!(cfg.format_options(), FormatOptions::default());
    }

    #[test]
    fn does_not_override_user_values() {
        let mut cfg = ChatForgeConfig::default();
        cfg.generation = Some(GenerationConfig {
            max_tokens: Some(64),
            ..Default::default()
        });
        cfg.search = Some(SearchConfig {
            enabled: Some(false),
            deep: None,
        });
        let cfg = apply_all_defaults(cfg);
        assert_eq!(cfg.generation.as_ref().unwrap().max_tokens, Some(64));
        assert_eq!(cfg.search.as_ref().unwrap().enabled, Some(false));
        assert_eq!(cfg.search.as_ref().unwrap().deep, Some(false));
    }
}
