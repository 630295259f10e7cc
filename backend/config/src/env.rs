//! Environment variable overrides for config values.
//!
//! Each `CHATFORGE_*` variable replaces one field of the loaded config.
//! Empty values are ignored; values that fail to parse are errors naming
//! the variable.

use anyhow::{Context, Result};
use chatforge_core::PromptTemplate;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

use crate::schema::{ChatForgeConfig, GenerationConfig, LoggingConfig, PromptConfig, SearchConfig, ServerConfig};

pub const ENV_SERVER_URL: &str = "CHATFORGE_SERVER_URL";
pub const ENV_TEMPERATURE: &str = "CHATFORGE_TEMPERATURE";
pub const ENV_TOP_P: &str = "CHATFORGE_TOP_P";
pub const ENV_MAX_TOKENS: &str = "CHATFORGE_MAX_TOKENS";
pub const ENV_WEB_SEARCH: &str = "CHATFORGE_WEB_SEARCH";
pub const ENV_DEEP_SEARCH: &str = "CHATFORGE_DEEP_SEARCH";
pub const ENV_TEMPLATE: &str = "CHATFORGE_TEMPLATE";
pub const ENV_LOG_LEVEL: &str = "CHATFORGE_LOG_LEVEL";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: ChatForgeConfig) -> Result<ChatForgeConfig> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
pub fn apply_env_overrides_with(
    mut config: ChatForgeConfig,
    env: &HashMap<String, String>,
) -> Result<ChatForgeConfig> {
    if let Some(url) = lookup(env, ENV_SERVER_URL) {
        config.server.get_or_insert_with(ServerConfig::default).base_url = Some(url.to_string());
    }

    if let Some(t) = parse_var::<f32>(env, ENV_TEMPERATURE)? {
        config.generation.get_or_insert_with(GenerationConfig::default).temperature = Some(t);
    }
    if let Some(p) = parse_var::<f32>(env, ENV_TOP_P)? {
        config.generation.get_or_insert_with(GenerationConfig::default).top_p = Some(p);
    }
    if let Some(m) = parse_var::<u32>(env, ENV_MAX_TOKENS)? {
        config.generation.get_or_insert_with(GenerationConfig::default).max_tokens = Some(m);
    }

    if let Some(on) = parse_flag(env, ENV_WEB_SEARCH)? {
        config.search.get_or_insert_with(SearchConfig::default).enabled = Some(on);
    }
    if let Some(on) = parse_flag(env, ENV_DEEP_SEARCH)? {
        config.search.get_or_insert_with(SearchConfig::default).deep = Some(on);
    }

    if let Some(template) = parse_var::<PromptTemplate>(env, ENV_TEMPLATE)? {
        config.prompt.get_or_insert_with(PromptConfig::default).template = Some(template);
    }

    if let Some(level) = lookup(env, ENV_LOG_LEVEL) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level.to_string());
    }

    Ok(config)
}

fn lookup<'a>(env: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    let value = env.get(name)?.trim();
    if value.is_empty() {
        return None;
    }
    debug!(var = name, "Applying env override");
    Some(value)
}

fn parse_var<T>(env: &HashMap<String, String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(env, name) else {
        return Ok(None);
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Invalid value for {name}: '{raw}'"))
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` in any case.
fn parse_flag(env: &HashMap<String, String>, name: &str) -> Result<Option<bool>> {
    let Some(raw) = lookup(env, name) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => anyhow::bail!("Invalid value for {name}: '{raw}' (expected true or false)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn overrides_generation_and_search() {
        let vars = env(&[
            (ENV_TEMPERATURE, "1.2"),
            (ENV_MAX_TOKENS, "2048"),
            (ENV_WEB_SEARCH, "off"),
            (ENV_TEMPLATE, "Expert"),
            (ENV_SERVER_URL, "http://gpu-box:5000"),
        ]);
        let cfg = apply_env_overrides_with(ChatForgeConfig::default(), &vars).unwrap();
        let settings = cfg.chat_settings();
        assert_eq!(settings.temperature, 1.2);
        assert_eq!(settings.max_tokens, 2048);
        assert!(!settings.web_search);
        assert_eq!(settings.template, PromptTemplate::Expert);
        assert_eq!(cfg.server_url(), "http://gpu-box:5000");
    }

    #[test]
    fn bad_number_names_the_variable() {
        let vars = env(&[(ENV_TOP_P, "high")]);
        let err = apply_env_overrides_with(ChatForgeConfig::default(), &vars).unwrap_err();
        assert!(err.to_string().contains(ENV_TOP_P));
    }

    #[test]
    fn bad_flag_names_the_variable() {
        let vars = env(&[(ENV_DEEP_SEARCH, "maybe")]);
        let err = apply_env_overrides_with(ChatForgeConfig::default(), &vars).unwrap_err();
        assert!(err.to_string().contains(ENV_DEEP_SEARCH));
    }

    #[test]
    fn empty_values_are_ignored() {
        let vars = env(&[(ENV_TEMPERATURE, "  "), (ENV_LOG_LEVEL, "")]);
        let cfg = apply_env_overrides_with(ChatForgeConfig::default(), &vars).unwrap();
        assert_eq!(cfg, ChatForgeConfig::default());
    }
}
