//! ChatForge runtime configuration schema.
//!
//! Every section and field is optional on disk; `apply_all_defaults` fills
//! the gaps before the config reaches the rest of the workspace.

use chatforge_core::{ChatSettings, PromptTemplate};
use chatforge_markdown::FormatOptions;
use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_LOG_LEVEL, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for ChatForge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatForgeConfig {
    /// Local language-model server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Sampling parameters sent with every generation request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationConfig>,

    /// Web-search augmentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,

    /// System-prompt template selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptConfig>,

    /// Response formatter switches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<FormatterConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PromptTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_button: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_containers: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`, or any `EnvFilter` directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for the rolling JSON log; defaults to `<config dir>/logs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversions into runtime records
// ---------------------------------------------------------------------------

impl ChatForgeConfig {
    /// Per-conversation settings, with unset fields at their defaults.
    pub fn chat_settings(&self) -> ChatSettings {
        let mut settings = ChatSettings::default();
        if let Some(generation) = &self.generation {
            if let Some(t) = generation.temperature {
                settings.temperature = t;
            }
            if let Some(p) = generation.top_p {
                settings.top_p = p;
            }
            if let Some(m) = generation.max_tokens {
                settings.max_tokens = m;
            }
        }
        if let Some(search) = &self.search {
            if let Some(enabled) = search.enabled {
                settings.web_search = enabled;
            }
            if let Some(deep) = search.deep {
                settings.deep_search = deep;
            }
        }
        if let Some(prompt) = &self.prompt {
            if let Some(template) = prompt.template {
                settings.template = template;
            }
            if let Some(custom) = &prompt.custom_prompt {
                settings.custom_prompt = custom.clone();
            }
        }
        settings
    }

    pub fn format_options(&self) -> FormatOptions {
        let mut options = FormatOptions::default();
        if let Some(formatter) = &self.formatter {
            if let Some(lang) = &formatter.fallback_language {
                options.fallback_language = lang.clone();
            }
            if let Some(copy) = formatter.copy_button {
                options.copy_button = copy;
            }
            if let Some(defs) = formatter.definitions {
                options.definitions = defs;
            }
            if let Some(steps) = formatter.step_containers {
                options.step_containers = steps;
            }
        }
        options
    }

    pub fn server_url(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.base_url.as_deref())
            .unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.server
            .as_ref()
            .and_then(|s| s.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.dir.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
server:
  baseUrl: http://10.0.0.2:5000
generation:
  topP: 0.5
  maxTokens: 256
prompt:
  template: researcher
formatter:
  copyButton: false
"#;
        let cfg: ChatForgeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.server_url(), "http://10.0.0.2:5000");

        let settings = cfg.chat_settings();
        assert_eq!(settings.top_p, 0.5);
        assert_eq!(settings.max_tokens, 256);
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.template, PromptTemplate::Researcher);

        let options = cfg.format_options();
        assert!(!options.copy_button);
        assert!(options.definitions);
    }

    #[test]
    fn empty_config_converts_to_defaults() {
        let cfg = ChatForgeConfig::default();
        assert_eq!(cfg.chat_settings(), ChatSettings::default());
        assert_eq!(cfg.format_options(), FormatOptions::default());
        assert_eq!(cfg.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(cfg.log_level(), DEFAULT_LOG_LEVEL);
        assert!(cfg.log_dir().is_none());
    }

    #[test]
    fn unset_sections_are_not_serialized() {
        let yaml = serde_yaml::to_string(&ChatForgeConfig::default()).unwrap();
        assert_eq!(yaml.trim(), "{}");
    }
}
