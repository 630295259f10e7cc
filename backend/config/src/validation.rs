//! Config validation: range and shape checks with user-friendly messages.

use crate::schema::ChatForgeConfig;
use chatforge_core::PromptTemplate;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &ChatForgeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_generation(config, &mut report);
    validate_search(config, &mut report);
    validate_prompt(config, &mut report);
    report
}

fn validate_server(config: &ChatForgeConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if let Some(url) = &server.base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            report.error(
                "server.baseUrl",
                format!("'{url}' must start with http:// or https://"),
            );
        }
    }
    if server.timeout_secs == Some(0) {
        report.error("server.timeoutSecs", "timeoutSecs must be >= 1");
    }
}

fn validate_generation(config: &ChatForgeConfig, report: &mut ValidationReport) {
    let Some(generation) = &config.generation else { return };
    if let Some(t) = generation.temperature {
        if !(0.0..=2.0).contains(&t) {
            report.error(
                "generation.temperature",
                format!("temperature {t} is outside [0, 2]"),
            );
        }
    }
    if let Some(p) = generation.top_p {
        if !(p > 0.0 && p <= 1.0) {
            report.error("generation.topP", format!("topP {p} is outside (0, 1]"));
        }
    }
    if generation.max_tokens == Some(0) {
        report.error("generation.maxTokens", "maxTokens must be >= 1");
    }
}

fn validate_search(config: &ChatForgeConfig, report: &mut ValidationReport) {
    let Some(search) = &config.search else { return };
    if search.deep == Some(true) && search.enabled == Some(false) {
        report.warn(
            "search.deep",
            "Deep search has no effect while web search is disabled",
        );
    }
}

fn validate_prompt(config: &ChatForgeConfig, report: &mut ValidationReport) {
    let Some(prompt) = &config.prompt else { return };
    if prompt.template == Some(PromptTemplate::Custom)
        && prompt
            .custom_prompt
            .as_deref()
            .map(|p| p.trim().is_empty())
            .unwrap_or(true)
    {
        report.warn(
            "prompt.customPrompt",
            "Custom template selected without a custom prompt; the standard prompt will be used",
        );
    }
}
