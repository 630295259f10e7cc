//! `chatforge-config`: ChatForge runtime configuration management.
//!
//! Provides:
//! - Typed config schema (server, generation, search, prompt, formatter, logging)
//! - YAML read/write with atomic backup rotation
//! - `CHATFORGE_*` environment overrides
//! - Default value application
//! - Range and shape validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, apply_env_overrides_with};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use schema::ChatForgeConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};
use std::path::Path;

/// Load, apply env overrides, apply defaults and validate a config file.
///
/// This is the main entry point for loading a config at runtime. Warnings are
/// logged; any validation error fails the load.
pub async fn load_and_prepare(path: &Path) -> Result<ChatForgeConfig> {
    let config = load_config(path).await?;
    let config = apply_env_overrides(config)?;
    let config = apply_all_defaults(config);
    check(config)
}

fn check(config: ChatForgeConfig) -> Result<ChatForgeConfig> {
    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if let Some(first) = report.errors.first() {
        bail!(
            "{first} ({} error(s) in total)",
            report.errors.len()
        );
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::GenerationConfig;

    #[test]
    fn check_rejects_invalid_config() {
        let mut cfg = ChatForgeConfig::default();
        cfg.generation = Some(GenerationConfig {
            temperature: Some(-1.0),
            ..Default::default()
        });
        let err = check(cfg).unwrap_err();
        assert!(err.to_string().contains("generation.temperature"));
    }

    #[test]
    fn check_passes_defaults_through() {
        let cfg = apply_all_defaults(ChatForgeConfig::default());
        assert_eq!(check(cfg.clone()).unwrap(), cfg);
    }
}
