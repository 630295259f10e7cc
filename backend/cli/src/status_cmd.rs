//! CLI Status Command
//!
//! Checks the generation server and reports what the client concludes.

use std::time::Duration;

use anyhow::Result;

use chatforge_client::HttpBackend;
use chatforge_config::ChatForgeConfig;
use chatforge_core::{ChatBackend, ServerStatus};

use crate::terminal::{note_error, note_success, note_warn, status_line};

/// Returns whether the server is ready to generate.
pub async fn run(config: &ChatForgeConfig) -> Result<bool> {
    let backend = HttpBackend::new(
        config.server_url(),
        Duration::from_secs(config.timeout_secs()),
    )?;
    let status = backend.status().await;

    println!("{}", status_line(&status));
    match &status {
        ServerStatus::Connected => note_success(&format!("Server at {}", backend.base_url())),
        ServerStatus::ModelMissing => {
            note_warn("Model not found. Run \"ollama pull gemma2:2b\" first.")
        }
        ServerStatus::Offline(_) | ServerStatus::Unreachable(_) => {
            note_error(&format!("Check that the server is running at {}", backend.base_url()))
        }
    }
    Ok(status.is_ready())
}
