//! Telemetry and structured logging components for ChatForge.
//!
//! Handles log redaction, console and rolling NDJSON output, and chat event
//! records (searches, prompts, responses, failures).

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ChatEvent, ChatEventLogger, EventLogEntry};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
