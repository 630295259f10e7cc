//! Chat Event Logger
//!
//! Structured events (search, prompt, response, error) routed through
//! `tracing` under the `chat_events` target, redacted first.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

/// Target used for every chat event, so it can be filtered separately.
pub const CHAT_EVENTS_TARGET: &str = "chat_events";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    SearchPerformed {
        query: String,
        deep: bool,
        result_count: usize,
    },
    PromptSent {
        prompt: String,
        history_len: usize,
        template: String,
    },
    ResponseReceived {
        chars: usize,
        search_used: bool,
    },
    Error {
        error_msg: String,
    },
}

impl ChatEvent {
    /// Scrub any free-form text carried by the event.
    pub fn redacted(mut self) -> Self {
        match &mut self {
            ChatEvent::SearchPerformed { query, .. } => *query = redact_sensitive_data(query),
            ChatEvent::PromptSent { prompt, .. } => *prompt = redact_sensitive_data(prompt),
            ChatEvent::Error { error_msg } => *error_msg = redact_sensitive_data(error_msg),
            ChatEvent::ResponseReceived { .. } => {}
        }
        self
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: ChatEvent,
}

pub struct ChatEventLogger;

impl ChatEventLogger {
    /// Redact and emit a chat event for the given session.
    pub fn log_event(session_id: &str, event: ChatEvent) {
        let entry = EventLogEntry {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event: event.redacted(),
        };
        info!(target: CHAT_EVENTS_TARGET, event = ?entry, "Chat event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_events_are_redacted() {
        let event = ChatEvent::PromptSent {
            prompt: "my key is sk-abcdefghijklmnopqrstuvwxyz0123".into(),
            history_len: 2,
            template: "standard".into(),
        }
        .redacted();
        let ChatEvent::PromptSent { prompt, .. } = event else {
            panic!("variant changed");
        };
        assert_eq!(prompt, "my key is [REDACTED_TOKEN]");
    }

    #[test]
    fn response_events_are_unchanged() {
        let event = ChatEvent::ResponseReceived {
            chars: 10,
            search_used: true,
        };
        assert_eq!(event.clone().redacted(), event);
    }

    #[test]
    fn logging_without_subscriber_is_a_no_op() {
        ChatEventLogger::log_event("s-1", ChatEvent::Error { error_msg: "boom".into() });
    }
}
