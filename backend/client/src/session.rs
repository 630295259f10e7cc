//! A single conversation with the local generation server.

use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use chatforge_core::{
    ChatBackend, ChatMessage, ChatSettings, GenerationRequest, SearchRequest, SearchResult,
};
use chatforge_logging::{ChatEvent, ChatEventLogger};
use chatforge_markdown::{Formatter, Renderer};

use crate::prompt::{prepare_prompt, system_prompt};

/// Outcome of one user turn.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    /// Raw model text.
    pub reply: String,
    /// Results fed into the prompt; empty when search was off or found nothing.
    pub search_results: Vec<SearchResult>,
    pub search_used: bool,
    /// The rendered assistant message container.
    pub html: String,
}

pub struct ChatSession {
    id: String,
    backend: Arc<dyn ChatBackend>,
    settings: ChatSettings,
    formatter: Formatter,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>, settings: ChatSettings, formatter: Formatter) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            backend,
            settings,
            formatter,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Send one user message: search (when enabled), generate, record both turns.
    ///
    /// On failure the history is left as it was before the call.
    pub async fn send(&mut self, text: &str) -> Result<Exchange> {
        let text = text.trim();
        if text.is_empty() {
            bail!("Cannot send an empty message");
        }

        let search_results = if self.settings.web_search {
            self.search(text).await
        } else {
            Vec::new()
        };

        let request = GenerationRequest {
            prompt: prepare_prompt(text, &search_results),
            system_prompt: system_prompt(self.settings.template, &self.settings.custom_prompt),
            conversation_history: self.history.clone(),
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
            max_tokens: self.settings.max_tokens,
            include_search_results: !search_results.is_empty(),
            web_search: self.settings.web_search,
            deep_search: self.settings.deep_search,
        };

        ChatEventLogger::log_event(
            &self.id,
            ChatEvent::PromptSent {
                prompt: request.prompt.clone(),
                history_len: request.conversation_history.len(),
                template: self.settings.template.to_string(),
            },
        );

        let response = match self.backend.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                ChatEventLogger::log_event(
                    &self.id,
                    ChatEvent::Error {
                        error_msg: format!("{e:#}"),
                    },
                );
                return Err(e);
            }
        };

        ChatEventLogger::log_event(
            &self.id,
            ChatEvent::ResponseReceived {
                chars: response.response.chars().count(),
                search_used: response.search_used,
            },
        );

        let reply = ChatMessage::assistant(response.response.clone());
        let shown_results = self.settings.web_search.then_some(search_results.as_slice());
        let html = Renderer::message(&self.formatter, &reply, shown_results, Local::now().time());

        self.history.push(ChatMessage::user(text));
        self.history.push(reply);
        info!(session = %self.id, turns = self.history.len(), "Exchange complete");

        Ok(Exchange {
            reply: response.response,
            search_results,
            search_used: response.search_used,
            html,
        })
    }

    /// Forget the conversation so far. Settings are kept.
    pub fn clear(&mut self) {
        debug!(session = %self.id, turns = self.history.len(), "Clearing history");
        self.history.clear();
    }

    async fn search(&self, query: &str) -> Vec<SearchResult> {
        let request = SearchRequest {
            query: query.to_string(),
            deep: self.settings.deep_search,
        };
        let results = self.backend.search(&request).await.results;
        ChatEventLogger::log_event(
            &self.id,
            ChatEvent::SearchPerformed {
                query: request.query,
                deep: request.deep,
                result_count: results.len(),
            },
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;
    use chatforge_core::{PromptTemplate, Role};

    fn session_with(backend: Arc<MockBackend>, settings: ChatSettings) -> ChatSession {
        ChatSession::new(backend, settings, Formatter::default())
    }

    fn sample_results() -> Vec<SearchResult> {
        vec![SearchResult::new(
            "Rust",
            "https://www.rust-lang.org",
            "Reliable and efficient software.",
        )]
    }

    #[tokio::test]
    async fn search_results_feed_the_prompt_and_the_html() {
        let backend = Arc::new(
            MockBackend::new("mock")
                .with_results(sample_results())
                .with_response("**Rust** is a language."),
        );
        let mut session = session_with(backend.clone(), ChatSettings::default());

        let exchange = session.send("What is Rust?").await.unwrap();

        assert!(exchange.search_used);
        assert_eq!(exchange.search_results, sample_results());
        assert!(exchange.html.contains(r#"<strong class="key-term">Rust</strong>"#));
        assert!(exchange.html.contains("Web References"));

        let searches = backend.searches();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].query, "What is Rust?");

        let sent = &backend.generations()[0];
        assert!(sent.prompt.contains("Source 1: Rust (https://www.rust-lang.org)"));
        assert!(sent.include_search_results);
        assert!(sent.conversation_history.is_empty());
    }

    #[tokio::test]
    async fn history_holds_raw_turns_and_is_sent_next_time() {
        let backend = Arc::new(MockBackend::new("mock").with_results(sample_results()));
        let mut session = session_with(backend.clone(), ChatSettings::default());

        session.send("first").await.unwrap();
        session.send("second").await.unwrap();

        let history = session.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0], ChatMessage::user("first"));
        assert_eq!(history[1].role, Role::Assistant);

        let second = &backend.generations()[1];
        assert_eq!(second.conversation_history.len(), 2);
        assert_eq!(second.conversation_history[0].content, "first");
    }

    #[tokio::test]
    async fn search_disabled_skips_the_search_call() {
        let backend = Arc::new(MockBackend::new("mock").with_results(sample_results()));
        let settings = ChatSettings {
            web_search: false,
            template: PromptTemplate::Expert,
            ..Default::default()
        };
        let mut session = session_with(backend.clone(), settings);

        let exchange = session.send("hello").await.unwrap();

        assert!(backend.searches().is_empty());
        assert!(exchange.search_results.is_empty());
        assert!(!exchange.html.contains("search-results"));

        let sent = &backend.generations()[0];
        assert_eq!(sent.prompt, "hello");
        assert_eq!(sent.system_prompt, system_prompt(PromptTemplate::Expert, ""));
    }

    #[tokio::test]
    async fn empty_search_shows_placeholder() {
        let backend = Arc::new(MockBackend::new("mock"));
        let mut session = session_with(backend, ChatSettings::default());

        let exchange = session.send("anything").await.unwrap();
        assert!(!exchange.search_used);
        assert!(exchange.html.contains("No relevant search results found."));
    }

    #[tokio::test]
    async fn failed_generation_leaves_history_untouched() {
        let backend = Arc::new(MockBackend::new("mock").failing("connection refused"));
        let mut session = session_with(backend, ChatSettings::default());

        let err = session.send("hello").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn blank_message_is_rejected_without_calls() {
        let backend = Arc::new(MockBackend::new("mock"));
        let mut session = session_with(backend.clone(), ChatSettings::default());

        assert!(session.send("   ").await.is_err());
        assert!(backend.searches().is_empty());
        assert!(backend.generations().is_empty());
    }

    #[tokio::test]
    async fn clear_resets_history_but_keeps_settings() {
        let backend = Arc::new(MockBackend::new("mock"));
        let settings = ChatSettings {
            max_tokens: 42,
            ..Default::default()
        };
        let mut session = session_with(backend, settings);

        session.send("hi").await.unwrap();
        session.clear();

        assert!(session.history().is_empty());
        assert_eq!(session.settings().max_tokens, 42);
    }
}
