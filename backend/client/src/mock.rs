use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chatforge_core::{
    ChatBackend, GenerationRequest, GenerationResponse, SearchRequest, SearchResponse,
    SearchResult, ServerStatus,
};

/// A mock backend that returns canned responses and records what it was asked.
pub struct MockBackend {
    name: String,
    status: ServerStatus,
    results: Vec<SearchResult>,
    fixed_response: Option<String>,
    failure: Option<String>,
    searches: Mutex<Vec<SearchRequest>>,
    generations: Mutex<Vec<GenerationRequest>>,
}

impl MockBackend {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ServerStatus::Connected,
            results: Vec::new(),
            fixed_response: None,
            failure: None,
            searches: Mutex::new(Vec::new()),
            generations: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    pub fn with_results(mut self, results: Vec<SearchResult>) -> Self {
        self.results = results;
        self
    }

    pub fn with_status(mut self, status: ServerStatus) -> Self {
        self.status = status;
        self
    }

    /// Make every `generate` call fail with this message.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn searches(&self) -> Vec<SearchRequest> {
        self.searches.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn generations(&self) -> Vec<GenerationRequest> {
        self.generations.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn status(&self) -> ServerStatus {
        self.status.clone()
    }

    async fn search(&self, request: &SearchRequest) -> SearchResponse {
        if let Ok(mut searches) = self.searches.lock() {
            searches.push(request.clone());
        }
        SearchResponse {
            results: self.results.clone(),
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        if let Ok(mut generations) = self.generations.lock() {
            generations.push(request.clone());
        }
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(GenerationResponse {
            response: self
                .fixed_response
                .clone()
                .unwrap_or_else(|| "Mock response".to_string()),
            search_used: request.include_search_results,
        })
    }
}
