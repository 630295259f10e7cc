use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use chatforge_core::{
    ChatBackend, ChatError, GenerationRequest, GenerationResponse, SearchRequest,
    SearchResponse, ServerStatus, StatusResponse,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Talks to the local generation server over HTTP.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ChatError::Config(format!("invalid server URL '{base_url}': {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to build URL for {path}"))
    }

    async fn fetch_status(&self) -> Result<StatusResponse> {
        let url = self.endpoint("status")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Status request failed")?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Server is not responding ({status})");
        }
        response
            .json::<StatusResponse>()
            .await
            .context("Failed to parse status response")
    }

    async fn fetch_search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = self.endpoint("search")?;
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .context("Search request failed")?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Search returned {status}");
        }
        response
            .json::<SearchResponse>()
            .await
            .context("Failed to parse search response")
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn status(&self) -> ServerStatus {
        match self.fetch_status().await {
            Ok(body) => ServerStatus::from(body),
            Err(e) => {
                debug!(error = %e, "Status check failed");
                ServerStatus::Unreachable(format!("{e:#}"))
            }
        }
    }

    async fn search(&self, request: &SearchRequest) -> SearchResponse {
        let start = Instant::now();
        match self.fetch_search(request).await {
            Ok(body) => {
                debug!(
                    results = body.results.len(),
                    deep = request.deep,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Search complete"
                );
                body
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Search failed; continuing without results");
                SearchResponse::default()
            }
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let start = Instant::now();
        let url = self.endpoint("generate")?;

        debug!(
            endpoint = %url,
            history = request.conversation_history.len(),
            max_tokens = request.max_tokens,
            "Sending generation request"
        );

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .context("Generation HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ChatError::Backend {
                endpoint: "/generate".into(),
                message: format!("{status}: {error_body}"),
            }
            .into());
        }

        let body: GenerationResponse = response
            .json()
            .await
            .context("Failed to parse generation response")?;

        debug!(
            chars = body.response.len(),
            search_used = body.search_used,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Generation complete"
        );
        Ok(body)
    }
}
