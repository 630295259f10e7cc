use anyhow::Result;
use async_trait::async_trait;

use crate::message::{
    GenerationRequest, GenerationResponse, SearchRequest, SearchResponse, ServerStatus,
};

/// The local generation server, seen from the client.
///
/// Implementations own transport details. A failed search must come back as
/// an empty `SearchResponse`, not an error.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Backend name for logs (e.g., "http", "mock").
    fn name(&self) -> &str;

    /// Check the server and model availability. Never fails.
    async fn status(&self) -> ServerStatus;

    /// Run a web search through the server.
    async fn search(&self, request: &SearchRequest) -> SearchResponse;

    /// Generate a reply.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;
}
