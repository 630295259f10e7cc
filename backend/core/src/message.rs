//! Wire records exchanged with the local generation server.

use serde::{Deserialize, Serialize};

use crate::types::ChatMessage;

/// A single web search hit, in the relevance order the search API returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

/// Body of `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub deep: bool,
}

/// Response of `POST /search`. Failures are reported as an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_prompt: String,
    pub conversation_history: Vec<ChatMessage>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub include_search_results: bool,
    pub web_search: bool,
    pub deep_search: bool,
}

/// Response of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationResponse {
    pub response: String,
    #[serde(default)]
    pub search_used: bool,
}

/// Response of `GET /status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_gemma: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// What the client concludes from a status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerStatus {
    /// Server running and the model is installed.
    Connected,
    /// Server running but the model was not found.
    ModelMissing,
    /// Server answered with a non-running status.
    Offline(String),
    /// The server could not be reached at all.
    Unreachable(String),
}

impl ServerStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ServerStatus::Connected)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServerStatus::Connected => "Neural Network Connected",
            ServerStatus::ModelMissing => "Neural Core Missing",
            ServerStatus::Offline(_) => "Neural Network Offline",
            ServerStatus::Unreachable(_) => "Neural Network Disconnected",
        }
    }
}

impl From<StatusResponse> for ServerStatus {
    fn from(resp: StatusResponse) -> Self {
        if resp.status != "running" {
            return ServerStatus::Offline(
                resp.message.unwrap_or_else(|| format!("status '{}'", resp.status)),
            );
        }
        // Older servers omit the flag; treat that as the model being present.
        match resp.has_gemma {
            Some(false) => ServerStatus::ModelMissing,
            _ => ServerStatus::Connected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_tolerates_missing_results() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.results.is_empty());
    }

    #[test]
    fn generation_request_uses_server_field_names() {
        let req = GenerationRequest {
            prompt: "hi".into(),
            system_prompt: "sys".into(),
            conversation_history: vec![ChatMessage::user("earlier")],
            temperature: 0.5,
            top_p: 0.9,
            max_tokens: 10,
            include_search_results: false,
            web_search: true,
            deep_search: false,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["system_prompt"], "sys");
        assert_eq!(value["conversation_history"][0]["role"], "user");
        assert_eq!(value["max_tokens"], 10);
        assert_eq!(value["include_search_results"], false);
    }

    #[test]
    fn status_derivation() {
        let running = |has: Option<bool>| StatusResponse {
            status: "running".into(),
            has_gemma: has,
            message: None,
        };
        assert_eq!(ServerStatus::from(running(Some(true))), ServerStatus::Connected);
        assert_eq!(ServerStatus::from(running(Some(false))), ServerStatus::ModelMissing);
        assert_eq!(ServerStatus::from(running(None)), ServerStatus::Connected);

        let down = StatusResponse {
            status: "error".into(),
            has_gemma: None,
            message: Some("Could not connect to Ollama server".into()),
        };
        assert_eq!(
            ServerStatus::from(down),
            ServerStatus::Offline("Could not connect to Ollama server".into())
        );
    }
}
