//! Log Redaction Layer
//!
//! Scrubs API keys and access tokens from prompts and errors before they are
//! logged.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9_\-]{20,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});
static KEY_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(api[_-]?key|access[_-]?token|password)=([^\s&]+)").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    KEY_PARAM_RE
        .replace_all(&redacted, "$1=[REDACTED]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let raw = "use sk-abcdefghijklmnopqrstuvwxyz123456 with Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("sk-abcdefghijklmnopqrstuvwxyz123456"));
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
    }

    #[test]
    fn redacts_query_parameters() {
        let clean = redact_sensitive_data("GET /x?api_key=secret123&page=2");
        assert_eq!(clean, "GET /x?api_key=[REDACTED]&page=2");
    }

    #[test]
    fn leaves_ordinary_prompts_alone() {
        let raw = "What is the capital of France?";
        assert_eq!(redact_sensitive_data(raw), raw);
    }
}
