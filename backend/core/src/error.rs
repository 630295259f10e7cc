use thiserror::Error;

/// Top-level error type for the ChatForge client.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("backend error ({endpoint}): {message}")]
    Backend { endpoint: String, message: String },

    #[error("server unavailable: {0}")]
    ServerUnavailable(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_names_endpoint() {
        let err = ChatError::Backend {
            endpoint: "/generate".into(),
            message: "500 Internal Server Error".into(),
        };
        assert_eq!(
            err.to_string(),
            "backend error (/generate): 500 Internal Server Error"
        );
    }

    #[test]
    fn anyhow_is_transparent() {
        let err: ChatError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
