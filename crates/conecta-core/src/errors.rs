use std::time::Duration;

/// Typed error hierarchy for calls to the generative-language API.
/// Classification exists for logging and callers; nothing here is retried
/// automatically.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ProviderError {
    // Fatal
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    // Retryable (by the client, not by us)
    #[error("rate limited")]
    RateLimited,
    #[error("server error {status}: {body}")]
    ServerError { status: u16, body: String },
    #[error("network error: {0}")]
    NetworkError(String),

    // Operational
    #[error("model returned no text")]
    EmptyResponse,
    #[error("timeout after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServerError { .. } | Self::NetworkError(_) | Self::Timeout(_)
        )
    }

    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed(_) => "authentication_failed",
            Self::InvalidRequest(_) => "invalid_request",
            Self::RateLimited => "rate_limited",
            Self::ServerError { .. } => "server_error",
            Self::NetworkError(_) => "network_error",
            Self::EmptyResponse => "empty_response",
            Self::Timeout(_) => "timeout",
        }
    }

    /// Classify an HTTP status code into the appropriate error variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(body),
            400 => Self::InvalidRequest(body),
            429 => Self::RateLimited,
            500..=599 => Self::ServerError { status, body },
            _ => Self::InvalidRequest(format!("unexpected status {status}: {body}")),
        }
    }
}

/// Errors surfaced by the conversation service.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("generation failed: {0}")]
    Generation(#[from] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ProviderError::RateLimited.is_retryable());
        assert!(ProviderError::ServerError { status: 500, body: "err".into() }.is_retryable());
        assert!(ProviderError::NetworkError("tcp".into()).is_retryable());
        assert!(ProviderError::Timeout(Duration::from_secs(60)).is_retryable());
    }

    #[test]
    fn fatal_not_retryable() {
        assert!(!ProviderError::AuthenticationFailed("bad key".into()).is_retryable());
        assert!(!ProviderError::InvalidRequest("bad".into()).is_retryable());
        assert!(!ProviderError::EmptyResponse.is_retryable());
    }

    #[test]
    fn from_status_mapping() {
        assert!(matches!(
            ProviderError::from_status(401, "unauthorized".into()),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ProviderError::from_status(403, "forbidden".into()),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ProviderError::from_status(400, "bad".into()),
            ProviderError::InvalidRequest(_)
        ));
        assert!(matches!(
            ProviderError::from_status(429, "slow down".into()),
            ProviderError::RateLimited
        ));
        assert!(matches!(
            ProviderError::from_status(503, "unavailable".into()),
            ProviderError::ServerError { status: 503, .. }
        ));
        assert!(matches!(
            ProviderError::from_status(302, "redirect".into()),
            ProviderError::InvalidRequest(_)
        ));
    }

    #[test]
    fn error_kind_strings() {
        assert_eq!(ProviderError::RateLimited.error_kind(), "rate_limited");
        assert_eq!(ProviderError::EmptyResponse.error_kind(), "empty_response");
        assert_eq!(
            ProviderError::Timeout(Duration::from_secs(1)).error_kind(),
            "timeout"
        );
    }

    #[test]
    fn chat_error_wraps_provider_error() {
        let err: ChatError = ProviderError::RateLimited.into();
        assert!(matches!(err, ChatError::Generation(ProviderError::RateLimited)));
    }
}
