use crate::platform::Platform;

pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Errors raised while resolving releases into build or update responses.
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error("failed to query release provider: {0}")]
    Request(#[source] reqwest::Error),

    #[error("release provider returned HTTP {status}{body_snippet}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body_snippet: String,
    },

    #[error("failed to parse release provider response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("unsupported platform '{0}'")]
    UnsupportedPlatform(String),

    #[error("latest version for platform '{platform}' not found")]
    NotFound { platform: Platform },

    #[error("failed to fetch signature from {url}: {reason}")]
    SignatureFetch { url: String, reason: String },

    #[error("invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },
}

impl ReleaseError {
    /// True when the release provider itself could not produce a usable release.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ReleaseError::Request(_)
                | ReleaseError::UpstreamStatus { .. }
                | ReleaseError::Decode(_)
        )
    }
}

pub(crate) fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}
