//! Error types shared by the session, tools and GigaChat client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No GigaChat authorization key on the command line or in the config.
    #[error("missing credential: pass the GigaChat authorization key as the first argument or set `auth_key` in the config file")]
    MissingCredential,

    /// The API answered with a non-success status after all retries.
    #[error("GigaChat request failed ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("HTTP transport error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to decode GigaChat payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The model reply carried neither text nor a function call.
    #[error("GigaChat returned an empty response")]
    EmptyResponse,

    /// The model kept requesting tools past the per-turn limit.
    #[error("exceeded {0} tool calls in a single turn")]
    ToolLoop(u32),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {reason}")]
    ToolArgs { tool: String, reason: String },
}

impl Error {
    /// HTTP status and body when the failure came from the API itself.
    pub fn http_details(&self) -> Option<(u16, &str)> {
        match self {
            Self::Http { status, body } => Some((*status, body.as_str())),
            _ => None,
        }
    }

    /// Whether another attempt at the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_expose_status_and_body() {
        let err = Error::Http {
            status: 401,
            body: "unauthorized".into(),
        };
        assert_eq!(err.http_details(), Some((401, "unauthorized")));
        assert!(Error::EmptyResponse.http_details().is_none());
    }

    #[test]
    fn only_throttling_and_server_errors_are_retryable() {
        let status = |status| Error::Http {
            status,
            body: String::new(),
        };
        assert!(status(429).is_retryable());
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(401).is_retryable());
        assert!(!Error::MissingCredential.is_retryable());
    }
}
