//! Configuration schema for gigatools.toml.

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GigaToolsConfig {
    /// GigaChat authorization key (Base64 client credentials).
    pub auth_key: String,

    /// OAuth endpoint issuing access tokens.
    pub auth_url: String,

    /// Chat API base URL.
    pub api_url: String,

    /// OAuth scope requested with the key.
    pub scope: String,

    /// Chat model name.
    pub model: String,

    /// Total attempts per request, retried on throttling and server errors.
    pub max_retries: u32,

    /// Ask the API to run its profanity filter.
    pub profanity_check: bool,

    /// Verify the API's TLS certificates.
    pub verify_ssl_certs: bool,

    /// Log outgoing request bodies at debug level.
    pub log_requests: bool,

    /// Log incoming response bodies at debug level.
    pub log_responses: bool,

    /// Per-request HTTP timeout in seconds; 0 disables it.
    pub request_timeout_secs: u64,

    /// Maximum tool calls in one turn before the session gives up.
    pub max_tool_calls_per_turn: u32,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for GigaToolsConfig {
    fn default() -> Self {
        Self {
            auth_key: String::new(),
            auth_url: "https://ngw.devices.sberbank.ru:9443/api/v2/oauth".into(),
            api_url: "https://gigachat.devices.sberbank.ru/api/v1".into(),
            scope: "GIGACHAT_API_PERS".into(),
            model: "GigaChat-2-Max".into(),
            max_retries: 3,
            profanity_check: false,
            verify_ssl_certs: false,
            log_requests: true,
            log_responses: true,
            request_timeout_secs: 60,
            max_tool_calls_per_turn: 10,
            log_level: "info".into(),
        }
    }
}

impl GigaToolsConfig {
    /// Resolve the credential: an explicit key wins over the configured one.
    pub fn resolve_auth_key(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| {
                let key = self.auth_key.trim();
                (!key.is_empty()).then(|| key.to_string())
            })
    }
}
