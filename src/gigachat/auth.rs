//! OAuth access-token acquisition for the GigaChat API.

use crate::error::{Error, Result};
use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Refresh this long before the server-side expiry.
const EXPIRY_MARGIN_MS: i64 = 60_000;

#[derive(Debug, Deserialize)]
struct OAuthResponse {
    access_token: String,
    /// Unix epoch, milliseconds.
    expires_at: i64,
}

#[derive(Debug, Clone)]
struct AccessToken {
    token: String,
    expires_at: i64,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Utc::now().timestamp_millis() + EXPIRY_MARGIN_MS < self.expires_at
    }
}

/// Exchanges the authorization key for bearer tokens and caches them.
pub struct TokenProvider {
    http: reqwest::Client,
    auth_url: String,
    auth_key: String,
    scope: String,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    pub fn new(http: reqwest::Client, auth_url: &str, auth_key: &str, scope: &str) -> Self {
        Self {
            http,
            auth_url: auth_url.to_string(),
            auth_key: auth_key.to_string(),
            scope: scope.to_string(),
            cached: Mutex::new(None),
        }
    }

    /// A valid bearer token, fetching a new one when the cache is stale.
    pub async fn token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(t) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(t.token.clone());
        }

        let fresh = self.fetch().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    /// Drop the cached token (after the API rejected it).
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn fetch(&self) -> Result<AccessToken> {
        let rq_uid = uuid::Uuid::new_v4().to_string();
        debug!("Requesting GigaChat access token (RqUID {})", rq_uid);

        let resp = self
            .http
            .post(&self.auth_url)
            .header(AUTHORIZATION, format!("Basic {}", self.auth_key))
            .header("RqUID", rq_uid)
            .header(ACCEPT, "application/json")
            .form(&[("scope", self.scope.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body: OAuthResponse = serde_json::from_str(&resp.text().await?)?;
        info!("Obtained GigaChat access token for scope {}", self.scope);
        Ok(AccessToken {
            token: body.access_token,
            expires_at: body.expires_at,
        })
    }
}
