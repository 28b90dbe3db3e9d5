//! Transport seam for the profile API.
//!
//! The [`ApiTransport`] trait is the only place the rest of the crate
//! touches the network: one token exchange and one authenticated GET.
//! `HttpTransport` is the reqwest implementation; tests use the
//! in-memory [`crate::mock::MockTransport`].
//!
//! The retry-once-on-rejection policy deliberately does NOT live here -
//! a transport performs exactly one request per call, and the snapshot
//! builder decides what a rejection means.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::auth::Credential;
use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::models::TokenResponse;

/// Low-level access to the remote profile service.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Perform the OAuth client-credentials exchange.
    async fn exchange_token(&self) -> Result<Credential>;

    /// Perform exactly one authenticated GET for the given resource
    /// path, returning the decoded JSON body.
    async fn fetch(&self, path: &str, token: &str) -> Result<serde_json::Value>;
}

/// Decode a fetched JSON value into a typed resource contract.
pub fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// reqwest-backed transport against the configured region host.
pub struct HttpTransport {
    config: ApiConfig,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with a bounded per-request timeout.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn map_request_error(e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Network("request timed out".to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn exchange_token(&self) -> Result<Credential> {
        tracing::debug!("Exchanging client credentials for an access token");

        let response = self
            .http_client
            .post(self.config.region.token_url())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .query(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| ApiError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Auth(format!("malformed token response: {}", e)))?;

        tracing::info!("Access token acquired");
        Ok(Credential::new(token.access_token))
    }

    async fn fetch(&self, path: &str, token: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.config.region.api_host(), path);

        tracing::debug!("GET {}", path);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        let status = response.status();
        match status.as_u16() {
            401 => return Err(ApiError::TokenRejected),
            404 => {
                return Err(ApiError::NotFound {
                    resource: path.to_string(),
                });
            }
            _ if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::Network(format!(
                    "unexpected status {}: {}",
                    status, body
                )));
            }
            _ => {}
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
