//! Access-token lifecycle management.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::error::Result;
use crate::transport::ApiTransport;

/// A bearer credential obtained from the token endpoint.
#[derive(Debug, Clone)]
pub struct Credential {
    token: String,
    obtained_at: Instant,
}

impl Credential {
    pub fn new(token: String) -> Self {
        Self {
            token,
            obtained_at: Instant::now(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn obtained_at(&self) -> Instant {
        self.obtained_at
    }
}

/// Process-wide owner of the single live [`Credential`].
///
/// The token is acquired lazily on first use and trusted until a caller
/// reports it rejected - there is no expiry tracking. The cache lives
/// behind one async mutex that is held across the exchange, so
/// concurrent callers that all miss (or all saw the same rejection)
/// coalesce into a single exchange instead of racing the token
/// endpoint.
pub struct TokenManager {
    transport: Arc<dyn ApiTransport>,
    cached: Mutex<Option<Credential>>,
}

impl TokenManager {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            transport,
            cached: Mutex::new(None),
        }
    }

    /// Return the cached token, performing the client-credentials
    /// exchange first when the cache is empty.
    pub async fn token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(credential) = cached.as_ref() {
            return Ok(credential.token().to_string());
        }

        let credential = self.transport.exchange_token().await?;
        let token = credential.token().to_string();
        *cached = Some(credential);
        Ok(token)
    }

    /// Drop the cached credential so the next [`Self::token`] call
    /// re-authenticates.
    ///
    /// The cache is only cleared when it still holds `stale` - a caller
    /// reporting a rejection of an already-replaced token must not
    /// discard the fresh credential another caller just obtained.
    pub async fn invalidate(&self, stale: &str) {
        let mut cached = self.cached.lock().await;
        if cached.as_ref().is_some_and(|c| c.token() == stale) {
            tracing::info!("Cached access token invalidated");
            *cached = None;
        }
    }
}
