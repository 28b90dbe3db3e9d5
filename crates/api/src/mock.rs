//! Mock transport for testing without network.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::Credential;
use crate::error::{ApiError, Result};
use crate::transport::ApiTransport;

/// In-memory [`ApiTransport`] with canned responses and failure
/// injection.
///
/// Token exchanges hand out `token-1`, `token-2`, ... in sequence;
/// tokens can be marked rejected to drive the retry-once policy, and
/// individual paths can be made to fail with not-found or network
/// errors. All counters are observable for assertions.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, serde_json::Value>>>,
    not_found: Arc<Mutex<HashSet<String>>>,
    network_failures: Arc<Mutex<HashSet<String>>>,
    rejected_tokens: Arc<Mutex<HashSet<String>>>,
    fail_exchange: Arc<Mutex<bool>>,
    exchange_count: Arc<Mutex<u32>>,
    fetch_counts: Arc<Mutex<HashMap<String, u32>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned JSON response for a path.
    pub fn respond(&self, path: &str, body: serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), body);
    }

    /// Make a path fail with `NotFound`.
    pub fn fail_not_found(&self, path: &str) {
        self.not_found.lock().unwrap().insert(path.to_string());
    }

    /// Make a path fail with a network error.
    pub fn fail_network(&self, path: &str) {
        self.network_failures
            .lock()
            .unwrap()
            .insert(path.to_string());
    }

    /// Mark a token as rejected: any fetch using it returns
    /// `TokenRejected`.
    pub fn reject_token(&self, token: &str) {
        self.rejected_tokens
            .lock()
            .unwrap()
            .insert(token.to_string());
    }

    /// Make the next token exchanges fail with an auth error.
    pub fn fail_exchange(&self, fail: bool) {
        *self.fail_exchange.lock().unwrap() = fail;
    }

    pub fn exchange_count(&self) -> u32 {
        *self.exchange_count.lock().unwrap()
    }

    /// Number of fetches issued for a specific path.
    pub fn fetch_count(&self, path: &str) -> u32 {
        self.fetch_counts
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn exchange_token(&self) -> Result<Credential> {
        if *self.fail_exchange.lock().unwrap() {
            return Err(ApiError::Auth("mock exchange failure".to_string()));
        }
        let mut count = self.exchange_count.lock().unwrap();
        *count += 1;
        Ok(Credential::new(format!("token-{}", *count)))
    }

    async fn fetch(&self, path: &str, token: &str) -> Result<serde_json::Value> {
        *self
            .fetch_counts
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_insert(0) += 1;

        if self.rejected_tokens.lock().unwrap().contains(token) {
            return Err(ApiError::TokenRejected);
        }
        if self.not_found.lock().unwrap().contains(path) {
            return Err(ApiError::NotFound {
                resource: path.to_string(),
            });
        }
        if self.network_failures.lock().unwrap().contains(path) {
            return Err(ApiError::Network("mock network failure".to_string()));
        }

        self.responses
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                resource: path.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn canned_response_and_counters() {
        let mock = MockTransport::new();
        mock.respond("/thing", serde_json::json!({"ok": true}));

        let credential = mock.exchange_token().await.unwrap();
        assert_eq!(credential.token(), "token-1");

        let body = mock.fetch("/thing", credential.token()).await.unwrap();
        assert_eq!(body["ok"], true);
        assert_eq!(mock.fetch_count("/thing"), 1);
        assert_eq!(mock.exchange_count(), 1);
    }

    #[tokio::test]
    async fn rejected_token_and_unknown_path() {
        let mock = MockTransport::new();
        mock.reject_token("bad");

        assert!(matches!(
            mock.fetch("/x", "bad").await,
            Err(ApiError::TokenRejected)
        ));
        assert!(matches!(
            mock.fetch("/unknown", "good").await,
            Err(ApiError::NotFound { .. })
        ));
    }
}
