//! Snapshot building: compose profile, media, and aggregated brackets
//! into one [`CharacterSnapshot`].

use std::sync::Arc;

use serde::de::DeserializeOwned;

use warboard_core::{CharacterIdentity, CharacterSnapshot};

use crate::aggregator::aggregate_brackets;
use crate::auth::TokenManager;
use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::models::{CharacterMedia, CharacterProfile, PvpBracket, PvpSummary};
use crate::transport::{ApiTransport, decode};

/// Builds normalized character snapshots from the remote API.
///
/// Owns the retry-once-on-rejection policy: a request whose token is
/// rejected invalidates the credential and retries exactly once with a
/// fresh one; a second rejection is fatal for that operation. The
/// transport below never retries on its own.
pub struct SnapshotBuilder {
    transport: Arc<dyn ApiTransport>,
    tokens: TokenManager,
    config: ApiConfig,
}

impl SnapshotBuilder {
    pub fn new(transport: Arc<dyn ApiTransport>, config: ApiConfig) -> Self {
        let tokens = TokenManager::new(transport.clone());
        Self {
            transport,
            tokens,
            config,
        }
    }

    /// Fetch every sub-resource for `identity` and compose a snapshot.
    ///
    /// Profile and pvp-summary failures abort the build; media failures
    /// and individual bracket failures degrade (missing avatar, zero
    /// sentinel brackets). A `NotFound` from the profile step means the
    /// character does not exist on that server.
    pub async fn build(&self, identity: &CharacterIdentity) -> Result<CharacterSnapshot> {
        tracing::debug!("Building snapshot for {}", identity);

        let profile: CharacterProfile = self
            .fetch_resource(&self.config.profile_path(identity))
            .await?;

        let avatar_url = match self
            .fetch_resource::<CharacterMedia>(&self.config.media_path(identity))
            .await
        {
            Ok(media) => media.avatar_url().map(str::to_string),
            Err(e) => {
                tracing::warn!("Media for {} unavailable: {}", identity, e);
                None
            }
        };

        let summary: PvpSummary = self
            .fetch_resource(&self.config.pvp_summary_path(identity))
            .await?;

        let brackets =
            aggregate_brackets(&summary, |bracket| self.fetch_bracket(identity, bracket)).await;

        tracing::info!(
            "Snapshot built for {}: {} brackets",
            identity,
            brackets.len()
        );

        Ok(CharacterSnapshot {
            identity: identity.clone(),
            display_name: profile.name,
            realm_slug: profile.realm.slug,
            class_name: profile.character_class.name,
            faction_name: profile.faction.name.to_uppercase(),
            avatar_url,
            brackets,
        })
    }

    async fn fetch_bracket(
        &self,
        identity: &CharacterIdentity,
        bracket: String,
    ) -> Result<PvpBracket> {
        self.fetch_resource(&self.config.pvp_bracket_path(identity, &bracket))
            .await
    }

    async fn fetch_resource<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        decode(self.fetch_with_retry(path).await?)
    }

    /// One authenticated fetch with the retry-once policy applied.
    async fn fetch_with_retry(&self, path: &str) -> Result<serde_json::Value> {
        let token = self.tokens.token().await?;
        match self.transport.fetch(path, &token).await {
            Err(ApiError::TokenRejected) => {
                self.tokens.invalidate(&token).await;
                let fresh = self.tokens.token().await?;
                match self.transport.fetch(path, &fresh).await {
                    Err(ApiError::TokenRejected) => Err(ApiError::Auth(
                        "access token rejected twice".to_string(),
                    )),
                    other => other,
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Region;
    use crate::mock::MockTransport;

    fn config() -> ApiConfig {
        ApiConfig {
            region: Region::Eu,
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            locale: "en_GB".to_string(),
            timeout_secs: 10,
        }
    }

    fn identity() -> CharacterIdentity {
        CharacterIdentity::new("atlas", "tarren-mill")
    }

    /// Seed the mock with a complete, healthy character.
    fn respond_character(mock: &MockTransport, cfg: &ApiConfig, identity: &CharacterIdentity) {
        mock.respond(
            &cfg.profile_path(identity),
            serde_json::json!({
                "name": "Atlas",
                "realm": { "slug": "tarren-mill" },
                "character_class": { "name": "Mage" },
                "faction": { "name": "Horde" }
            }),
        );
        mock.respond(
            &cfg.media_path(identity),
            serde_json::json!({
                "assets": [{ "key": "avatar", "value": "https://cdn/avatar.png" }]
            }),
        );
        mock.respond(
            &cfg.pvp_summary_path(identity),
            serde_json::json!({
                "brackets": [
                    { "href": "https://host/pvp-bracket/shuffle-mage-fire?namespace=profile-eu" },
                    { "href": "https://host/pvp-bracket/2v2?namespace=profile-eu" },
                    { "href": "https://host/pvp-bracket/3v3?namespace=profile-eu" }
                ]
            }),
        );
        mock.respond(
            &cfg.pvp_bracket_path(identity, "shuffle-mage-fire"),
            serde_json::json!({
                "rating": 1800,
                "season_round_statistics": { "played": 60, "won": 33, "lost": 27 }
            }),
        );
        mock.respond(
            &cfg.pvp_bracket_path(identity, "2v2"),
            serde_json::json!({
                "rating": 1500,
                "season_match_statistics": { "played": 20, "won": 12, "lost": 8 }
            }),
        );
        mock.respond(
            &cfg.pvp_bracket_path(identity, "3v3"),
            serde_json::json!({
                "rating": 1400,
                "season_match_statistics": { "played": 10, "won": 4, "lost": 6 }
            }),
        );
    }

    #[tokio::test]
    async fn composes_full_snapshot() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let identity = identity();
        respond_character(&mock, &cfg, &identity);

        let builder = SnapshotBuilder::new(mock.clone(), cfg);
        let snapshot = builder.build(&identity).await.unwrap();

        assert_eq!(snapshot.display_name, "Atlas");
        assert_eq!(snapshot.realm_slug, "tarren-mill");
        assert_eq!(snapshot.class_name, "Mage");
        assert_eq!(snapshot.faction_name, "HORDE");
        assert_eq!(snapshot.avatar_url.as_deref(), Some("https://cdn/avatar.png"));
        assert_eq!(snapshot.brackets.len(), 3);
        assert_eq!(snapshot.best_shuffle_rating(), Some(1800));
    }

    #[tokio::test]
    async fn failed_bracket_becomes_sentinel_without_failing_build() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let identity = identity();
        respond_character(&mock, &cfg, &identity);
        mock.fail_network(&cfg.pvp_bracket_path(&identity, "3v3"));

        let builder = SnapshotBuilder::new(mock.clone(), cfg);
        let snapshot = builder.build(&identity).await.unwrap();

        assert_eq!(snapshot.brackets.len(), 3);
        let threes = snapshot.bracket("3v3").unwrap();
        assert_eq!(threes.rating, 0);
        assert_eq!(threes.statistics.played, 0);
        // The other two keep their real values.
        assert_eq!(snapshot.bracket("2v2").unwrap().rating, 1500);
        assert_eq!(snapshot.bracket("shuffle-mage-fire").unwrap().rating, 1800);
    }

    #[tokio::test]
    async fn missing_profile_aborts_with_not_found() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let identity = identity();

        let builder = SnapshotBuilder::new(mock.clone(), cfg);
        let err = builder.build(&identity).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn media_failure_degrades_to_missing_avatar() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let identity = identity();
        respond_character(&mock, &cfg, &identity);
        mock.fail_network(&cfg.media_path(&identity));

        let builder = SnapshotBuilder::new(mock.clone(), cfg);
        let snapshot = builder.build(&identity).await.unwrap();
        assert_eq!(snapshot.avatar_url, None);
    }

    #[tokio::test]
    async fn summary_failure_aborts_build() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let identity = identity();
        respond_character(&mock, &cfg, &identity);
        mock.fail_network(&cfg.pvp_summary_path(&identity));

        let builder = SnapshotBuilder::new(mock.clone(), cfg);
        assert!(builder.build(&identity).await.is_err());
    }

    #[tokio::test]
    async fn rejected_token_invalidates_once_and_retries_once() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let identity = identity();
        let profile_path = cfg.profile_path(&identity);
        respond_character(&mock, &cfg, &identity);

        // The first issued token is rejected; its replacement works.
        mock.reject_token("token-1");

        let builder = SnapshotBuilder::new(mock.clone(), cfg);
        let snapshot = builder.build(&identity).await.unwrap();

        assert_eq!(snapshot.display_name, "Atlas");
        // One exchange for the initial token, one after invalidation.
        assert_eq!(mock.exchange_count(), 2);
        // The profile request ran twice: rejected, then retried.
        assert_eq!(mock.fetch_count(&profile_path), 2);
    }

    #[tokio::test]
    async fn second_rejection_is_fatal_without_further_retry() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let identity = identity();
        let profile_path = cfg.profile_path(&identity);
        respond_character(&mock, &cfg, &identity);

        mock.reject_token("token-1");
        mock.reject_token("token-2");

        let builder = SnapshotBuilder::new(mock.clone(), cfg);
        let err = builder.build(&identity).await.unwrap_err();

        assert!(matches!(err, ApiError::Auth(_)));
        // Exactly one retry: the rejected request ran twice, not three
        // times.
        assert_eq!(mock.fetch_count(&profile_path), 2);
    }

    #[tokio::test]
    async fn exchange_failure_surfaces_as_auth_error() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        mock.fail_exchange(true);

        let builder = SnapshotBuilder::new(mock.clone(), cfg);
        let err = builder.build(&identity()).await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
    }
}
