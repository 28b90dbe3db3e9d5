//! Roster orchestration: the service the frontend talks to.

use warboard_core::{CharacterIdentity, CharacterSnapshot, Roster};

use crate::builder::SnapshotBuilder;
use crate::error::{ApiError, Result};

/// Outcome of a bulk seed load: how many identities made it into the
/// roster, and which failed with what.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub failures: Vec<(CharacterIdentity, ApiError)>,
}

/// Owns the roster and the snapshot builder, exposing the operations
/// the presentation layer consumes: add, remove, refresh, ranked view,
/// bulk load.
///
/// Mutations are `&mut self`, confining them to the single task that
/// owns the service - no locking is needed around the roster.
pub struct RosterService {
    roster: Roster,
    builder: SnapshotBuilder,
}

impl RosterService {
    pub fn new(builder: SnapshotBuilder) -> Self {
        Self {
            roster: Roster::new(),
            builder,
        }
    }

    /// Add a character interactively.
    ///
    /// Returns `Ok(false)` without touching the network when the
    /// normalized identity is already tracked, `Ok(true)` when the
    /// snapshot was built and inserted, and `Err` when the build
    /// failed - in which case the roster is untouched.
    pub async fn add(&mut self, name: &str, server: &str) -> Result<bool> {
        let identity = CharacterIdentity::new(name, server);
        if self.roster.contains_key(&identity.key()) {
            return Ok(false);
        }

        let snapshot = self.builder.build(&identity).await?;
        Ok(self.roster.insert(snapshot))
    }

    /// Remove by roster key. No-op when absent.
    pub fn remove(&mut self, key: &str) -> bool {
        self.roster.remove(key)
    }

    /// Rebuild an existing character's snapshot and replace it
    /// wholesale. On failure the stale snapshot is retained, so the
    /// display never flashes an empty row. `Ok(false)` when the key is
    /// not tracked.
    pub async fn refresh(&mut self, key: &str) -> Result<bool> {
        let Some(existing) = self.roster.get(key) else {
            return Ok(false);
        };
        let identity = existing.identity.clone();

        let snapshot = self.builder.build(&identity).await?;
        Ok(self.roster.replace(snapshot))
    }

    /// Snapshots in ranking order, ready for display.
    pub fn ranked_view(&self) -> Vec<&CharacterSnapshot> {
        self.roster.ranked()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Bulk-populate from parsed seed identities, sequentially, with
    /// per-identity fault isolation: one failure is recorded and the
    /// load continues with the rest.
    pub async fn load(&mut self, identities: Vec<CharacterIdentity>) -> LoadReport {
        let mut report = LoadReport::default();

        for identity in identities {
            if self.roster.contains_key(&identity.key()) {
                continue;
            }
            match self.builder.build(&identity).await {
                Ok(snapshot) => {
                    if self.roster.insert(snapshot) {
                        report.loaded += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping {} during bulk load: {}", identity, e);
                    report.failures.push((identity, e));
                }
            }
        }

        tracing::info!(
            "Bulk load complete: {} loaded, {} failed",
            report.loaded,
            report.failures.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::{ApiConfig, Region};
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

    /// Seed the mock with a healthy character with one shuffle bracket.
    fn respond_character(
        mock: &MockTransport,
        cfg: &ApiConfig,
        identity: &CharacterIdentity,
        display_name: &str,
        rating: u32,
    ) {
        mock.respond(
            &cfg.profile_path(identity),
            serde_json::json!({
                "name": display_name,
                "realm": { "slug": identity.server() },
                "character_class": { "name": "Mage" },
                "faction": { "name": "Horde" }
            }),
        );
        mock.respond(&cfg.media_path(identity), serde_json::json!({ "assets": [] }));
        mock.respond(
            &cfg.pvp_summary_path(identity),
            serde_json::json!({
                "brackets": [
                    { "href": "https://host/pvp-bracket/shuffle-mage-fire?namespace=profile-eu" }
                ]
            }),
        );
        mock.respond(
            &cfg.pvp_bracket_path(identity, "shuffle-mage-fire"),
            serde_json::json!({
                "rating": rating,
                "season_round_statistics": { "played": 60, "won": 33, "lost": 27 }
            }),
        );
    }

    fn service(mock: &Arc<MockTransport>) -> RosterService {
        RosterService::new(SnapshotBuilder::new(mock.clone(), config()))
    }

    #[tokio::test]
    async fn add_is_idempotent_per_normalized_key() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let identity = CharacterIdentity::new("atlas", "tarren mill");
        respond_character(&mock, &cfg, &identity, "Atlas", 1800);

        let mut service = service(&mock);
        assert!(service.add("Atlas", "Tarren Mill").await.unwrap());
        // Same character, different casing: no-op, no network traffic.
        assert!(!service.add(" atlas", "tarren mill ").await.unwrap());
        assert_eq!(service.len(), 1);
        assert_eq!(mock.fetch_count(&cfg.profile_path(&identity)), 1);
    }

    #[tokio::test]
    async fn failed_add_leaves_roster_untouched() {
        let mock = Arc::new(MockTransport::new());

        let mut service = service(&mock);
        let err = service.add("ghost", "nowhere").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(service.is_empty());
    }

    #[tokio::test]
    async fn bulk_load_isolates_failures() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let atlas = CharacterIdentity::new("atlas", "tarren mill");
        let braum = CharacterIdentity::new("braum", "draenor");
        respond_character(&mock, &cfg, &atlas, "Atlas", 1800);
        respond_character(&mock, &cfg, &braum, "Braum", 2100);

        let ghost = CharacterIdentity::new("ghost", "nowhere");
        let report = service(&mock)
            .load(vec![atlas, ghost.clone(), braum])
            .await;

        assert_eq!(report.loaded, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, ghost);
    }

    #[tokio::test]
    async fn bulk_load_populates_ranked_view() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let atlas = CharacterIdentity::new("atlas", "tarren mill");
        let braum = CharacterIdentity::new("braum", "draenor");
        respond_character(&mock, &cfg, &atlas, "Atlas", 1800);
        respond_character(&mock, &cfg, &braum, "Braum", 2100);

        let mut service = service(&mock);
        service.load(vec![atlas, braum]).await;

        let names: Vec<&str> = service
            .ranked_view()
            .iter()
            .map(|s| s.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Braum", "Atlas"]);
    }

    #[tokio::test]
    async fn refresh_failure_retains_stale_snapshot() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let identity = CharacterIdentity::new("atlas", "tarren mill");
        respond_character(&mock, &cfg, &identity, "Atlas", 1800);

        let mut service = service(&mock);
        service.add("atlas", "tarren mill").await.unwrap();

        // The summary starts failing; refresh must not clobber the
        // existing snapshot.
        mock.fail_network(&cfg.pvp_summary_path(&identity));
        assert!(service.refresh("atlas-tarren mill").await.is_err());

        let stale = &service.ranked_view()[0];
        assert_eq!(stale.best_shuffle_rating(), Some(1800));
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_wholesale() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let identity = CharacterIdentity::new("atlas", "tarren mill");
        respond_character(&mock, &cfg, &identity, "Atlas", 1800);

        let mut service = service(&mock);
        service.add("atlas", "tarren mill").await.unwrap();

        // Rating moved between fetches.
        respond_character(&mock, &cfg, &identity, "Atlas", 2400);
        assert!(service.refresh("atlas-tarren mill").await.unwrap());

        assert_eq!(
            service.ranked_view()[0].best_shuffle_rating(),
            Some(2400)
        );
    }

    #[tokio::test]
    async fn refresh_of_untracked_key_is_noop() {
        let mock = Arc::new(MockTransport::new());
        let mut service = service(&mock);
        assert!(!service.refresh("nobody-nowhere").await.unwrap());
    }

    #[tokio::test]
    async fn remove_then_readd_fetches_again() {
        let mock = Arc::new(MockTransport::new());
        let cfg = config();
        let identity = CharacterIdentity::new("atlas", "tarren mill");
        respond_character(&mock, &cfg, &identity, "Atlas", 1800);

        let mut service = service(&mock);
        service.add("atlas", "tarren mill").await.unwrap();
        assert!(service.remove("atlas-tarren mill"));
        assert!(service.is_empty());

        assert!(service.add("atlas", "tarren mill").await.unwrap());
        assert_eq!(mock.fetch_count(&cfg.profile_path(&identity)), 2);
    }
}
