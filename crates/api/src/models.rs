//! Decode contracts for the remote profile API.
//!
//! # Resilience to API changes
//!
//! Only the fields this crate consumes are declared; unknown fields are
//! ignored so new API fields never break deserialization. Sub-objects
//! that may be missing are `Option<T>` or `#[serde(default)]` rather
//! than runtime lookups into raw JSON.

use serde::Deserialize;

/// OAuth client-credentials token response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Character profile resource.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    pub realm: RealmRef,
    pub character_class: NamedRef,
    pub faction: NamedRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RealmRef {
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

/// Character media resource: a list of keyed assets.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterMedia {
    #[serde(default)]
    pub assets: Vec<MediaAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaAsset {
    pub key: String,
    pub value: String,
}

impl CharacterMedia {
    /// URL of the avatar asset, when present.
    pub fn avatar_url(&self) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| asset.key == "avatar")
            .map(|asset| asset.value.as_str())
    }
}

/// PvP summary resource: enumerates the character's brackets by
/// reference.
#[derive(Debug, Clone, Deserialize)]
pub struct PvpSummary {
    #[serde(default)]
    pub brackets: Vec<BracketRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BracketRef {
    pub href: String,
}

/// PvP bracket detail resource.
///
/// Solo-shuffle brackets report `season_round_statistics`, team
/// brackets `season_match_statistics`; characters that never queued a
/// bracket may miss either block, so both are optional and `rating`
/// defaults to zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PvpBracket {
    #[serde(default)]
    pub rating: u32,
    #[serde(default)]
    pub season_match_statistics: Option<SeasonStatistics>,
    #[serde(default)]
    pub season_round_statistics: Option<SeasonStatistics>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SeasonStatistics {
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub won: u32,
    #[serde(default)]
    pub lost: u32,
}
