//! Profile-API configuration.

use std::env;

use warboard_core::CharacterIdentity;

/// API regions. Each region has its own API host; the OAuth token
/// endpoint is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Eu,
    Us,
    Kr,
    Tw,
}

impl Region {
    pub fn api_host(&self) -> &'static str {
        match self {
            Region::Eu => "https://eu.api.blizzard.com",
            Region::Us => "https://us.api.blizzard.com",
            Region::Kr => "https://kr.api.blizzard.com",
            Region::Tw => "https://tw.api.blizzard.com",
        }
    }

    pub fn token_url(&self) -> &'static str {
        "https://oauth.battle.net/token"
    }

    /// Profile namespace qualifier, e.g. `profile-eu`.
    pub fn profile_namespace(&self) -> String {
        format!("profile-{}", self.slug())
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Region::Eu => "eu",
            Region::Us => "us",
            Region::Kr => "kr",
            Region::Tw => "tw",
        }
    }
}

/// Configuration for the profile API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API region to query.
    pub region: Region,

    /// OAuth client credentials (configuration, not data).
    pub client_id: String,
    pub client_secret: String,

    /// Locale for localized fields.
    pub locale: String,

    /// Per-request timeout in seconds. Every network call is bounded.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BNET_CLIENT_ID` - OAuth client identifier (required)
    /// - `BNET_CLIENT_SECRET` - OAuth client secret (required)
    /// - `BNET_REGION` - API region (eu, us, kr, tw) (default: eu)
    /// - `BNET_LOCALE` - Response locale (default: en_GB)
    /// - `BNET_HTTP_TIMEOUT_SECS` - Request timeout (default: 10)
    pub fn from_env() -> Result<Self, String> {
        let client_id = env::var("BNET_CLIENT_ID")
            .map_err(|_| "BNET_CLIENT_ID is not set".to_string())?;
        let client_secret = env::var("BNET_CLIENT_SECRET")
            .map_err(|_| "BNET_CLIENT_SECRET is not set".to_string())?;

        let region = match env::var("BNET_REGION")
            .unwrap_or_else(|_| "eu".to_string())
            .to_lowercase()
            .as_str()
        {
            "eu" => Region::Eu,
            "us" => Region::Us,
            "kr" => Region::Kr,
            "tw" => Region::Tw,
            other => {
                return Err(format!(
                    "Invalid BNET_REGION: {}. Must be eu, us, kr, or tw",
                    other
                ));
            }
        };

        let locale = env::var("BNET_LOCALE").unwrap_or_else(|_| "en_GB".to_string());

        let timeout_secs = env::var("BNET_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);

        Ok(Self {
            region,
            client_id,
            client_secret,
            locale,
            timeout_secs,
        })
    }

    /// Character profile resource path.
    pub fn profile_path(&self, identity: &CharacterIdentity) -> String {
        format!(
            "/profile/wow/character/{}/{}?{}",
            identity.server(),
            identity.name(),
            self.query_suffix()
        )
    }

    /// Character media resource path (avatar and render assets).
    pub fn media_path(&self, identity: &CharacterIdentity) -> String {
        format!(
            "/profile/wow/character/{}/{}/character-media?{}",
            identity.server(),
            identity.name(),
            self.query_suffix()
        )
    }

    /// PvP summary resource path (enumerates brackets by reference).
    pub fn pvp_summary_path(&self, identity: &CharacterIdentity) -> String {
        format!(
            "/profile/wow/character/{}/{}/pvp-summary?{}",
            identity.server(),
            identity.name(),
            self.query_suffix()
        )
    }

    /// PvP bracket detail path, parameterized by bracket token.
    pub fn pvp_bracket_path(&self, identity: &CharacterIdentity, bracket: &str) -> String {
        format!(
            "/profile/wow/character/{}/{}/pvp-bracket/{}?{}",
            identity.server(),
            identity.name(),
            bracket,
            self.query_suffix()
        )
    }

    fn query_suffix(&self) -> String {
        format!(
            "namespace={}&locale={}",
            self.region.profile_namespace(),
            self.locale
        )
    }
}
