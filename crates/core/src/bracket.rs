//! PvP bracket results and bracket-token handling.
//!
//! A bracket is one competitive queue: the fixed team formats (`2v2`,
//! `3v3`) or a per-spec solo-shuffle queue (`shuffle-<class>-<spec>`).
//! Solo shuffle is scored per round rather than per match, which is why
//! classification lives here next to the data it gates.

use serde::{Deserialize, Serialize};

/// Season win/loss statistics for one bracket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub played: u32,
    pub won: u32,
    pub lost: u32,
}

/// Rating and statistics for one bracket of one character.
///
/// A roster snapshot always carries one entry per bracket the remote
/// summary enumerated. Brackets whose detail could not be fetched are
/// represented by the zero-valued sentinel from [`BracketResult::sentinel`],
/// never omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketResult {
    /// Bracket token, e.g. `2v2` or `shuffle-mage-fire`.
    pub bracket: String,
    pub rating: u32,
    pub statistics: MatchStatistics,
}

impl BracketResult {
    /// Zero-valued placeholder for a bracket whose detail fetch failed.
    pub fn sentinel(bracket: &str) -> Self {
        Self {
            bracket: bracket.to_string(),
            rating: 0,
            statistics: MatchStatistics::default(),
        }
    }

    /// Whether this bracket uses per-round scoring (solo shuffle).
    pub fn is_round_based(&self) -> bool {
        is_round_based(&self.bracket)
    }
}

/// Whether a bracket token denotes the individual-round (solo shuffle)
/// format. Round-based brackets report `season_round_statistics`;
/// everything else reports `season_match_statistics`.
pub fn is_round_based(bracket: &str) -> bool {
    bracket.contains("shuffle")
}

/// Derive a bracket token from the reference URL the pvp-summary
/// resource enumerates.
///
/// The token is the trailing path segment with any query suffix
/// stripped:
///
/// - `https://host/profile/.../pvp-bracket/2v2?namespace=x` → `2v2`
/// - `.../pvp-bracket/shuffle-mage-fire` → `shuffle-mage-fire`
/// - an empty or slash-terminated reference yields an empty token
pub fn extract_bracket_type(reference: &str) -> &str {
    let tail = reference.rsplit('/').next().unwrap_or(reference);
    tail.split('?').next().unwrap_or(tail)
}
