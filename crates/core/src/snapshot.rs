//! Aggregated per-character snapshot handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::bracket::BracketResult;
use crate::identity::CharacterIdentity;

/// Point-in-time aggregation of one tracked character.
///
/// Built once per fetch by the snapshot builder and replaced wholesale
/// on refresh; never mutated in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub identity: CharacterIdentity,
    /// Display name as reported by the profile resource.
    pub display_name: String,
    pub realm_slug: String,
    pub class_name: String,
    pub faction_name: String,
    pub avatar_url: Option<String>,
    /// One entry per bracket enumerated by the pvp-summary resource.
    pub brackets: Vec<BracketResult>,
}

impl CharacterSnapshot {
    /// Roster key of the underlying identity.
    pub fn key(&self) -> String {
        self.identity.key()
    }

    /// Best rating across the character's solo-shuffle brackets, `None`
    /// when the character has no round-based bracket at all. Ranking
    /// treats `None` as below every rated character.
    pub fn best_shuffle_rating(&self) -> Option<u32> {
        self.brackets
            .iter()
            .filter(|b| b.is_round_based())
            .map(|b| b.rating)
            .max()
    }

    /// Solo-shuffle brackets sorted by rating, highest first.
    pub fn solo_brackets(&self) -> Vec<&BracketResult> {
        let mut solo: Vec<&BracketResult> = self
            .brackets
            .iter()
            .filter(|b| b.is_round_based())
            .collect();
        solo.sort_by(|a, b| b.rating.cmp(&a.rating));
        solo
    }

    /// Look up a bracket by its exact token.
    pub fn bracket(&self, token: &str) -> Option<&BracketResult> {
        self.brackets.iter().find(|b| b.bracket == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::MatchStatistics;

    fn bracket(token: &str, rating: u32) -> BracketResult {
        BracketResult {
            bracket: token.to_string(),
            rating,
            statistics: MatchStatistics::default(),
        }
    }

    fn snapshot(brackets: Vec<BracketResult>) -> CharacterSnapshot {
        CharacterSnapshot {
            identity: CharacterIdentity::new("atlas", "tarren mill"),
            display_name: "Atlas".to_string(),
            realm_slug: "tarren-mill".to_string(),
            class_name: "Mage".to_string(),
            faction_name: "HORDE".to_string(),
            avatar_url: None,
            brackets,
        }
    }

    #[test]
    fn best_shuffle_rating_ignores_team_brackets() {
        let snap = snapshot(vec![
            bracket("2v2", 2400),
            bracket("shuffle-mage-fire", 1800),
            bracket("shuffle-mage-frost", 2100),
        ]);
        assert_eq!(snap.best_shuffle_rating(), Some(2100));
    }

    #[test]
    fn best_shuffle_rating_is_none_without_shuffle_brackets() {
        let snap = snapshot(vec![bracket("2v2", 2400), bracket("3v3", 2200)]);
        assert_eq!(snap.best_shuffle_rating(), None);
    }

    #[test]
    fn solo_brackets_sorted_high_to_low() {
        let snap = snapshot(vec![
            bracket("shuffle-mage-fire", 1500),
            bracket("3v3", 2000),
            bracket("shuffle-mage-frost", 1900),
        ]);
        let tokens: Vec<&str> = snap
            .solo_brackets()
            .iter()
            .map(|b| b.bracket.as_str())
            .collect();
        assert_eq!(tokens, vec!["shuffle-mage-frost", "shuffle-mage-fire"]);
    }
}
