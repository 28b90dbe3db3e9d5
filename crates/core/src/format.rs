//! Display formatting for bracket statistics.
//!
//! Pure helpers shared by the terminal frontend; kept here so the
//! win-rate rule (`0.0` when nothing was played) is tested once.

use crate::bracket::{BracketResult, MatchStatistics};

/// Win rate as a percentage with one decimal, `"0.0"` when no games
/// were played.
pub fn win_rate(stats: &MatchStatistics) -> String {
    if stats.played == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", f64::from(stats.won) / f64::from(stats.played) * 100.0)
}

/// One-line summary of a bracket's statistics, e.g.
/// `Wins: 7 | Losses: 3 | Win Rate: 70.0%`.
pub fn stats_line(stats: &MatchStatistics) -> String {
    format!(
        "Wins: {} | Losses: {} | Win Rate: {}%",
        stats.won,
        stats.lost,
        win_rate(stats)
    )
}

/// Human-readable spec name for a solo-shuffle bracket token:
/// `shuffle-mage-fire` → `Fire`. Falls back to the full token when it
/// does not follow the `shuffle-<class>-<spec>` convention.
pub fn spec_display_name(bracket: &str) -> String {
    let spec = bracket
        .strip_prefix("shuffle-")
        .and_then(|rest| rest.split('-').nth(1))
        .unwrap_or(bracket);
    capitalize(spec)
}

/// Ratings line across solo-shuffle brackets, highest first:
/// `Frost: 2100 | Fire: 1800`. `"0"` when the character has none.
pub fn solo_ratings_line(solo_brackets: &[&BracketResult]) -> String {
    if solo_brackets.is_empty() {
        return "0".to_string();
    }
    solo_brackets
        .iter()
        .map(|b| format!("{}: {}", spec_display_name(&b.bracket), b.rating))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
