//! Concurrent per-bracket aggregation.
//!
//! The pvp-summary resource enumerates a character's brackets by
//! reference; each bracket's detail is fetched concurrently and
//! failures are isolated per bracket. The output always has one entry
//! per enumerated bracket - a failed fetch yields the zero sentinel,
//! never a missing entry.

use std::future::Future;

use futures::future::join_all;

use warboard_core::bracket::{BracketResult, MatchStatistics, extract_bracket_type, is_round_based};

use crate::error::Result;
use crate::models::{PvpBracket, PvpSummary};

/// Fan out one detail fetch per enumerated bracket and join the
/// results. `fetch_detail` receives the bracket token and performs the
/// authenticated fetch + decode; any failure it returns is replaced by
/// the sentinel for that bracket.
///
/// Result order follows the summary's enumeration order, but callers
/// must not rely on it - the roster applies its own stable sort for
/// display.
pub(crate) async fn aggregate_brackets<F, Fut>(
    summary: &PvpSummary,
    fetch_detail: F,
) -> Vec<BracketResult>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<PvpBracket>>,
{
    let tokens: Vec<String> = summary
        .brackets
        .iter()
        .map(|reference| extract_bracket_type(&reference.href).to_string())
        .collect();

    let fetches = tokens.iter().map(|token| {
        let fut = fetch_detail(token.clone());
        async move {
            match fut.await {
                Ok(detail) => bracket_result(token, &detail),
                Err(e) => {
                    tracing::warn!("Bracket {} failed, using zero sentinel: {}", token, e);
                    BracketResult::sentinel(token)
                }
            }
        }
    });

    join_all(fetches).await
}

/// Convert a decoded bracket detail into a [`BracketResult`], selecting
/// the statistics block by format.
///
/// Solo-shuffle brackets are scored per round, so their aggregate lives
/// in `season_round_statistics`; team brackets report
/// `season_match_statistics`. Reading the wrong block silently produces
/// misleading win/loss counts, so the mapping is keyed off the bracket
/// token alone.
fn bracket_result(token: &str, detail: &PvpBracket) -> BracketResult {
    let stats = if is_round_based(token) {
        detail.season_round_statistics
    } else {
        detail.season_match_statistics
    }
    .unwrap_or_default();

    BracketResult {
        bracket: token.to_string(),
        rating: detail.rating,
        statistics: MatchStatistics {
            played: stats.played,
            won: stats.won,
            lost: stats.lost,
        },
    }
}
