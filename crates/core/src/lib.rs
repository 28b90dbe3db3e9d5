//! Domain model for the Warboard roster tracker.
//!
//! This crate is pure data and rules: character identities, bracket
//! results, aggregated snapshots, the roster collection with its ranking
//! order, seed-list parsing, and display formatting helpers.
//!
//! Everything network-facing (authentication, fetching, snapshot
//! building) lives in `warboard-api`; this crate has no async code and
//! no knowledge of the remote API's shape.

pub mod bracket;
pub mod format;
pub mod identity;
pub mod roster;
pub mod seed;
pub mod snapshot;

pub use bracket::{BracketResult, MatchStatistics, extract_bracket_type, is_round_based};
pub use identity::CharacterIdentity;
pub use roster::Roster;
pub use snapshot::CharacterSnapshot;
