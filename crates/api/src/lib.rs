//! Remote profile-API pipeline for Warboard.
//!
//! This crate turns a [`warboard_core::CharacterIdentity`] into a
//! [`warboard_core::CharacterSnapshot`] by talking to the Battle.net
//! profile API:
//!
//! 1. [`auth::TokenManager`] performs the OAuth client-credentials
//!    exchange lazily and caches the bearer token until rejected.
//! 2. [`transport::ApiTransport`] issues single authenticated GETs;
//!    [`transport::HttpTransport`] is the reqwest implementation and
//!    [`mock::MockTransport`] the in-memory test double.
//! 3. [`builder::SnapshotBuilder`] orchestrates the four sub-resources
//!    (profile, media, pvp-summary, per-bracket detail), applies the
//!    retry-once policy on token rejection, and fans bracket fetches
//!    out concurrently with per-bracket fault isolation.
//! 4. [`service::RosterService`] owns the roster and exposes the
//!    add/remove/refresh/load/ranked-view contract the frontend uses.

mod aggregator;
pub mod auth;
pub mod builder;
pub mod config;
pub mod error;
pub mod mock;
pub mod models;
pub mod service;
pub mod transport;

pub use auth::TokenManager;
pub use builder::SnapshotBuilder;
pub use config::{ApiConfig, Region};
pub use error::ApiError;
pub use service::{LoadReport, RosterService};
pub use transport::{ApiTransport, HttpTransport};
