//! Client runtime configuration.

use std::env;
use std::path::PathBuf;

/// Configuration for the terminal client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Path of the seed list consumed at startup.
    pub seed_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed_file: PathBuf::from("tracked_characters.txt"),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WARBOARD_SEED_FILE` - Seed list path (default: tracked_characters.txt)
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = env::var_os("WARBOARD_SEED_FILE") {
            config.seed_file = PathBuf::from(path);
        }
        config
    }
}
