//! Character identity: the roster's unique key.

use serde::{Deserialize, Serialize};

/// A character identity as entered by the user or read from the seed
/// list: character name plus server (realm) slug.
///
/// Both components are normalized on construction - trimmed and
/// lowercased - so `Atlas @ Tarren Mill` and `atlas,tarren mill` name
/// the same character. Identities are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterIdentity {
    name: String,
    server: String,
}

impl CharacterIdentity {
    /// Create a normalized identity from raw user input.
    pub fn new(name: &str, server: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            server: server.trim().to_lowercase(),
        }
    }

    /// Character name (normalized).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Server/realm slug (normalized).
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Unique roster key: `name-server`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.name, self.server)
    }
}

impl std::fmt::Display for CharacterIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {}", self.name, self.server)
    }
}
