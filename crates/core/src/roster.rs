//! In-memory roster of tracked characters.

use crate::snapshot::CharacterSnapshot;

/// Insertion-ordered collection of character snapshots, unique by
/// identity key.
///
/// The roster itself is a plain collection: fetching and rebuilding
/// snapshots is the roster service's job in `warboard-api`. Mutations
/// are expected to stay on a single task; the service upholds that.
#[derive(Debug, Default)]
pub struct Roster {
    entries: Vec<CharacterSnapshot>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|s| s.key() == key)
    }

    pub fn get(&self, key: &str) -> Option<&CharacterSnapshot> {
        self.entries.iter().find(|s| s.key() == key)
    }

    /// Insert a snapshot. Rejected as a no-op when a snapshot with the
    /// same identity key is already present.
    pub fn insert(&mut self, snapshot: CharacterSnapshot) -> bool {
        if self.contains_key(&snapshot.key()) {
            return false;
        }
        self.entries.push(snapshot);
        true
    }

    /// Remove by key. No-op when absent.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.key() != key);
        self.entries.len() != before
    }

    /// Replace an existing snapshot wholesale, keeping its insertion
    /// position. Returns false when the key is not tracked.
    pub fn replace(&mut self, snapshot: CharacterSnapshot) -> bool {
        let key = snapshot.key();
        match self.entries.iter_mut().find(|s| s.key() == key) {
            Some(slot) => {
                *slot = snapshot;
                true
            }
            None => false,
        }
    }

    /// Ranking order for display: descending by best solo-shuffle
    /// rating. Characters with no shuffle bracket sort after all that
    /// have one. The sort is stable, so equal ratings keep roster
    /// insertion order - a deterministic tie-break.
    pub fn ranked(&self) -> Vec<&CharacterSnapshot> {
        let mut view: Vec<&CharacterSnapshot> = self.entries.iter().collect();
        view.sort_by(|a, b| {
            match (a.best_shuffle_rating(), b.best_shuffle_rating()) {
                (Some(ra), Some(rb)) => rb.cmp(&ra),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        view
    }
}
