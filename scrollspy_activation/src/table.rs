// Copyright 2026 the Scrollspy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed latest-value store for visibility snapshots.

use core::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Iter;

use crate::snapshot::VisibilitySnapshot;

/// Maps each tracked section key to its latest [`VisibilitySnapshot`].
///
/// An entry is created the first time a report arrives for a key and is
/// overwritten unconditionally on every later report. Entries are never
/// removed individually; [`SnapshotTable::clear`] discards everything at
/// once when tracking is torn down. Stale entries (sections that have since
/// scrolled far away) are expected and harmless — they simply stop
/// intersecting.
///
/// # Type Parameters
///
/// - `K`: the section key type, typically a string id. Must be `Eq + Hash`.
#[derive(Debug, Clone)]
pub struct SnapshotTable<K>
where
    K: Eq + Hash,
{
    entries: HashMap<K, VisibilitySnapshot>,
}

impl<K> Default for SnapshotTable<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> SnapshotTable<K>
where
    K: Eq + Hash,
{
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Records the latest snapshot for a key, replacing any prior snapshot.
    pub fn apply(&mut self, key: K, snapshot: VisibilitySnapshot) {
        self.entries.insert(key, snapshot);
    }

    /// Records a batch of snapshots, e.g. one host delivery after a layout
    /// pass.
    ///
    /// Later entries in the batch win when the same key appears twice.
    pub fn apply_batch<I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (K, VisibilitySnapshot)>,
    {
        for (key, snapshot) in updates {
            self.apply(key, snapshot);
        }
    }

    /// Returns the latest snapshot for a key, if one has ever been reported.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&VisibilitySnapshot> {
        self.entries.get(key)
    }

    /// Returns `true` if a snapshot has been reported for the key.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys with a recorded snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no snapshots have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all `(key, snapshot)` entries in unspecified order.
    pub fn iter(&self) -> Iter<'_, K, VisibilitySnapshot> {
        self.entries.iter()
    }

    /// Discards all entries. Used when tracking is torn down.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a, K> IntoIterator for &'a SnapshotTable<K>
where
    K: Eq + Hash,
{
    type Item = (&'a K, &'a VisibilitySnapshot);
    type IntoIter = Iter<'a, K, VisibilitySnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
