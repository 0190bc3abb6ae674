// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded vertex deduplication cache
//!
//! Maps a resolved `(position, uv, normal)` triple to the index it was given
//! in the active primitive. The cache is wiped whenever the active primitive
//! changes and once it has taken more inserts than its limit.

use rustc_hash::FxHashMap;

/// Resolved, zero-based attribute indices of one face corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexKey {
    pub position: usize,
    pub uv: Option<usize>,
    pub normal: Option<usize>,
}

#[derive(Debug)]
pub struct VertexCache {
    entries: FxHashMap<VertexKey, u32>,
    inserted: usize,
    limit: usize,
}

impl VertexCache {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            inserted: 0,
            limit,
        }
    }

    #[inline]
    pub fn get(&self, key: &VertexKey) -> Option<u32> {
        self.entries.get(key).copied()
    }

    /// Record the primitive-local index of a vertex
    ///
    /// Returns `true` when the insert pushed the cache past its limit and
    /// everything was evicted.
    pub fn insert(&mut self, key: VertexKey, index: u32) -> bool {
        self.entries.insert(key, index);
        self.inserted += 1;
        if self.inserted > self.limit {
            log::debug!(
                "Vertex cache exceeded {} entries, clearing",
                self.limit
            );
            self.clear();
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.inserted = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
