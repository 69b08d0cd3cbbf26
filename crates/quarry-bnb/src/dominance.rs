// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Dominance Memoization
//!
//! Two nodes that agree on everything except their target stock are twins:
//! the one with less target stock can never end better than the other. The
//! cache keys a node by `(time remaining, non-target stock, producers)` and
//! remembers the best target stock expanded under that key. A node that
//! does not beat the remembered value is pruned; an unseen key always
//! admits.
//!
//! Correctness does not depend on this cache (the bound prune alone keeps
//! the search exact), it only removes redundant expansions. The engine
//! exposes a switch to turn it off for exactly that reason.

use crate::{node::SearchNode, num::SearchNumeric};
use quarry_model::stock::StockVector;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// Memoization key: everything about a node except its target stock.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct DominanceKey<T, const R: usize> {
    time_remaining: u32,
    stock: StockVector<T, R>,
    producers: StockVector<T, R>,
}

impl<T, const R: usize> DominanceKey<T, R>
where
    T: SearchNumeric,
{
    #[inline]
    fn of(node: &SearchNode<T, R>) -> Self {
        Self {
            time_remaining: node.time_remaining(),
            stock: node.stock().with_target_cleared(),
            producers: *node.producers(),
        }
    }
}

/// A hash-based dominance cache over search nodes.
///
/// # Examples
///
/// ```rust
/// # use quarry_bnb::dominance::DominanceCache;
/// # use quarry_bnb::node::SearchNode;
/// let mut cache = DominanceCache::<u32, 4>::new();
/// let root = SearchNode::root(24);
/// assert!(cache.admit(&root));
/// assert!(!cache.admit(&root)); // An equal twin is dominated.
/// ```
#[derive(Clone, Debug)]
pub struct DominanceCache<T, const R: usize> {
    entries: FxHashMap<DominanceKey<T, R>, T>,
}

impl<T, const R: usize> DominanceCache<T, R>
where
    T: SearchNumeric,
{
    /// Creates an empty cache.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Creates an empty cache with preallocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Decides whether `node` should be expanded.
    ///
    /// Returns `false` if a twin with at least as much target stock was
    /// already admitted. Otherwise records the node's target stock as the
    /// new best for its key and returns `true`.
    pub fn admit(&mut self, node: &SearchNode<T, R>) -> bool {
        let target_stock = node.stock().target();
        match self.entries.entry(DominanceKey::of(node)) {
            Entry::Occupied(mut occupied) => {
                if *occupied.get() >= target_stock {
                    return false;
                }
                occupied.insert(target_stock);
                true
            }
            Entry::Vacant(vacant) => {
                vacant.insert(target_stock);
                true
            }
        }
    }

    /// Returns the number of distinct keys seen.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key has been admitted yet.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets everything but keeps the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T, const R: usize> Default for DominanceCache<T, R>
where
    T: SearchNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(time_remaining: u32, stock: [u32; 4], producers: [u32; 4]) -> SearchNode<u32, 4> {
        SearchNode::new(time_remaining, stock.into(), producers.into())
    }

    #[test]
    fn test_unseen_key_admits() {
        let mut cache = DominanceCache::new();
        assert!(cache.admit(&node(10, [1, 2, 3, 0], [1, 1, 0, 0])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_equal_twin_is_dominated() {
        let mut cache = DominanceCache::new();
        let state = node(10, [1, 2, 3, 4], [1, 1, 0, 1]);
        assert!(cache.admit(&state));
        assert!(!cache.admit(&state));
    }

    #[test]
    fn test_more_target_stock_beats_cached_twin() {
        let mut cache = DominanceCache::new();
        assert!(cache.admit(&node(10, [1, 2, 3, 4], [1, 1, 0, 1])));
        assert!(cache.admit(&node(10, [1, 2, 3, 5], [1, 1, 0, 1])));
        assert!(!cache.admit(&node(10, [1, 2, 3, 4], [1, 1, 0, 1])));
        // Still one key: target stock is not part of it.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_different_time_is_a_different_key() {
        let mut cache = DominanceCache::new();
        assert!(cache.admit(&node(10, [1, 2, 3, 4], [1, 1, 0, 1])));
        assert!(cache.admit(&node(9, [1, 2, 3, 4], [1, 1, 0, 1])));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_different_producers_is_a_different_key() {
        let mut cache = DominanceCache::new();
        assert!(cache.admit(&node(10, [1, 2, 3, 4], [1, 1, 0, 1])));
        assert!(cache.admit(&node(10, [1, 2, 3, 4], [2, 1, 0, 1])));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut cache = DominanceCache::new();
        let state = node(10, [1, 2, 3, 4], [1, 1, 0, 1]);
        assert!(cache.admit(&state));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.admit(&state));
    }
}
