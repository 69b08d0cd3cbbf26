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

//! # Best-First Frontier
//!
//! A max-heap over pending search nodes. Nodes with more target producers
//! pop first, ties broken towards more remaining time. This ordering is a
//! heuristic only: it drives the incumbent up early so the bound prune
//! bites sooner, but any pop order yields the same optimum.

use crate::{node::SearchNode, num::SearchNumeric};
use std::{cmp::Ordering, collections::BinaryHeap};

/// Heap entry wrapping a node with the best-first ordering.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry<T, const R: usize> {
    node: SearchNode<T, R>,
}

impl<T, const R: usize> FrontierEntry<T, R>
where
    T: SearchNumeric,
{
    #[inline(always)]
    fn key(&self) -> (T, u32) {
        (self.node.producers().target(), self.node.time_remaining())
    }
}

impl<T, const R: usize> PartialEq for FrontierEntry<T, R>
where
    T: SearchNumeric,
{
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T, const R: usize> Eq for FrontierEntry<T, R> where T: SearchNumeric {}

impl<T, const R: usize> PartialOrd for FrontierEntry<T, R>
where
    T: SearchNumeric,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, const R: usize> Ord for FrontierEntry<T, R>
where
    T: SearchNumeric,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// The pending-node queue of the engine.
///
/// # Examples
///
/// ```rust
/// # use quarry_bnb::frontier::Frontier;
/// # use quarry_bnb::node::SearchNode;
/// let mut frontier = Frontier::<u32, 4>::new();
/// frontier.push(SearchNode::root(24));
/// assert_eq!(frontier.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Frontier<T, const R: usize> {
    heap: BinaryHeap<FrontierEntry<T, R>>,
}

impl<T, const R: usize> Frontier<T, R>
where
    T: SearchNumeric,
{
    /// Creates an empty frontier.
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Creates an empty frontier with preallocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Pushes a node onto the frontier.
    #[inline]
    pub fn push(&mut self, node: SearchNode<T, R>) {
        self.heap.push(FrontierEntry { node });
    }

    /// Pops the best node, or `None` if the frontier is exhausted.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchNode<T, R>> {
        self.heap.pop().map(|entry| entry.node)
    }

    /// Returns the number of pending nodes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no node is pending.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops all pending nodes but keeps the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T, const R: usize> Default for Frontier<T, R>
where
    T: SearchNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}
