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

//! # Search Nodes
//!
//! A `SearchNode` is one immutable state of the production schedule: the
//! ticks still available, the current stock of every resource, and the
//! producer counts. Nodes are `Copy` values; the engine never mutates a
//! node in place, it derives children.
//!
//! Each tick exactly one decision is made: idle for one tick (all producers
//! deposit income) or build one producer (pay its cost, accrue income from
//! the pre-build producer set, then add the new producer, which earns from
//! the next tick on).
//!
//! ## Bounds
//!
//! - `collect_value` is the trivial lower bound: stop building and let the
//!   existing target producers run out the clock.
//! - `optimistic_bound` is the admissible upper bound: pretend one extra
//!   target producer could be built every remaining tick for free.

use crate::num::SearchNumeric;
use quarry_model::{blueprint::Blueprint, index::ResourceIndex, stock::StockVector};
use smallvec::SmallVec;

/// One immutable state of the schedule search.
///
/// # Examples
///
/// ```rust
/// # use quarry_bnb::node::SearchNode;
/// let root = SearchNode::<u32, 4>::root(24);
/// assert_eq!(root.time_remaining(), 24);
/// assert_eq!(root.stock().target(), 0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SearchNode<T, const R: usize> {
    time_remaining: u32,
    stock: StockVector<T, R>,
    producers: StockVector<T, R>,
}

impl<T, const R: usize> SearchNode<T, R>
where
    T: SearchNumeric,
{
    /// Creates the root state for a search over `horizon` ticks: empty
    /// stock and a single producer of the base resource.
    pub fn root(horizon: u32) -> Self {
        debug_assert!(R > 0, "called `SearchNode::root` with zero resource kinds");

        let mut producers = StockVector::zero();
        producers.set(ResourceIndex::new(0), T::PLUS_ONE);

        Self {
            time_remaining: horizon,
            stock: StockVector::zero(),
            producers,
        }
    }

    /// Creates a node from raw parts. Mostly useful in tests.
    #[inline]
    pub const fn new(
        time_remaining: u32,
        stock: StockVector<T, R>,
        producers: StockVector<T, R>,
    ) -> Self {
        Self {
            time_remaining,
            stock,
            producers,
        }
    }

    /// Returns the number of ticks still available.
    #[inline(always)]
    pub const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Returns the current stock vector.
    #[inline(always)]
    pub const fn stock(&self) -> &StockVector<T, R> {
        &self.stock
    }

    /// Returns the current producer counts.
    #[inline(always)]
    pub const fn producers(&self) -> &StockVector<T, R> {
        &self.producers
    }

    /// Returns `true` if no tick is left on the clock.
    #[inline(always)]
    pub const fn is_terminal(&self) -> bool {
        self.time_remaining == 0
    }

    /// The trivial lower bound: the target stock this node guarantees if
    /// no further producer is ever built.
    #[inline]
    pub fn collect_value(&self) -> T {
        // Fully qualified: `PrimInt` also carries a `NumCast::from`.
        let ticks = <T as From<u32>>::from(self.time_remaining);
        self.stock
            .target()
            .saturating_add_val(self.producers.target().saturating_mul_val(ticks))
    }

    /// The admissible upper bound on the final target stock.
    ///
    /// Assumes one additional target producer could be finished every
    /// remaining tick at no cost, on top of the steady income of the
    /// producers that already exist. No schedule can beat this, so any node
    /// whose bound does not exceed the incumbent can be discarded.
    #[inline]
    pub fn optimistic_bound(&self) -> T {
        let banked = self.stock.target();
        if self.time_remaining == 0 {
            return banked;
        }

        let ticks = <T as From<u32>>::from(self.time_remaining);
        let steady = ticks.saturating_mul_val(self.producers.target());
        // Free producers finished at ticks t-1, t-2, ... earn 1 + 2 + ... + (t-1).
        let ramp = ticks.saturating_mul_val(ticks - T::PLUS_ONE) / <T as From<u32>>::from(2);

        banked.saturating_add_val(steady).saturating_add_val(ramp)
    }

    /// Derives the idle child: every producer deposits one unit, one tick
    /// elapses.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the node is terminal.
    #[inline]
    pub fn wait(&self) -> Self {
        debug_assert!(
            !self.is_terminal(),
            "called `SearchNode::wait` on a terminal node"
        );

        Self {
            time_remaining: self.time_remaining - 1,
            stock: self.stock.saturating_add(&self.producers),
            producers: self.producers,
        }
    }

    /// Derives the child that builds one `producer` at the given cost.
    ///
    /// Returns `None` if the current stock cannot pay the cost. Income for
    /// the tick accrues from the producer counts before the build; the new
    /// producer only earns from the next tick on.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the node is terminal.
    #[inline]
    pub fn build(&self, producer: ResourceIndex, cost: &StockVector<T, R>) -> Option<Self> {
        debug_assert!(
            !self.is_terminal(),
            "called `SearchNode::build` on a terminal node"
        );

        let paid = self.stock.checked_sub(cost)?;
        Some(Self {
            time_remaining: self.time_remaining - 1,
            stock: paid.saturating_add(&self.producers),
            producers: self.producers.with_incremented(producer),
        })
    }

    /// Enumerates the children of this node under `blueprint`.
    ///
    /// A terminal node has no children. Otherwise the idle child is offered
    /// whenever waiting can still change the outcome, and one build child
    /// per producer that is affordable and still below its cap.
    pub fn successors(&self, blueprint: &Blueprint<T, R>) -> SmallVec<[Self; 8]> {
        let mut children = SmallVec::new();
        if self.is_terminal() {
            return children;
        }

        if blueprint.worth_waiting(&self.stock, &self.producers) {
            children.push(self.wait());
        }

        for i in 0..R {
            let producer = ResourceIndex::new(i);
            if !blueprint.wants_producer(producer, self.producers.get(producer)) {
                continue;
            }
            if let Some(child) = self.build(producer, blueprint.cost(producer)) {
                children.push(child);
            }
        }

        children
    }
}

impl<T, const R: usize> std::fmt::Display for SearchNode<T, R>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "t={} stock={} producers={}",
            self.time_remaining, self.stock, self.producers
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(i: usize) -> ResourceIndex {
        ResourceIndex::new(i)
    }

    fn reference_blueprint() -> Blueprint<u32, 4> {
        Blueprint::builder(1)
            .producer_cost(r(0), [4, 0, 0, 0].into())
            .producer_cost(r(1), [2, 0, 0, 0].into())
            .producer_cost(r(2), [3, 14, 0, 0].into())
            .producer_cost(r(3), [2, 0, 7, 0].into())
            .build()
            .unwrap()
    }

    #[test]
    fn test_root_state() {
        let root = SearchNode::<u32, 4>::root(24);
        assert_eq!(root.time_remaining(), 24);
        assert_eq!(*root.stock().as_array(), [0, 0, 0, 0]);
        assert_eq!(*root.producers().as_array(), [1, 0, 0, 0]);
        assert!(!root.is_terminal());
    }

    #[test]
    fn test_wait_accrues_income() {
        let node = SearchNode::<u32, 4>::new(
            5,
            [1, 0, 0, 0].into(),
            [1, 2, 0, 1].into(),
        );
        let idle = node.wait();
        assert_eq!(idle.time_remaining(), 4);
        assert_eq!(*idle.stock().as_array(), [2, 2, 0, 1]);
        assert_eq!(*idle.producers().as_array(), [1, 2, 0, 1]);
    }

    #[test]
    fn test_build_pays_then_accrues_then_adds_producer() {
        let blueprint = reference_blueprint();
        let node = SearchNode::<u32, 4>::new(
            10,
            [2, 0, 0, 0].into(),
            [1, 0, 0, 0].into(),
        );
        let child = node.build(r(1), blueprint.cost(r(1))).unwrap();
        assert_eq!(child.time_remaining(), 9);
        // Paid 2 ore, then the pre-build ore producer deposited 1.
        assert_eq!(*child.stock().as_array(), [1, 0, 0, 0]);
        assert_eq!(*child.producers().as_array(), [1, 1, 0, 0]);
    }

    #[test]
    fn test_build_unaffordable() {
        let blueprint = reference_blueprint();
        let node = SearchNode::<u32, 4>::root(24);
        assert_eq!(node.build(r(0), blueprint.cost(r(0))), None);
    }

    #[test]
    fn test_successors_of_root_is_wait_only() {
        let blueprint = reference_blueprint();
        let root = SearchNode::<u32, 4>::root(24);
        let children = root.successors(&blueprint);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0], root.wait());
    }

    #[test]
    fn test_successors_offer_affordable_builds() {
        let blueprint = reference_blueprint();
        let node = SearchNode::<u32, 4>::new(
            10,
            [4, 14, 7, 0].into(),
            [1, 1, 1, 1].into(),
        );
        let children = node.successors(&blueprint);
        // Wait plus all four builds are available.
        assert_eq!(children.len(), 5);
    }

    #[test]
    fn test_successors_skip_pointless_wait() {
        let blueprint = reference_blueprint();
        // Every producing resource already sits at its cap and no target
        // producer exists, so idling can never unlock a new build.
        let node = SearchNode::<u32, 4>::new(
            10,
            [4, 14, 7, 0].into(),
            [1, 1, 1, 0].into(),
        );
        let children = node.successors(&blueprint);
        assert_eq!(children.len(), 4);
        assert!(children.iter().all(|child| child != &node.wait()));
    }

    #[test]
    fn test_successors_respect_producer_cap() {
        let blueprint = reference_blueprint();
        // Ore producers already at the cap of 4.
        let node = SearchNode::<u32, 4>::new(
            10,
            [10, 0, 0, 0].into(),
            [4, 0, 0, 0].into(),
        );
        let children = node.successors(&blueprint);
        for child in &children {
            assert!(child.producers().get(r(0)) <= 4);
        }
    }

    #[test]
    fn test_terminal_has_no_successors() {
        let blueprint = reference_blueprint();
        let node = SearchNode::<u32, 4>::new(0, [9, 9, 9, 9].into(), [1, 1, 1, 1].into());
        assert!(node.successors(&blueprint).is_empty());
    }

    #[test]
    fn test_collect_value() {
        let node = SearchNode::<u32, 4>::new(6, [0, 0, 0, 3].into(), [1, 0, 0, 2].into());
        assert_eq!(node.collect_value(), 3 + 2 * 6);
    }

    #[test]
    fn test_optimistic_bound_closed_form() {
        let node = SearchNode::<u32, 4>::new(3, [0, 0, 0, 2].into(), [1, 0, 0, 1].into());
        // 2 banked + 3 * 1 steady + (0 + 1 + 2) ramp.
        assert_eq!(node.optimistic_bound(), 8);
    }

    #[test]
    fn test_optimistic_bound_terminal() {
        let node = SearchNode::<u32, 4>::new(0, [0, 0, 0, 7].into(), [1, 0, 0, 3].into());
        assert_eq!(node.optimistic_bound(), 7);
    }

    #[test]
    fn test_bound_dominates_collect_value() {
        let node = SearchNode::<u32, 4>::new(9, [1, 2, 3, 4].into(), [1, 1, 1, 1].into());
        assert!(node.optimistic_bound() >= node.collect_value());
    }
}
