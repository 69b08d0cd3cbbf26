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

//! # Branch-and-Bound Engine
//!
//! The `BnbSolver` maximizes the final target-resource stock reachable from
//! the root state within the horizon. The search is best-first: a max-heap
//! frontier pops target-producer-rich nodes early so a strong incumbent
//! forms fast, after which the optimistic bound discards most of the tree.
//!
//! Every popped node first raises the incumbent with its trivial
//! collect-to-the-end value, then has to survive two prunes: the admissible
//! upper bound against the incumbent, and the dominance memo against
//! already expanded twins. Survivors expand into at most `R + 1` children
//! (idle plus one build per eligible producer).
//!
//! The solver itself is reusable: `solve` runs a fresh session and clears
//! the frontier and memo afterwards, keeping the allocations for the next
//! blueprint.

use crate::{
    dominance::DominanceCache,
    frontier::Frontier,
    monitor::{
        no_op::NoOperationMonitor,
        tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    },
    node::SearchNode,
    num::SearchNumeric,
    result::{BnbSolverOutcome, BnbTerminationReason},
    stats::BnbSolverStatistics,
};
use quarry_model::blueprint::Blueprint;

/// A reusable best-first branch-and-bound engine.
///
/// # Examples
///
/// ```rust
/// # use quarry_bnb::bnb::BnbSolver;
/// # use quarry_bnb::monitor::no_op::NoOperationMonitor;
/// # use quarry_model::blueprint::Blueprint;
/// # use quarry_model::index::ResourceIndex;
/// let blueprint = Blueprint::<u32, 4>::builder(1)
///     .producer_cost(ResourceIndex::new(0), [4, 0, 0, 0].into())
///     .producer_cost(ResourceIndex::new(1), [2, 0, 0, 0].into())
///     .producer_cost(ResourceIndex::new(2), [3, 14, 0, 0].into())
///     .producer_cost(ResourceIndex::new(3), [2, 0, 7, 0].into())
///     .build()
///     .unwrap();
///
/// let mut solver = BnbSolver::new();
/// let outcome = solver.solve(&blueprint, 12, NoOperationMonitor::new());
/// assert!(outcome.is_exact());
/// ```
#[derive(Clone, Debug)]
pub struct BnbSolver<T, const R: usize> {
    frontier: Frontier<T, R>,
    dominance: DominanceCache<T, R>,
    dominance_enabled: bool,
}

impl<T, const R: usize> BnbSolver<T, R>
where
    T: SearchNumeric,
{
    /// Creates a new engine with empty structures.
    #[inline]
    pub fn new() -> Self {
        Self {
            frontier: Frontier::new(),
            dominance: DominanceCache::new(),
            dominance_enabled: true,
        }
    }

    /// Creates a new engine with preallocated frontier and memo capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frontier: Frontier::with_capacity(capacity),
            dominance: DominanceCache::with_capacity(capacity),
            dominance_enabled: true,
        }
    }

    /// Returns whether the dominance memo is consulted.
    #[inline(always)]
    pub fn dominance_enabled(&self) -> bool {
        self.dominance_enabled
    }

    /// Enables or disables the dominance memo.
    ///
    /// The memo only removes redundant expansions; the result is identical
    /// either way. Disabling it is mainly useful for validating exactly
    /// that, and for bounding memory on huge runs.
    #[inline]
    pub fn set_dominance_enabled(&mut self, enabled: bool) {
        self.dominance_enabled = enabled;
    }

    /// Clears the frontier and the dominance memo, keeping allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.frontier.clear();
        self.dominance.clear();
    }

    /// Runs the search for `blueprint` over `horizon` ticks.
    ///
    /// Returns the best target-resource score found, flagged exact when the
    /// frontier was exhausted, and the statistics of the run. The engine is
    /// reset afterwards and ready for the next call.
    pub fn solve<S>(
        &mut self,
        blueprint: &Blueprint<T, R>,
        horizon: u32,
        monitor: S,
    ) -> BnbSolverOutcome<T>
    where
        S: TreeSearchMonitor<T, R>,
    {
        let session = BnbSolverSearchSession {
            solver: self,
            blueprint,
            horizon,
            monitor,
            statistics: BnbSolverStatistics::default(),
            best_score: T::ZERO,
        };
        let outcome = session.run();
        self.reset();
        outcome
    }
}

impl<T, const R: usize> Default for BnbSolver<T, R>
where
    T: SearchNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Solves `blueprint` over `horizon` ticks silently and returns the proven
/// optimal target-resource score.
///
/// Convenience wrapper for callers that need neither monitors nor
/// statistics.
///
/// # Examples
///
/// ```rust
/// # use quarry_bnb::bnb::optimize;
/// # use quarry_model::blueprint::Blueprint;
/// # use quarry_model::index::ResourceIndex;
/// let blueprint = Blueprint::<u32, 4>::builder(1)
///     .producer_cost(ResourceIndex::new(0), [4, 0, 0, 0].into())
///     .producer_cost(ResourceIndex::new(1), [2, 0, 0, 0].into())
///     .producer_cost(ResourceIndex::new(2), [3, 14, 0, 0].into())
///     .producer_cost(ResourceIndex::new(3), [2, 0, 7, 0].into())
///     .build()
///     .unwrap();
///
/// assert_eq!(optimize(&blueprint, 0), 0);
/// ```
pub fn optimize<T, const R: usize>(blueprint: &Blueprint<T, R>, horizon: u32) -> T
where
    T: SearchNumeric,
{
    let mut solver = BnbSolver::new();
    solver
        .solve(blueprint, horizon, NoOperationMonitor::new())
        .best_score()
}

/// One search run: borrows the solver's reusable structures and owns the
/// per-run state (incumbent, statistics, monitor).
struct BnbSolverSearchSession<'a, T, const R: usize, S> {
    solver: &'a mut BnbSolver<T, R>,
    blueprint: &'a Blueprint<T, R>,
    horizon: u32,
    monitor: S,
    statistics: BnbSolverStatistics,
    best_score: T,
}

impl<'a, T, const R: usize, S> BnbSolverSearchSession<'a, T, R, S>
where
    T: SearchNumeric,
    S: TreeSearchMonitor<T, R>,
{
    fn run(mut self) -> BnbSolverOutcome<T> {
        let start_time = std::time::Instant::now();
        self.monitor.on_enter_search(self.blueprint, &self.statistics);

        self.solver.frontier.push(SearchNode::root(self.horizon));
        self.statistics.on_nodes_enqueued(1);

        let reason = loop {
            let node = match self.solver.frontier.pop() {
                Some(node) => node,
                None => break BnbTerminationReason::FrontierExhausted,
            };

            self.statistics.on_node_explored();
            self.statistics
                .on_frontier_len(self.solver.frontier.len() as u64);
            self.monitor.on_step(&node, &self.statistics);

            if let SearchCommand::Terminate(reason) =
                self.monitor.search_command(&node, &self.statistics)
            {
                break BnbTerminationReason::Aborted(reason);
            }

            // Every node guarantees at least its collect-to-the-end value.
            let guaranteed = node.collect_value();
            if guaranteed > self.best_score {
                self.best_score = guaranteed;
                self.statistics.on_best_update();
                self.monitor.on_best_updated(guaranteed, &self.statistics);
            }

            if node.optimistic_bound() <= self.best_score {
                self.statistics.on_pruning_bound();
                self.monitor
                    .on_prune(&node, PruneReason::BoundDominated, &self.statistics);
                continue;
            }

            if self.solver.dominance_enabled && !self.solver.dominance.admit(&node) {
                self.statistics.on_pruning_dominated();
                self.monitor
                    .on_prune(&node, PruneReason::StateDominated, &self.statistics);
                continue;
            }

            if node.is_terminal() {
                continue;
            }

            let children = node.successors(self.blueprint);
            let count = children.len();
            for child in children {
                self.solver.frontier.push(child);
            }
            self.statistics.on_nodes_enqueued(count as u64);
            self.monitor.on_expand(&node, count, &self.statistics);
        };

        self.statistics.set_total_time(start_time.elapsed());
        self.monitor.on_exit_search(&self.statistics);

        match reason {
            BnbTerminationReason::FrontierExhausted => {
                BnbSolverOutcome::exhausted(self.best_score, self.statistics)
            }
            BnbTerminationReason::Aborted(message) => {
                BnbSolverOutcome::aborted(self.best_score, message, self.statistics)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::time_limit::TimeLimitMonitor;
    use quarry_model::index::ResourceIndex;
    use std::time::Duration;

    fn r(i: usize) -> ResourceIndex {
        ResourceIndex::new(i)
    }

    fn blueprint_a() -> Blueprint<u32, 4> {
        Blueprint::builder(1)
            .producer_cost(r(0), [4, 0, 0, 0].into())
            .producer_cost(r(1), [2, 0, 0, 0].into())
            .producer_cost(r(2), [3, 14, 0, 0].into())
            .producer_cost(r(3), [2, 0, 7, 0].into())
            .build()
            .unwrap()
    }

    fn blueprint_b() -> Blueprint<u32, 4> {
        Blueprint::builder(2)
            .producer_cost(r(0), [2, 0, 0, 0].into())
            .producer_cost(r(1), [3, 0, 0, 0].into())
            .producer_cost(r(2), [3, 8, 0, 0].into())
            .producer_cost(r(3), [3, 0, 12, 0].into())
            .build()
            .unwrap()
    }

    /// Plain depth-first maximum over the same successor relation, with no
    /// pruning of any kind.
    fn exhaustive_best(blueprint: &Blueprint<u32, 4>, node: SearchNode<u32, 4>) -> u32 {
        node.successors(blueprint)
            .into_iter()
            .map(|child| exhaustive_best(blueprint, child))
            .max()
            .unwrap_or_else(|| node.collect_value())
    }

    #[test]
    fn test_horizon_zero_scores_nothing() {
        assert_eq!(optimize(&blueprint_a(), 0), 0);
    }

    #[test]
    fn test_short_horizon_scores_nothing() {
        // No target producer can pay off within one tick.
        assert_eq!(optimize(&blueprint_a(), 1), 0);
    }

    #[test]
    fn test_blueprint_a_over_24_ticks() {
        assert_eq!(optimize(&blueprint_a(), 24), 9);
    }

    #[test]
    fn test_blueprint_b_over_24_ticks() {
        assert_eq!(optimize(&blueprint_b(), 24), 12);
    }

    #[test]
    fn test_matches_exhaustive_search_on_short_horizons() {
        let blueprint = blueprint_a();
        for horizon in 0..=8 {
            let expected = exhaustive_best(&blueprint, SearchNode::root(horizon));
            assert_eq!(
                optimize(&blueprint, horizon),
                expected,
                "horizon {}",
                horizon
            );
        }
    }

    /// Walks every reachable state and asserts the bound never undercuts
    /// what is actually achievable from it. Returns the achievable best.
    fn assert_bound_admissible(blueprint: &Blueprint<u32, 4>, node: SearchNode<u32, 4>) -> u32 {
        let achievable = node
            .successors(blueprint)
            .into_iter()
            .map(|child| assert_bound_admissible(blueprint, child))
            .max()
            .unwrap_or_else(|| node.collect_value());
        assert!(
            node.optimistic_bound() >= achievable,
            "bound {} < achievable {} at {}",
            node.optimistic_bound(),
            achievable,
            node
        );
        achievable
    }

    #[test]
    fn test_bound_admissible_on_every_reachable_state() {
        let blueprint = blueprint_a();
        assert_bound_admissible(&blueprint, SearchNode::root(7));
    }

    #[test]
    fn test_dominance_memo_does_not_change_the_result() {
        let blueprint = blueprint_b();
        for horizon in 6..=12 {
            let mut with_memo = BnbSolver::new();
            let mut without_memo = BnbSolver::new();
            without_memo.set_dominance_enabled(false);

            let a = with_memo.solve(&blueprint, horizon, NoOperationMonitor::new());
            let b = without_memo.solve(&blueprint, horizon, NoOperationMonitor::new());

            assert_eq!(a.best_score(), b.best_score(), "horizon {}", horizon);
            assert_eq!(b.statistics().prunings_dominated, 0);
        }
    }

    #[test]
    fn test_longer_horizons_never_score_less() {
        let blueprint = blueprint_a();
        let mut previous = 0;
        for horizon in 0..=14 {
            let score = optimize(&blueprint, horizon);
            assert!(score >= previous, "horizon {}", horizon);
            previous = score;
        }
    }

    #[test]
    fn test_repeated_solves_are_identical() {
        let blueprint = blueprint_a();
        let mut solver = BnbSolver::new();
        let first = solver.solve(&blueprint, 14, NoOperationMonitor::new());
        let second = solver.solve(&blueprint, 14, NoOperationMonitor::new());
        assert_eq!(first.best_score(), second.best_score());
    }

    #[test]
    fn test_reset_between_blueprints() {
        let mut solver = BnbSolver::new();
        let score_b = solver
            .solve(&blueprint_b(), 14, NoOperationMonitor::new())
            .best_score();

        let mut fresh = BnbSolver::new();
        let fresh_score_b = fresh
            .solve(&blueprint_b(), 14, NoOperationMonitor::new())
            .best_score();

        solver.solve(&blueprint_a(), 14, NoOperationMonitor::new());
        let score_b_again = solver
            .solve(&blueprint_b(), 14, NoOperationMonitor::new())
            .best_score();

        assert_eq!(score_b, fresh_score_b);
        assert_eq!(score_b, score_b_again);
    }

    #[test]
    fn test_exhausted_outcome_is_exact() {
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&blueprint_a(), 12, NoOperationMonitor::new());
        assert!(outcome.is_exact());
        assert_eq!(
            *outcome.termination_reason(),
            BnbTerminationReason::FrontierExhausted
        );
    }

    #[test]
    fn test_zero_time_budget_aborts() {
        let mut solver = BnbSolver::new();
        let monitor = TimeLimitMonitor::with_clock_check_mask(Duration::ZERO, 0);
        let outcome = solver.solve(&blueprint_a(), 24, monitor);
        assert!(!outcome.is_exact());
        assert!(matches!(
            outcome.termination_reason(),
            BnbTerminationReason::Aborted(_)
        ));
    }

    #[test]
    fn test_statistics_are_populated() {
        let mut solver = BnbSolver::new();
        // Horizon 24 yields a positive optimum, so the incumbent must
        // improve at least once along the way.
        let outcome = solver.solve(&blueprint_a(), 24, NoOperationMonitor::new());
        let stats = outcome.statistics();

        assert!(stats.nodes_explored > 0);
        assert!(stats.nodes_enqueued >= stats.nodes_explored);
        assert!(stats.best_updates > 0);
    }

    #[test]
    fn test_short_horizon_yields_zero_without_best_updates() {
        let mut solver = BnbSolver::new();
        // Twelve ticks are not enough to build a target producer, so the
        // starting incumbent of zero is never beaten.
        let outcome = solver.solve(&blueprint_a(), 12, NoOperationMonitor::new());
        assert_eq!(outcome.best_score(), 0);
        assert_eq!(outcome.statistics().best_updates, 0);
    }

    #[test]
    fn test_u64_quantities_supported() {
        let blueprint = Blueprint::<u64, 4>::builder(1)
            .producer_cost(r(0), [4, 0, 0, 0].into())
            .producer_cost(r(1), [2, 0, 0, 0].into())
            .producer_cost(r(2), [3, 14, 0, 0].into())
            .producer_cost(r(3), [2, 0, 7, 0].into())
            .build()
            .unwrap();
        assert_eq!(optimize(&blueprint, 24), 9u64);
    }
}
