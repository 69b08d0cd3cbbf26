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

use quarry_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use std::time::Duration;

/// Statistics collected during one run of the branch-and-bound engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BnbSolverStatistics {
    /// Total nodes popped from the frontier.
    pub nodes_explored: u64,
    /// Total children pushed onto the frontier.
    pub nodes_enqueued: u64,
    /// Pruned because the optimistic bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Pruned because a dominating twin was already expanded.
    pub prunings_dominated: u64,
    /// Times the incumbent best score improved.
    pub best_updates: u64,
    /// Largest number of nodes pending at once.
    pub peak_frontier_len: u64,
    /// Total time spent in the search.
    pub time_total: Duration,
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add_val(1);
    }

    #[inline]
    pub fn on_nodes_enqueued(&mut self, count: u64) {
        self.nodes_enqueued = self.nodes_enqueued.saturating_add_val(count);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add_val(1);
    }

    #[inline]
    pub fn on_pruning_dominated(&mut self) {
        self.prunings_dominated = self.prunings_dominated.saturating_add_val(1);
    }

    #[inline]
    pub fn on_best_update(&mut self) {
        self.best_updates = self.best_updates.saturating_add_val(1);
    }

    #[inline]
    pub fn on_frontier_len(&mut self, len: u64) {
        self.peak_frontier_len = self.peak_frontier_len.max(len);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Quarry-BnB Engine Statistics:")?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Nodes enqueued:       {}", self.nodes_enqueued)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (dominated): {}", self.prunings_dominated)?;
        writeln!(f, "  Best updates:         {}", self.best_updates)?;
        writeln!(f, "  Peak frontier size:   {}", self.peak_frontier_len)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_zero() {
        let stats = BnbSolverStatistics::default();
        assert_eq!(stats.nodes_explored, 0);
        assert_eq!(stats.nodes_enqueued, 0);
        assert_eq!(stats.time_total, Duration::ZERO);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = BnbSolverStatistics::default();
        stats.on_node_explored();
        stats.on_node_explored();
        stats.on_nodes_enqueued(5);
        stats.on_pruning_bound();
        stats.on_pruning_dominated();
        stats.on_best_update();

        assert_eq!(stats.nodes_explored, 2);
        assert_eq!(stats.nodes_enqueued, 5);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.prunings_dominated, 1);
        assert_eq!(stats.best_updates, 1);
    }

    #[test]
    fn test_peak_frontier_len_is_a_maximum() {
        let mut stats = BnbSolverStatistics::default();
        stats.on_frontier_len(3);
        stats.on_frontier_len(10);
        stats.on_frontier_len(7);
        assert_eq!(stats.peak_frontier_len, 10);
    }

    #[test]
    fn test_explored_counter_saturates() {
        let mut stats = BnbSolverStatistics::default();
        stats.nodes_explored = u64::MAX;
        stats.on_node_explored();
        assert_eq!(stats.nodes_explored, u64::MAX);
    }
}
