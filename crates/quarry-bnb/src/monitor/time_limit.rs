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

//! # Time Limit Monitor
//!
//! A lightweight monitor that enforces a wall-clock time budget on the
//! search. It periodically checks elapsed time (using a bitmask-based step
//! filter) and requests termination once the configured `Duration` has been
//! exceeded.
//!
//! ## Motivation
//!
//! An exhaustive run over a generous horizon can explore a huge tree. Many
//! callers need predictable time-bounded behavior; the outcome then carries
//! the best score found so far, flagged as inexact. This monitor provides a
//! low-overhead cap without checking the clock at every step.
//!
//! ## Highlights
//!
//! - Bitmask-driven clock checks: `(steps & clock_check_mask) == 0`
//!   triggers a check. The default mask (`0x3FFF`) checks approximately
//!   every 16,384 steps.
//! - `on_step()` uses `wrapping_add` to increment steps at minimal cost.
//! - `search_command()` returns `Terminate("time limit reached")` once
//!   elapsed time exceeds the limit at a check point; otherwise `Continue`.

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    node::SearchNode,
    num::SearchNumeric,
    stats::BnbSolverStatistics,
};
use quarry_model::blueprint::Blueprint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<T> {
    clock_check_mask: u64,
    steps: u64,
    time_limit: std::time::Duration,
    start_time: std::time::Instant,
    _phantom: std::marker::PhantomData<T>,
}

/// Default mask: Check every 16,384 steps (2^14).
/// 16384 - 1 = 16383 = 0x3FFF
pub const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

impl<T> TimeLimitMonitor<T> {
    #[inline]
    pub fn new(time_limit: std::time::Duration) -> Self {
        Self {
            clock_check_mask: DEFAULT_STEP_CLOCK_CHECK_MASK,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: std::time::Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T, const R: usize> TreeSearchMonitor<T, R> for TimeLimitMonitor<T>
where
    T: SearchNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _blueprint: &Blueprint<T, R>, _statistics: &BnbSolverStatistics) {
        self.start_time = std::time::Instant::now();
        self.steps = 0;
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    #[inline(always)]
    fn search_command(
        &mut self,
        _node: &SearchNode<T, R>,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_step(&mut self, _node: &SearchNode<T, R>, _statistics: &BnbSolverStatistics) {
        self.steps = self.steps.wrapping_add(1);
    }

    fn on_best_updated(&mut self, _best_score: T, _statistics: &BnbSolverStatistics) {}

    fn on_prune(
        &mut self,
        _node: &SearchNode<T, R>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_expand(
        &mut self,
        _node: &SearchNode<T, R>,
        _children_enqueued: usize,
        _statistics: &BnbSolverStatistics,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_zero_budget_terminates_at_first_check() {
        let mut monitor = TimeLimitMonitor::<u32>::new(Duration::ZERO);
        let node = SearchNode::<u32, 4>::root(24);
        let stats = BnbSolverStatistics::default();

        // steps == 0: mask check fires immediately.
        match monitor.search_command(&node, &stats) {
            SearchCommand::Terminate(reason) => assert_eq!(reason, "time limit reached"),
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_generous_budget_continues() {
        let mut monitor = TimeLimitMonitor::<u32>::new(Duration::from_secs(3600));
        let node = SearchNode::<u32, 4>::root(24);
        let stats = BnbSolverStatistics::default();
        assert_eq!(
            monitor.search_command(&node, &stats),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_mask_skips_clock_checks_between_boundaries() {
        let mut monitor = TimeLimitMonitor::<u32>::with_clock_check_mask(Duration::ZERO, 0x3);
        let node = SearchNode::<u32, 4>::root(24);
        let stats = BnbSolverStatistics::default();

        // Move off the check boundary; the clock is never consulted.
        monitor.on_step(&node, &stats);
        assert_eq!(
            monitor.search_command(&node, &stats),
            SearchCommand::Continue
        );

        // Three more steps land back on the boundary.
        monitor.on_step(&node, &stats);
        monitor.on_step(&node, &stats);
        monitor.on_step(&node, &stats);
        assert!(matches!(
            monitor.search_command(&node, &stats),
            SearchCommand::Terminate(_)
        ));
    }
}
