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

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    node::SearchNode,
    num::SearchNumeric,
    stats::BnbSolverStatistics,
};
use quarry_model::blueprint::Blueprint;
use std::time::{Duration, Instant};

/// A monitor that prints a progress table to stdout at a fixed interval.
///
/// Clock checks are gated by a step bitmask so the hot loop almost never
/// touches the clock.
#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_score: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: SearchNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_score: None,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<14} | {:<9} | {:<10} | {:<14} | {:<16}",
            "Elapsed", "Nodes", "Time Left", "Best", "Pruned (Bound)", "Pruned (Dominated)"
        );
        println!("{}", "-".repeat(88));
    }

    #[inline(always)]
    fn log_line<const R: usize>(&mut self, node: &SearchNode<T, R>, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_str = match &self.best_score {
            Some(best) => format!("{}", best),
            None => "-".to_string(),
        };
        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<14} | {:<9} | {:<10} | {:<14} | {:<16}",
            elapsed_field,
            stats.nodes_explored,
            node.time_remaining(),
            best_str,
            stats.prunings_bound,
            stats.prunings_dominated
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: SearchNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T, const R: usize> TreeSearchMonitor<T, R> for LogMonitor<T>
where
    T: SearchNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, _blueprint: &Blueprint<T, R>, _statistics: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_score = None;
        self.print_header();
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        println!("{}", "-".repeat(88));
        println!("Search finished.");
        print!("{}", statistics);
    }

    fn on_step(&mut self, node: &SearchNode<T, R>, statistics: &BnbSolverStatistics) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(node, statistics);
        }
    }

    fn on_best_updated(&mut self, best_score: T, _statistics: &BnbSolverStatistics) {
        self.best_score = Some(best_score);
    }

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

    #[test]
    fn test_best_updates_are_remembered() {
        let mut monitor = LogMonitor::<u32>::default();
        let stats = BnbSolverStatistics::default();
        TreeSearchMonitor::<u32, 4>::on_best_updated(&mut monitor, 7, &stats);
        assert_eq!(monitor.best_score, Some(7));
    }

    #[test]
    fn test_display() {
        let monitor = LogMonitor::<u32>::new(Duration::from_secs(2), 1023);
        assert_eq!(
            format!("{}", monitor),
            "LogMonitor(log_interval: 2s, clock_check_mask: 1023)"
        );
    }
}
