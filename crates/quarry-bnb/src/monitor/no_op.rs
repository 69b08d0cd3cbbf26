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

/// A monitor that ignores every event. The default for silent runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoOperationMonitor<T, const R: usize> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T, const R: usize> NoOperationMonitor<T, R> {
    /// Creates a new `NoOperationMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T, const R: usize> TreeSearchMonitor<T, R> for NoOperationMonitor<T, R>
where
    T: SearchNumeric,
{
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    fn on_enter_search(&mut self, _blueprint: &Blueprint<T, R>, _statistics: &BnbSolverStatistics) {
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    fn on_step(&mut self, _node: &SearchNode<T, R>, _statistics: &BnbSolverStatistics) {}

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
    use crate::monitor::tree_search_monitor::SearchCommand;

    #[test]
    fn test_default_command_is_continue() {
        let mut monitor = NoOperationMonitor::<u32, 4>::new();
        let node = SearchNode::root(24);
        let stats = BnbSolverStatistics::default();
        assert_eq!(monitor.search_command(&node, &stats), SearchCommand::Continue);
    }

    #[test]
    fn test_name() {
        let monitor = NoOperationMonitor::<u32, 4>::new();
        assert_eq!(
            TreeSearchMonitor::name(&monitor),
            "NoOperationMonitor"
        );
    }
}
