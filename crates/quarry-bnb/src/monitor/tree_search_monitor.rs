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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing
//! and controlling branch-and-bound runs. Callbacks track the engine
//! lifecycle, and a monitor can influence execution via `SearchCommand`
//! (default: Continue).
//!
//! Lifecycle highlights
//! - enter -> step -> {best update | prune | expand} -> exit
//! - `BnbSolverStatistics` is provided to every callback for telemetry.
//!
//! Design notes
//! - Methods take `&mut self`; monitors are assumed single-threaded.
//! - Keep callbacks lightweight; avoid blocking I/O in hot paths.
//!
//! Integrates with the `composite`, `log`, `time_limit`, `interrupt`, and
//! `no_op` monitors to mix and match logging, early stopping, and
//! cancellation without touching engine logic.

use crate::{node::SearchNode, num::SearchNumeric, stats::BnbSolverStatistics};
use quarry_model::blueprint::Blueprint;

/// The next action the engine should take, as decided by a monitor.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    /// Keep searching.
    #[default]
    Continue,
    /// Stop the search, reporting the given reason.
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for pruning a search node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The optimistic bound cannot beat the incumbent best score.
    BoundDominated,
    /// A twin state with at least as much target stock was already expanded.
    StateDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::StateDominated => write!(f, "StateDominated"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the engine.
pub trait TreeSearchMonitor<T, const R: usize>
where
    T: SearchNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, blueprint: &Blueprint<T, R>, statistics: &BnbSolverStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);
    /// Called to determine the next action of the search.
    fn search_command(
        &mut self,
        _node: &SearchNode<T, R>,
        _statistics: &BnbSolverStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called for every node popped from the frontier.
    fn on_step(&mut self, node: &SearchNode<T, R>, statistics: &BnbSolverStatistics);
    /// Called when the incumbent best score improves.
    fn on_best_updated(&mut self, best_score: T, statistics: &BnbSolverStatistics);
    /// Called when a node is pruned.
    fn on_prune(
        &mut self,
        node: &SearchNode<T, R>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics,
    );
    /// Called when a node's children are enqueued for exploration.
    fn on_expand(
        &mut self,
        node: &SearchNode<T, R>,
        children_enqueued: usize,
        statistics: &BnbSolverStatistics,
    );
}

impl<T, const R: usize> std::fmt::Debug for dyn TreeSearchMonitor<T, R> + '_
where
    T: SearchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T, const R: usize> std::fmt::Display for dyn TreeSearchMonitor<T, R> + '_
where
    T: SearchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_command_default_is_continue() {
        assert_eq!(SearchCommand::default(), SearchCommand::Continue);
    }

    #[test]
    fn test_search_command_display() {
        assert_eq!(format!("{}", SearchCommand::Continue), "Continue");
        assert_eq!(
            format!("{}", SearchCommand::Terminate("stop".to_string())),
            "Terminate: stop"
        );
    }

    #[test]
    fn test_prune_reason_display() {
        assert_eq!(format!("{}", PruneReason::BoundDominated), "BoundDominated");
        assert_eq!(format!("{}", PruneReason::StateDominated), "StateDominated");
    }
}
