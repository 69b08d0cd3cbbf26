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

//! # Multi-Blueprint Orchestrator
//!
//! A high-level orchestrator that solves every blueprint of a problem set
//! over the same horizon, one engine per thread, and aggregates the scores
//! into the standard report metrics.
//!
//! ## Motivation
//!
//! Blueprints are independent of each other, so the natural unit of
//! parallelism is one branch-and-bound run per blueprint. The orchestrator
//! owns the shared stop signal and the global time limit; each worker
//! thread wires those into its engine through a `CompositeMonitor`.
//!
//! ## Highlights
//!
//! - Parallel execution:
//!   - Spawn one engine per blueprint using `std::thread::scope`.
//!   - Build a `CompositeMonitor<T>` per thread with an interrupt monitor
//!     and an optional time-limit monitor.
//! - Shared state:
//!   - `AtomicBool` stop signal, exposed via `stop_signal()` so a Ctrl+C
//!     handler can cancel all runs at once.
//! - Report construction:
//!   - Joins threads in blueprint order and returns a `SolverReport<T>`
//!     with the per-blueprint outcomes, the quality-weighted sum, and the
//!     score product.
//! - Builder pattern:
//!   - `SolverBuilder` to configure horizon, time limit, and the dominance
//!     memo, and to add blueprints.
//!
//! ## Usage
//!
//! ```rust
//! use quarry_model::loading::BlueprintLoader;
//! use quarry_solver::solver::SolverBuilder;
//!
//! let loader = BlueprintLoader::<u32, 4>::new(["ore", "clay", "obsidian", "geode"]);
//! let blueprints = loader
//!     .from_str("Blueprint 1: Each ore robot costs 4 ore. Each clay robot costs 2 ore. Each obsidian robot costs 3 ore and 14 clay. Each geode robot costs 2 ore and 7 obsidian.")
//!     .unwrap();
//!
//! let solver = SolverBuilder::new(12).add_blueprints(blueprints).build();
//! let report = solver.solve();
//! assert!(report.is_exact());
//! ```

use quarry_bnb::{
    bnb::BnbSolver,
    monitor::{
        composite::CompositeMonitor,
        interrupt::InterruptMonitor,
        time_limit::{TimeLimitMonitor, DEFAULT_STEP_CLOCK_CHECK_MASK},
    },
    num::SearchNumeric,
    result::BnbSolverOutcome,
};
use quarry_model::blueprint::Blueprint;
use std::sync::atomic::{AtomicBool, Ordering};

/// The outcome of one blueprint's branch-and-bound run.
#[derive(Debug, Clone)]
pub struct BlueprintRun<T> {
    blueprint_id: usize,
    outcome: BnbSolverOutcome<T>,
}

impl<T> BlueprintRun<T> {
    /// Returns the id of the blueprint this run solved.
    #[inline(always)]
    pub fn blueprint_id(&self) -> usize {
        self.blueprint_id
    }

    /// Returns the engine outcome of this run.
    #[inline(always)]
    pub fn outcome(&self) -> &BnbSolverOutcome<T> {
        &self.outcome
    }

    /// Returns the best score of this run.
    #[inline]
    pub fn best_score(&self) -> T
    where
        T: Copy,
    {
        self.outcome.best_score()
    }
}

impl<T> std::fmt::Display for BlueprintRun<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blueprint {}: {}", self.blueprint_id, self.outcome)
    }
}

/// The aggregated result of a full solve, one run per blueprint, in the
/// order the blueprints were added.
#[derive(Debug, Clone)]
pub struct SolverReport<T> {
    runs: Vec<BlueprintRun<T>>,
    total_time: std::time::Duration,
}

impl<T> SolverReport<T>
where
    T: SearchNumeric,
{
    /// Returns the per-blueprint runs.
    #[inline(always)]
    pub fn runs(&self) -> &[BlueprintRun<T>] {
        &self.runs
    }

    /// Returns the wall-clock time of the whole solve.
    #[inline(always)]
    pub fn total_time(&self) -> std::time::Duration {
        self.total_time
    }

    /// Returns `true` if every run exhausted its frontier, i.e. every
    /// score in this report is proven optimal.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.runs.iter().all(|run| run.outcome.is_exact())
    }

    /// Returns the sum of `blueprint id * best score` over all runs.
    pub fn weighted_sum(&self) -> u64 {
        self.runs
            .iter()
            .map(|run| (run.blueprint_id as u64).saturating_mul(run.best_score().into()))
            .fold(0_u64, u64::saturating_add)
    }

    /// Returns the product of the best scores of the first `count` runs
    /// (or of all runs, if fewer were solved).
    pub fn score_product(&self, count: usize) -> u64 {
        self.runs
            .iter()
            .take(count)
            .map(|run| run.best_score().into())
            .fold(1_u64, u64::saturating_mul)
    }
}

impl<T> std::fmt::Display for SolverReport<T>
where
    T: SearchNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solved {} blueprints in {:?}", self.runs.len(), self.total_time)?;
        for run in &self.runs {
            writeln!(f, "  {}", run)?;
        }
        Ok(())
    }
}

/// Solves a set of blueprints over a common horizon, one engine per
/// thread.
///
/// Built through [`SolverBuilder`]. `solve` takes `&self` and can be
/// called repeatedly; the stop signal is reset at the start of every call.
#[derive(Debug)]
pub struct Solver<T, const R: usize> {
    blueprints: Vec<Blueprint<T, R>>,
    horizon: u32,
    time_limit: Option<std::time::Duration>,
    clock_check_mask: u64,
    dominance_enabled: bool,
    /// Shared flag to cancel all running engines (e.g. from a Ctrl+C handler).
    stop_signal: AtomicBool,
}

impl<T, const R: usize> Solver<T, R>
where
    T: SearchNumeric,
{
    /// Returns the horizon in ticks.
    #[inline(always)]
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Returns the blueprints this solver was built with.
    #[inline(always)]
    pub fn blueprints(&self) -> &[Blueprint<T, R>] {
        &self.blueprints
    }

    /// Returns the global time limit, if any.
    #[inline(always)]
    pub fn time_limit(&self) -> Option<std::time::Duration> {
        self.time_limit
    }

    /// Returns the step mask between wall-clock checks of the time-limit
    /// monitor.
    #[inline(always)]
    pub fn clock_check_mask(&self) -> u64 {
        self.clock_check_mask
    }

    /// Returns the shared stop signal. Storing `true` cancels every
    /// running engine at its next step.
    #[inline(always)]
    pub fn stop_signal(&self) -> &AtomicBool {
        &self.stop_signal
    }

    /// Solves every blueprint over the configured horizon and returns the
    /// aggregated report.
    pub fn solve(&self) -> SolverReport<T> {
        assert!(
            !self.blueprints.is_empty(),
            "called `Solver::solve` with no blueprints added"
        );

        let start_time = std::time::Instant::now();
        self.stop_signal.store(false, Ordering::Relaxed);

        let time_limit = self.time_limit;
        let clock_check_mask = self.clock_check_mask;
        let horizon = self.horizon;
        let dominance_enabled = self.dominance_enabled;
        let stop_signal = &self.stop_signal;

        let mut runs = Vec::with_capacity(self.blueprints.len());

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.blueprints.len());

            for blueprint in &self.blueprints {
                let handle = scope.spawn(move || {
                    let mut monitor = CompositeMonitor::<T, R>::new();
                    monitor.add_monitor(InterruptMonitor::new(stop_signal));
                    if let Some(limit) = time_limit {
                        monitor.add_monitor(TimeLimitMonitor::with_clock_check_mask(
                            limit,
                            clock_check_mask,
                        ));
                    }

                    let mut engine = BnbSolver::new();
                    engine.set_dominance_enabled(dominance_enabled);
                    let outcome = engine.solve(blueprint, horizon, monitor);

                    BlueprintRun {
                        blueprint_id: blueprint.id(),
                        outcome,
                    }
                });
                handles.push(handle);
            }

            for handle in handles {
                runs.push(handle.join().expect("blueprint solver thread panicked"));
            }
        });

        SolverReport {
            runs,
            total_time: start_time.elapsed(),
        }
    }
}

/// Builder for [`Solver`].
#[derive(Debug, Clone)]
pub struct SolverBuilder<T, const R: usize> {
    blueprints: Vec<Blueprint<T, R>>,
    horizon: u32,
    time_limit: Option<std::time::Duration>,
    clock_check_mask: u64,
    dominance_enabled: bool,
}

impl<T, const R: usize> SolverBuilder<T, R>
where
    T: SearchNumeric,
{
    /// Creates a builder for a solve over `horizon` ticks.
    #[inline]
    pub fn new(horizon: u32) -> Self {
        Self {
            blueprints: Vec::new(),
            horizon,
            time_limit: None,
            clock_check_mask: DEFAULT_STEP_CLOCK_CHECK_MASK,
            dominance_enabled: true,
        }
    }

    /// Adds a single blueprint.
    #[inline]
    pub fn add_blueprint(mut self, blueprint: Blueprint<T, R>) -> Self {
        self.blueprints.push(blueprint);
        self
    }

    /// Adds all blueprints of an iterator, keeping their order.
    #[inline]
    pub fn add_blueprints<I>(mut self, blueprints: I) -> Self
    where
        I: IntoIterator<Item = Blueprint<T, R>>,
    {
        self.blueprints.extend(blueprints);
        self
    }

    /// Caps the wall-clock time of every engine run.
    #[inline]
    pub fn with_time_limit(mut self, limit: std::time::Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the step mask between wall-clock checks of the time-limit
    /// monitor. A mask of `0` checks the clock on every step.
    #[inline]
    pub fn with_clock_check_mask(mut self, mask: u64) -> Self {
        self.clock_check_mask = mask;
        self
    }

    /// Enables or disables the dominance memo of every engine.
    #[inline]
    pub fn with_dominance_enabled(mut self, enabled: bool) -> Self {
        self.dominance_enabled = enabled;
        self
    }

    /// Builds the solver.
    #[inline]
    pub fn build(self) -> Solver<T, R> {
        Solver {
            blueprints: self.blueprints,
            horizon: self.horizon,
            time_limit: self.time_limit,
            clock_check_mask: self.clock_check_mask,
            dominance_enabled: self.dominance_enabled,
            stop_signal: AtomicBool::new(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_bnb::result::BnbTerminationReason;
    use quarry_model::loading::BlueprintLoader;

    fn reference_blueprints() -> Vec<Blueprint<u32, 4>> {
        let loader =
            BlueprintLoader::<u32, 4>::new(["ore", "clay", "obsidian", "geode"]);
        loader
            .from_str(
                "Blueprint 1: Each ore robot costs 4 ore. Each clay robot costs 2 ore. \
                 Each obsidian robot costs 3 ore and 14 clay. Each geode robot costs 2 ore and 7 obsidian.\n\
                 Blueprint 2: Each ore robot costs 2 ore. Each clay robot costs 3 ore. \
                 Each obsidian robot costs 3 ore and 8 clay. Each geode robot costs 3 ore and 12 obsidian.",
            )
            .unwrap()
    }

    #[test]
    fn test_reference_set_over_24_ticks() {
        let solver = SolverBuilder::new(24)
            .add_blueprints(reference_blueprints())
            .build();
        let report = solver.solve();

        assert!(report.is_exact());
        assert_eq!(report.runs().len(), 2);
        assert_eq!(report.runs()[0].blueprint_id(), 1);
        assert_eq!(report.runs()[0].best_score(), 9);
        assert_eq!(report.runs()[1].blueprint_id(), 2);
        assert_eq!(report.runs()[1].best_score(), 12);
        assert_eq!(report.weighted_sum(), 33);
    }

    #[test]
    fn test_reference_set_over_32_ticks() {
        let solver = SolverBuilder::new(32)
            .add_blueprints(reference_blueprints())
            .build();
        let report = solver.solve();

        assert!(report.is_exact());
        assert_eq!(report.runs()[0].best_score(), 56);
        assert_eq!(report.runs()[1].best_score(), 62);
        assert_eq!(report.score_product(3), 3472);
    }

    #[test]
    fn test_score_product_over_subset() {
        let solver = SolverBuilder::new(12)
            .add_blueprints(reference_blueprints())
            .build();
        let report = solver.solve();

        let first: u64 = report.runs()[0].best_score().into();
        assert_eq!(report.score_product(1), first);
        assert_eq!(report.score_product(0), 1);
    }

    #[test]
    fn test_pre_tripped_stop_signal_is_reset() {
        let solver = SolverBuilder::new(10)
            .add_blueprints(reference_blueprints())
            .build();
        solver.stop_signal().store(true, Ordering::Relaxed);

        // `solve` clears the signal before spawning workers.
        let report = solver.solve();
        assert!(report.is_exact());
    }

    #[test]
    fn test_zero_time_limit_aborts_all_runs() {
        // Mask 0 checks the clock on every step, so the zero budget trips
        // on the very first pop of every worker.
        let solver = SolverBuilder::new(24)
            .add_blueprints(reference_blueprints())
            .with_time_limit(std::time::Duration::ZERO)
            .with_clock_check_mask(0)
            .build();
        let report = solver.solve();

        assert!(!report.is_exact());
        for run in report.runs() {
            assert!(matches!(
                run.outcome().termination_reason(),
                BnbTerminationReason::Aborted(_)
            ));
        }
    }

    #[test]
    fn test_solver_is_reusable() {
        let solver = SolverBuilder::new(14)
            .add_blueprints(reference_blueprints())
            .build();
        let first = solver.solve();
        let second = solver.solve();

        for (a, b) in first.runs().iter().zip(second.runs()) {
            assert_eq!(a.best_score(), b.best_score());
        }
    }

    #[test]
    #[should_panic(expected = "no blueprints added")]
    fn test_solve_without_blueprints_panics() {
        let solver = SolverBuilder::<u32, 4>::new(24).build();
        solver.solve();
    }
}
