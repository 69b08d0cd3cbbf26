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

//! Outcome types for one engine run.

use crate::stats::BnbSolverStatistics;

/// Why a search run ended.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BnbTerminationReason {
    /// Every node was expanded or pruned; the best score is proven optimal.
    FrontierExhausted,
    /// A monitor requested termination (time limit, interrupt, ...). The
    /// best score is a valid lower bound but may not be optimal.
    Aborted(String),
}

impl std::fmt::Display for BnbTerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BnbTerminationReason::FrontierExhausted => write!(f, "frontier exhausted"),
            BnbTerminationReason::Aborted(reason) => write!(f, "aborted: {}", reason),
        }
    }
}

/// The result of one engine run: the best score found, why the run ended,
/// and the counters collected along the way.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BnbSolverOutcome<T> {
    best_score: T,
    termination_reason: BnbTerminationReason,
    statistics: BnbSolverStatistics,
}

impl<T> BnbSolverOutcome<T> {
    /// Creates an outcome for an exhausted (proven optimal) run.
    #[inline]
    pub fn exhausted(best_score: T, statistics: BnbSolverStatistics) -> Self {
        Self {
            best_score,
            termination_reason: BnbTerminationReason::FrontierExhausted,
            statistics,
        }
    }

    /// Creates an outcome for an aborted run.
    #[inline]
    pub fn aborted(best_score: T, reason: String, statistics: BnbSolverStatistics) -> Self {
        Self {
            best_score,
            termination_reason: BnbTerminationReason::Aborted(reason),
            statistics,
        }
    }

    /// Returns the best target-resource score found.
    #[inline(always)]
    pub fn best_score(&self) -> T
    where
        T: Copy,
    {
        self.best_score
    }

    /// Returns `true` if the best score is proven optimal.
    #[inline(always)]
    pub fn is_exact(&self) -> bool {
        matches!(
            self.termination_reason,
            BnbTerminationReason::FrontierExhausted
        )
    }

    /// Returns why the run ended.
    #[inline(always)]
    pub fn termination_reason(&self) -> &BnbTerminationReason {
        &self.termination_reason
    }

    /// Returns the counters collected during the run.
    #[inline(always)]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }
}

impl<T> std::fmt::Display for BnbSolverOutcome<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "best score {} ({})",
            self.best_score, self.termination_reason
        )
    }
}
