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

//! # Quarry Branch-and-Bound Engine
//!
//! A best-first branch-and-bound search that maximizes the stock of the
//! target resource reachable within a fixed time horizon, given a
//! production blueprint.
//!
//! ## Modules
//!
//! - `num`: The `SearchNumeric` trait alias bundling the numeric bounds the
//!   engine needs (`u32` and `u64` qualify).
//! - `node`: The immutable `SearchNode` state (time remaining, stock,
//!   producer counts) with successor generation and bound computations.
//! - `frontier`: A max-heap frontier that pops target-producer-rich nodes
//!   first.
//! - `dominance`: A hash-based memo that prunes states no better than an
//!   already expanded twin.
//! - `bnb`: The `BnbSolver` itself, a reusable engine with a per-run search
//!   session.
//! - `monitor`: The `TreeSearchMonitor` trait plus ready-made monitors for
//!   logging, time limits, external interrupts, and composition.
//! - `stats`: Saturating search counters reported with every outcome.
//! - `result`: `BnbSolverOutcome` with best score, termination reason, and
//!   statistics.

pub mod bnb;
pub mod dominance;
pub mod frontier;
pub mod monitor;
pub mod node;
pub mod num;
pub mod result;
pub mod stats;
