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

//! # Search Monitors
//!
//! Observation and control hooks for the branch-and-bound engine. A monitor
//! receives lifecycle callbacks and can stop the search early through a
//! `SearchCommand`, without the engine knowing anything about logging,
//! clocks, or signals.
//!
//! ## Submodules
//!
//! - `tree_search_monitor`: The `TreeSearchMonitor` trait plus
//!   `SearchCommand` and `PruneReason`.
//! - `no_op`: The do-nothing monitor for silent runs.
//! - `log`: Periodic progress table on stdout.
//! - `composite`: Fan-out to several monitors at once.
//! - `time_limit`: Wall-clock budget with cheap bitmask-gated clock checks.
//! - `interrupt`: External cancellation via a shared `AtomicBool`.

pub mod composite;
pub mod interrupt;
pub mod log;
pub mod no_op;
pub mod time_limit;
pub mod tree_search_monitor;
