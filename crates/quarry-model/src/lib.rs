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

//! # Quarry Model
//!
//! Data model for resource production planning: resource indices, stock
//! vectors, and production blueprints, plus a text loader for blueprint
//! files.
//!
//! ## Modules
//!
//! - `index`: Strongly typed `ResourceIndex` used to address resource kinds
//!   (and, since producers are one-per-resource, producer kinds too).
//! - `stock`: Fixed-size per-resource quantity vector (`StockVector<T, R>`)
//!   with saturating and checked element-wise arithmetic.
//! - `blueprint`: Immutable `Blueprint<T, R>` (validated cost matrix plus
//!   derived producer caps) and its fail-fast `BlueprintBuilder`.
//! - `loading`: `BlueprintLoader` that parses one-blueprint-per-line text
//!   files into validated blueprints.
//!
//! The conventions used throughout: resource `R - 1` is the target resource
//! the planner maximizes, resource `0` is the base resource whose producer
//! every search starts with.

pub mod blueprint;
pub mod index;
pub mod loading;
pub mod stock;
