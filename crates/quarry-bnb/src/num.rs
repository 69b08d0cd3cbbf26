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

//! Numeric bounds for the search engine.
//!
//! `SearchNumeric` is a trait alias that bundles everything the engine
//! needs from its quantity type: unsigned integer semantics, conversions
//! from tick counts (`From<u32>`) and into aggregate scores (`Into<u64>`),
//! the by-value arithmetic traits, hashing for memoization keys, and
//! thread-safety for portfolio runs. `u32` and `u64` both qualify; `u32`
//! is plenty for realistic horizons.

use num_traits::{PrimInt, Unsigned};
use quarry_core::num::{
    constants::{PlusOne, Zero},
    ops::{
        checked_arithmetic::{CheckedAddVal, CheckedMulVal, CheckedSubVal},
        saturating_arithmetic::{SaturatingAddVal, SaturatingMulVal, SaturatingSubVal},
    },
};
use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// The numeric contract for quantities handled by the search engine.
pub trait SearchNumeric:
    PrimInt
    + Unsigned
    + Zero
    + PlusOne
    + SaturatingAddVal
    + SaturatingSubVal
    + SaturatingMulVal
    + CheckedAddVal
    + CheckedSubVal
    + CheckedMulVal
    + From<u32>
    + Into<u64>
    + Hash
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> SearchNumeric for T where
    T: PrimInt
        + Unsigned
        + Zero
        + PlusOne
        + SaturatingAddVal
        + SaturatingSubVal
        + SaturatingMulVal
        + CheckedAddVal
        + CheckedSubVal
        + CheckedMulVal
        + From<u32>
        + Into<u64>
        + Hash
        + Debug
        + Display
        + Send
        + Sync
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_search_numeric<T: SearchNumeric>() {}

    #[test]
    fn test_expected_types_qualify() {
        assert_search_numeric::<u32>();
        assert_search_numeric::<u64>();
    }
}
