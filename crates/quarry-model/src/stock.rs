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

//! # Stock Vectors
//!
//! Fixed-size per-resource quantity vectors. `StockVector<T, R>` stores one
//! unsigned quantity per resource kind and is the unit of bookkeeping for
//! stocks, producer counts, and build costs alike.
//!
//! ## Highlights
//!
//! - `Copy` value type backed by a plain `[T; R]`, cheap to pass around and
//!   to hash (search nodes and memoization keys embed it directly).
//! - Element-wise saturating addition (income accrual) and checked
//!   subtraction (affordability: `None` means "cannot pay").
//! - Target-slot accessors: resource `R - 1` is the planning target.

use crate::index::ResourceIndex;
use num_traits::{PrimInt, Unsigned};
use quarry_core::num::{
    constants::{PlusOne, Zero},
    ops::{
        checked_arithmetic::CheckedSubVal,
        saturating_arithmetic::SaturatingAddVal,
    },
};

/// A fixed-size vector of per-resource quantities.
///
/// The quantity for resource `i` lives in slot `i`; slot `R - 1` holds the
/// target resource. Producer counts use the same layout, since producer `i`
/// outputs resource `i`.
///
/// # Examples
///
/// ```rust
/// # use quarry_model::stock::StockVector;
/// # use quarry_model::index::ResourceIndex;
/// let stock = StockVector::<u32, 4>::from_array([4, 0, 0, 0]);
/// assert_eq!(stock.get(ResourceIndex::new(0)), 4);
/// assert_eq!(stock.target(), 0);
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StockVector<T, const R: usize> {
    slots: [T; R],
}

impl<T, const R: usize> StockVector<T, R>
where
    T: PrimInt + Unsigned + Zero + PlusOne + SaturatingAddVal + CheckedSubVal,
{
    /// Creates a stock vector with every slot set to zero.
    #[inline]
    pub fn zero() -> Self {
        Self {
            slots: [T::ZERO; R],
        }
    }

    /// Creates a stock vector from a raw per-resource array.
    #[inline]
    pub const fn from_array(slots: [T; R]) -> Self {
        Self { slots }
    }

    /// Returns the number of resource kinds.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        R
    }

    /// Returns `true` if the vector has no slots.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        R == 0
    }

    /// Returns the quantity stored for `resource`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `resource` is out of bounds.
    #[inline(always)]
    pub fn get(&self, resource: ResourceIndex) -> T {
        let index = resource.get();
        debug_assert!(
            index < R,
            "called `StockVector::get` with resource index out of bounds: the len is {} but the index is {}",
            R,
            index
        );

        self.slots[index]
    }

    /// Returns the quantity stored for `resource` without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `resource` is within bounds `0..R`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, resource: ResourceIndex) -> T {
        let index = resource.get();
        debug_assert!(
            index < R,
            "called `StockVector::get_unchecked` with resource index out of bounds: the len is {} but the index is {}",
            R,
            index
        );

        unsafe { *self.slots.get_unchecked(index) }
    }

    /// Sets the quantity stored for `resource`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `resource` is out of bounds.
    #[inline(always)]
    pub fn set(&mut self, resource: ResourceIndex, value: T) {
        let index = resource.get();
        debug_assert!(
            index < R,
            "called `StockVector::set` with resource index out of bounds: the len is {} but the index is {}",
            R,
            index
        );

        self.slots[index] = value;
    }

    /// Returns the quantity of the target resource (slot `R - 1`).
    #[inline(always)]
    pub fn target(&self) -> T {
        debug_assert!(R > 0, "called `StockVector::target` on a zero-length vector");
        self.slots[R - 1]
    }

    /// Sets the quantity of the target resource (slot `R - 1`).
    #[inline(always)]
    pub fn set_target(&mut self, value: T) {
        debug_assert!(
            R > 0,
            "called `StockVector::set_target` on a zero-length vector"
        );
        self.slots[R - 1] = value;
    }

    /// Returns the underlying per-resource array.
    #[inline(always)]
    pub const fn as_array(&self) -> &[T; R] {
        &self.slots
    }

    /// Element-wise saturating addition: one tick of producer income.
    #[inline]
    pub fn saturating_add(&self, other: &Self) -> Self {
        let mut slots = self.slots;
        for (slot, add) in slots.iter_mut().zip(other.slots.iter()) {
            *slot = slot.saturating_add_val(*add);
        }
        Self { slots }
    }

    /// Element-wise checked subtraction.
    ///
    /// Returns `None` if any slot would underflow, which makes this the
    /// affordability test: `stock.checked_sub(cost)` succeeds exactly when
    /// every resource is in sufficient supply.
    #[inline]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let mut slots = self.slots;
        for (slot, sub) in slots.iter_mut().zip(other.slots.iter()) {
            *slot = slot.checked_sub_val(*sub)?;
        }
        Some(Self { slots })
    }

    /// Element-wise maximum of two vectors.
    #[inline]
    pub fn component_max(&self, other: &Self) -> Self {
        let mut slots = self.slots;
        for (slot, v) in slots.iter_mut().zip(other.slots.iter()) {
            if *v > *slot {
                *slot = *v;
            }
        }
        Self { slots }
    }

    /// Returns a copy with the target slot set to zero.
    #[inline]
    pub fn with_target_cleared(&self) -> Self {
        let mut cleared = *self;
        cleared.set_target(T::ZERO);
        cleared
    }

    /// Returns a copy with the slot for `resource` incremented by one.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `resource` is out of bounds.
    #[inline]
    pub fn with_incremented(&self, resource: ResourceIndex) -> Self {
        let mut bumped = *self;
        let current = bumped.get(resource);
        bumped.set(resource, current.saturating_add_val(T::PLUS_ONE));
        bumped
    }
}

impl<T, const R: usize> Default for StockVector<T, R>
where
    T: PrimInt + Unsigned + Zero + PlusOne + SaturatingAddVal + CheckedSubVal,
{
    fn default() -> Self {
        Self::zero()
    }
}

impl<T, const R: usize> From<[T; R]> for StockVector<T, R> {
    #[inline]
    fn from(slots: [T; R]) -> Self {
        Self { slots }
    }
}

impl<T, const R: usize> std::fmt::Display for StockVector<T, R>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", slot)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(i: usize) -> ResourceIndex {
        ResourceIndex::new(i)
    }

    #[test]
    fn test_zero_is_all_zero() {
        let stock = StockVector::<u32, 4>::zero();
        for i in 0..4 {
            assert_eq!(stock.get(r(i)), 0);
        }
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut stock = StockVector::<u32, 4>::zero();
        stock.set(r(2), 14);
        assert_eq!(stock.get(r(2)), 14);
        assert_eq!(stock.get(r(1)), 0);
    }

    #[test]
    fn test_target_is_last_slot() {
        let stock = StockVector::<u32, 4>::from_array([1, 2, 3, 9]);
        assert_eq!(stock.target(), 9);
    }

    #[test]
    fn test_saturating_add_accrues_income() {
        let stock = StockVector::<u32, 3>::from_array([1, 0, 5]);
        let producers = StockVector::<u32, 3>::from_array([2, 1, 0]);
        let next = stock.saturating_add(&producers);
        assert_eq!(*next.as_array(), [3, 1, 5]);
    }

    #[test]
    fn test_saturating_add_clamps() {
        let stock = StockVector::<u8, 2>::from_array([250, 0]);
        let income = StockVector::<u8, 2>::from_array([10, 0]);
        assert_eq!(*stock.saturating_add(&income).as_array(), [255, 0]);
    }

    #[test]
    fn test_checked_sub_affordable() {
        let stock = StockVector::<u32, 3>::from_array([4, 14, 1]);
        let cost = StockVector::<u32, 3>::from_array([3, 14, 0]);
        assert_eq!(
            stock.checked_sub(&cost).map(|s| *s.as_array()),
            Some([1, 0, 1])
        );
    }

    #[test]
    fn test_checked_sub_unaffordable() {
        let stock = StockVector::<u32, 3>::from_array([4, 13, 1]);
        let cost = StockVector::<u32, 3>::from_array([3, 14, 0]);
        assert_eq!(stock.checked_sub(&cost), None);
    }

    #[test]
    fn test_component_max() {
        let a = StockVector::<u32, 3>::from_array([4, 1, 0]);
        let b = StockVector::<u32, 3>::from_array([2, 7, 0]);
        assert_eq!(*a.component_max(&b).as_array(), [4, 7, 0]);
    }

    #[test]
    fn test_with_target_cleared() {
        let stock = StockVector::<u32, 3>::from_array([4, 1, 9]);
        assert_eq!(*stock.with_target_cleared().as_array(), [4, 1, 0]);
    }

    #[test]
    fn test_with_incremented() {
        let producers = StockVector::<u32, 3>::from_array([1, 0, 0]);
        assert_eq!(*producers.with_incremented(r(1)).as_array(), [1, 1, 0]);
    }

    #[test]
    fn test_display() {
        let stock = StockVector::<u32, 3>::from_array([1, 2, 3]);
        assert_eq!(format!("{}", stock), "[1, 2, 3]");
    }
}
