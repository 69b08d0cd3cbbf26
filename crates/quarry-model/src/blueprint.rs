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

//! # Production Blueprints
//!
//! A blueprint fixes the rules of one planning instance: `R` resource kinds,
//! one producer kind per resource, and for every producer the stock vector
//! it consumes when built. Resource `R - 1` is the target the planner
//! maximizes; resource `0` is the base resource whose producer every search
//! starts with.
//!
//! ## Highlights
//!
//! - `Blueprint<T, R>` is immutable after construction and precomputes the
//!   per-resource producer caps used to bound the search: no producer count
//!   beyond the largest single-build demand for its resource can ever help,
//!   except for the target producer, which is never capped.
//! - `BlueprintBuilder` validates fail-fast on `build()`: a malformed cost
//!   matrix is rejected before any search runs.

use crate::{index::ResourceIndex, stock::StockVector};
use num_traits::{PrimInt, Unsigned};
use quarry_core::num::{
    constants::{PlusOne, Zero},
    ops::{
        checked_arithmetic::CheckedSubVal,
        saturating_arithmetic::SaturatingAddVal,
    },
};

/// Errors produced when validating a blueprint.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BlueprintError {
    /// The blueprint declares no resource kinds at all.
    NoResources,
    /// A producer lists the target resource among its inputs. The target is
    /// a sink: it is collected, never spent.
    TargetCostRequired {
        /// The offending producer.
        producer: usize,
    },
    /// A producer's cost can never be paid: it needs a resource that no
    /// chain of builds starting from the base producer ever yields.
    UnreachableProducer {
        /// The offending producer.
        producer: usize,
    },
}

impl std::fmt::Display for BlueprintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlueprintError::NoResources => {
                write!(f, "blueprint declares no resource kinds")
            }
            BlueprintError::TargetCostRequired { producer } => {
                write!(
                    f,
                    "producer {} consumes the target resource, which is collect-only",
                    producer
                )
            }
            BlueprintError::UnreachableProducer { producer } => {
                write!(
                    f,
                    "producer {} can never be built: its cost requires a resource no reachable producer yields",
                    producer
                )
            }
        }
    }
}

impl std::error::Error for BlueprintError {}

/// An immutable production blueprint.
///
/// # Examples
///
/// ```rust
/// # use quarry_model::blueprint::Blueprint;
/// # use quarry_model::index::ResourceIndex;
/// // ore, clay, obsidian, geode (target)
/// let blueprint = Blueprint::<u32, 4>::builder(1)
///     .producer_cost(ResourceIndex::new(0), [4, 0, 0, 0].into())
///     .producer_cost(ResourceIndex::new(1), [2, 0, 0, 0].into())
///     .producer_cost(ResourceIndex::new(2), [3, 14, 0, 0].into())
///     .producer_cost(ResourceIndex::new(3), [2, 0, 7, 0].into())
///     .build()
///     .unwrap();
///
/// assert_eq!(blueprint.id(), 1);
/// assert_eq!(blueprint.cap(ResourceIndex::new(1)), 14);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Blueprint<T, const R: usize> {
    id: usize,
    costs: [StockVector<T, R>; R],
    caps: StockVector<T, R>,
}

impl<T, const R: usize> Blueprint<T, R>
where
    T: PrimInt + Unsigned + Zero + PlusOne + SaturatingAddVal + CheckedSubVal,
{
    /// Creates a new [`BlueprintBuilder`] for a blueprint with the given id.
    #[inline]
    pub fn builder(id: usize) -> BlueprintBuilder<T, R> {
        BlueprintBuilder::new(id)
    }

    /// Returns the blueprint id.
    #[inline(always)]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Returns the number of resource kinds.
    #[inline(always)]
    pub const fn num_resources(&self) -> usize {
        R
    }

    /// Returns the index of the target resource.
    #[inline(always)]
    pub const fn target(&self) -> ResourceIndex {
        ResourceIndex::new(R - 1)
    }

    /// Returns the cost vector for building one producer of `producer`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `producer` is out of bounds.
    #[inline(always)]
    pub fn cost(&self, producer: ResourceIndex) -> &StockVector<T, R> {
        let index = producer.get();
        debug_assert!(
            index < R,
            "called `Blueprint::cost` with producer index out of bounds: the len is {} but the index is {}",
            R,
            index
        );

        &self.costs[index]
    }

    /// Returns the cost vector for `producer` without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `producer` is within bounds `0..R`.
    #[inline(always)]
    pub unsafe fn cost_unchecked(&self, producer: ResourceIndex) -> &StockVector<T, R> {
        let index = producer.get();
        debug_assert!(
            index < R,
            "called `Blueprint::cost_unchecked` with producer index out of bounds: the len is {} but the index is {}",
            R,
            index
        );

        unsafe { self.costs.get_unchecked(index) }
    }

    /// Returns the producer cap for `resource`.
    ///
    /// For a non-target resource this is the largest amount any single build
    /// consumes of it; owning more producers than that can never increase
    /// the final score, because only one producer is built per tick. The
    /// target resource is uncapped and reports `T::max_value()`.
    #[inline(always)]
    pub fn cap(&self, resource: ResourceIndex) -> T {
        self.caps.get(resource)
    }

    /// Returns the full per-resource cap vector.
    #[inline(always)]
    pub const fn caps(&self) -> &StockVector<T, R> {
        &self.caps
    }

    /// Returns `true` if adding another producer of `producer` can still
    /// pay off, given that `current` of them already exist.
    #[inline(always)]
    pub fn wants_producer(&self, producer: ResourceIndex, current: T) -> bool {
        current < self.caps.get(producer)
    }

    /// Returns `true` if idling for one tick can still change the outcome.
    ///
    /// Waiting is useful exactly when some resource is below its cap while
    /// a producer for it exists, i.e. when more income could unlock a build
    /// that is unaffordable right now.
    #[inline]
    pub fn worth_waiting(
        &self,
        stock: &StockVector<T, R>,
        producers: &StockVector<T, R>,
    ) -> bool {
        for i in 0..R {
            let resource = ResourceIndex::new(i);
            if producers.get(resource) > T::ZERO && stock.get(resource) < self.caps.get(resource)
            {
                return true;
            }
        }
        false
    }
}

impl<T, const R: usize> std::fmt::Display for Blueprint<T, R>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blueprint {} (", self.id)?;
        for (i, cost) in self.costs.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "producer {} costs {}", i, cost)?;
        }
        write!(f, ")")
    }
}

/// A fail-fast builder for [`Blueprint`].
///
/// All cost slots start at zero; set the ones the blueprint needs and call
/// [`BlueprintBuilder::build`], which validates the whole cost matrix at
/// once.
#[derive(Clone, Debug)]
pub struct BlueprintBuilder<T, const R: usize> {
    id: usize,
    costs: [StockVector<T, R>; R],
}

impl<T, const R: usize> BlueprintBuilder<T, R>
where
    T: PrimInt + Unsigned + Zero + PlusOne + SaturatingAddVal + CheckedSubVal,
{
    /// Creates a new builder with an all-zero cost matrix.
    #[inline]
    pub fn new(id: usize) -> Self {
        Self {
            id,
            costs: [StockVector::zero(); R],
        }
    }

    /// Sets the amount of `resource` consumed when building one `producer`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `producer` is out of bounds.
    #[inline]
    pub fn cost(mut self, producer: ResourceIndex, resource: ResourceIndex, amount: T) -> Self {
        let index = producer.get();
        debug_assert!(
            index < R,
            "called `BlueprintBuilder::cost` with producer index out of bounds: the len is {} but the index is {}",
            R,
            index
        );

        self.costs[index].set(resource, amount);
        self
    }

    /// Replaces the whole cost vector for `producer`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `producer` is out of bounds.
    #[inline]
    pub fn producer_cost(mut self, producer: ResourceIndex, cost: StockVector<T, R>) -> Self {
        let index = producer.get();
        debug_assert!(
            index < R,
            "called `BlueprintBuilder::producer_cost` with producer index out of bounds: the len is {} but the index is {}",
            R,
            index
        );

        self.costs[index] = cost;
        self
    }

    /// Validates the cost matrix and builds the blueprint.
    ///
    /// # Errors
    ///
    /// - [`BlueprintError::NoResources`] if `R == 0`.
    /// - [`BlueprintError::TargetCostRequired`] if any producer consumes
    ///   the target resource.
    /// - [`BlueprintError::UnreachableProducer`] if some producer's cost
    ///   can never be paid starting from the base producer alone.
    pub fn build(self) -> Result<Blueprint<T, R>, BlueprintError> {
        if R == 0 {
            return Err(BlueprintError::NoResources);
        }

        for (producer, cost) in self.costs.iter().enumerate() {
            if cost.target() > T::ZERO {
                return Err(BlueprintError::TargetCostRequired { producer });
            }
        }

        // Fixpoint over producibility: the search root owns one base
        // producer, so resource 0 flows from the start. A producer joins
        // once every resource its cost touches is producible.
        let mut producible = [false; R];
        producible[0] = true;
        loop {
            let mut changed = false;
            for (producer, cost) in self.costs.iter().enumerate() {
                if producible[producer] {
                    continue;
                }
                let payable = (0..R).all(|i| {
                    cost.get(ResourceIndex::new(i)) == T::ZERO || producible[i]
                });
                if payable {
                    producible[producer] = true;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        if let Some(producer) = producible.iter().position(|&reachable| !reachable) {
            return Err(BlueprintError::UnreachableProducer { producer });
        }

        let mut caps = self
            .costs
            .iter()
            .fold(StockVector::zero(), |acc, cost| acc.component_max(cost));
        caps.set_target(T::max_value());

        Ok(Blueprint {
            id: self.id,
            costs: self.costs,
            caps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(i: usize) -> ResourceIndex {
        ResourceIndex::new(i)
    }

    fn reference_blueprint() -> Blueprint<u32, 4> {
        Blueprint::builder(1)
            .producer_cost(r(0), [4, 0, 0, 0].into())
            .producer_cost(r(1), [2, 0, 0, 0].into())
            .producer_cost(r(2), [3, 14, 0, 0].into())
            .producer_cost(r(3), [2, 0, 7, 0].into())
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_valid_blueprint() {
        let blueprint = reference_blueprint();
        assert_eq!(blueprint.id(), 1);
        assert_eq!(blueprint.num_resources(), 4);
        assert_eq!(blueprint.target(), r(3));
        assert_eq!(*blueprint.cost(r(2)).as_array(), [3, 14, 0, 0]);
    }

    #[test]
    fn test_caps_are_max_single_build_demand() {
        let blueprint = reference_blueprint();
        assert_eq!(blueprint.cap(r(0)), 4);
        assert_eq!(blueprint.cap(r(1)), 14);
        assert_eq!(blueprint.cap(r(2)), 7);
        assert_eq!(blueprint.cap(r(3)), u32::MAX);
    }

    #[test]
    fn test_wants_producer_respects_cap() {
        let blueprint = reference_blueprint();
        assert!(blueprint.wants_producer(r(0), 3));
        assert!(!blueprint.wants_producer(r(0), 4));
        // The target producer is never capped.
        assert!(blueprint.wants_producer(r(3), 1_000_000));
    }

    #[test]
    fn test_worth_waiting_requires_income_below_cap() {
        let blueprint = reference_blueprint();
        let producers = StockVector::from_array([1, 0, 0, 0]);

        // Ore below its cap and an ore producer exists.
        assert!(blueprint.worth_waiting(&StockVector::zero(), &producers));

        // Every produced resource already at its cap.
        let saturated = StockVector::from_array([4, 0, 0, 0]);
        assert!(!blueprint.worth_waiting(&saturated, &producers));

        // A target producer makes waiting always worthwhile.
        let with_target = StockVector::from_array([1, 0, 0, 1]);
        assert!(blueprint.worth_waiting(&saturated, &with_target));
    }

    #[test]
    fn test_build_rejects_target_cost() {
        let result = Blueprint::<u32, 4>::builder(1)
            .cost(r(0), r(3), 2)
            .build();
        assert_eq!(result, Err(BlueprintError::TargetCostRequired { producer: 0 }));
    }

    #[test]
    fn test_build_rejects_unreachable_producer() {
        // Clay needs obsidian and obsidian needs clay, so neither is ever
        // buildable and the target producer starves with them.
        let result = Blueprint::<u32, 4>::builder(1)
            .producer_cost(r(0), [4, 0, 0, 0].into())
            .producer_cost(r(1), [0, 0, 5, 0].into())
            .producer_cost(r(2), [0, 5, 0, 0].into())
            .producer_cost(r(3), [2, 0, 7, 0].into())
            .build();
        assert_eq!(result, Err(BlueprintError::UnreachableProducer { producer: 1 }));
    }

    #[test]
    fn test_error_display() {
        let error = BlueprintError::TargetCostRequired { producer: 2 };
        assert_eq!(
            format!("{}", error),
            "producer 2 consumes the target resource, which is collect-only"
        );
    }
}
