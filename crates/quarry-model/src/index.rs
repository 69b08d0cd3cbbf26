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

//! Strongly typed index for resource kinds.
//!
//! Each producer kind makes exactly one resource kind, so a single index
//! space addresses both: `ResourceIndex(i)` names resource `i` as well as
//! the producer that outputs it.

use quarry_core::utils::index::{TypedIndex, TypedIndexTag};

/// Tag for [`ResourceIndex`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ResourceIndexTag;

impl TypedIndexTag for ResourceIndexTag {
    const NAME: &'static str = "ResourceIndex";
}

/// A strongly typed index identifying a resource kind (and its producer).
///
/// # Examples
///
/// ```rust
/// # use quarry_model::index::ResourceIndex;
/// let ore = ResourceIndex::new(0);
/// assert_eq!(format!("{}", ore), "ResourceIndex(0)");
/// ```
pub type ResourceIndex = TypedIndex<ResourceIndexTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_index_display() {
        assert_eq!(format!("{}", ResourceIndex::new(3)), "ResourceIndex(3)");
    }

    #[test]
    fn test_resource_index_ordering() {
        assert!(ResourceIndex::new(0) < ResourceIndex::new(3));
    }
}
