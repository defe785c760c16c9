//! A fixed-capacity list of the best candidates seen so far during a query.

use std::cmp::Ordering;

use crate::r#type::IndexableNum;

/// Keeps up to `capacity` `(element, priority)` pairs, sorted ascending by priority.
///
/// Lower priorities are better. Once full, a new pair is only retained if its priority is strictly
/// lower than the current worst, which is then dropped.
///
/// Ties are not resolved first-in-first-out: the insertion position of a priority equal to one
/// already stored is whatever probe the binary search lands on, so equal priorities may end up in
/// either order.
#[derive(Debug, Clone)]
pub struct BoundedCandidates<N: IndexableNum> {
    elements: Vec<usize>,
    priorities: Vec<N>,
    capacity: usize,
}

impl<N: IndexableNum> BoundedCandidates<N> {
    /// Create an empty list that retains at most `capacity` candidates.
    pub fn new(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            priorities: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Offer a candidate. Returns `true` if it was retained.
    pub fn add(&mut self, element: usize, priority: N) -> bool {
        if self.is_full() {
            match self.priorities.last() {
                Some(&worst) if priority < worst => {
                    self.elements.pop();
                    self.priorities.pop();
                }
                // Either no better than the worst, or a capacity of zero
                _ => return false,
            }
        }

        let pos = self.insertion_point(priority);
        self.elements.insert(pos, element);
        self.priorities.insert(pos, priority);
        debug_assert!(self.priorities.len() <= self.capacity);
        true
    }

    #[inline]
    fn insertion_point(&self, priority: N) -> usize {
        match self
            .priorities
            .binary_search_by(|probe| probe.partial_cmp(&priority).unwrap_or(Ordering::Less))
        {
            Ok(pos) | Err(pos) => pos,
        }
    }

    /// The maximum number of candidates this list retains.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of retained candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.priorities.len()
    }

    /// Returns `true` if no candidate is retained.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.priorities.is_empty()
    }

    /// Returns `true` once `capacity` candidates are retained. A zero-capacity list is always
    /// full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.priorities.len() == self.capacity
    }

    /// The element with the lowest priority.
    pub fn min_element(&self) -> Option<usize> {
        self.elements.first().copied()
    }

    /// The lowest retained priority.
    pub fn min_priority(&self) -> Option<N> {
        self.priorities.first().copied()
    }

    /// The element with the highest priority.
    pub fn max_element(&self) -> Option<usize> {
        self.elements.last().copied()
    }

    /// The highest retained priority, i.e. the current worst candidate.
    pub fn max_priority(&self) -> Option<N> {
        self.priorities.last().copied()
    }

    /// The `i`-th best candidate as `(element, priority)`.
    pub fn get(&self, i: usize) -> Option<(usize, N)> {
        Some((*self.elements.get(i)?, *self.priorities.get(i)?))
    }

    /// Iterate over `(element, priority)` pairs in ascending priority order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, N)> + '_ {
        self.elements
            .iter()
            .copied()
            .zip(self.priorities.iter().copied())
    }
}

impl<N: IndexableNum> IntoIterator for BoundedCandidates<N> {
    type Item = (usize, N);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<usize>, std::vec::IntoIter<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter().zip(self.priorities)
    }
}
