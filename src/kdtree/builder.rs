//! Construction of a [`KdTree`] by recursive median splitting.

use std::cmp::Ordering;

use tinyvec::TinyVec;
use tracing::debug;

use crate::error::{KdTreeError, Result};
use crate::kdtree::index::{Entry, KdTree};
use crate::kdtree::point::{Axis, Point3};
use crate::kdtree::r#trait::KdTreeIndex;
use crate::r#type::IndexableNum;

/// Subsets smaller than this are kd-sorted on the calling thread by [`KdTreeBuilder::par_finish`].
#[cfg(feature = "rayon")]
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// A builder to create a [`KdTree`].
///
/// ```
/// use spatial_kdtree::kdtree::{KdTreeBuilder, KdTreeIndex, Point3};
///
/// let mut builder = KdTreeBuilder::<f64, &str>::new(3);
/// builder.add(Point3::new(0., 0., 0.), "a");
/// builder.add(Point3::new(1., 1., 1.), "b");
/// builder.add(Point3::new(2., 2., 2.), "c");
/// let tree = builder.finish().unwrap();
///
/// let results = tree.nearest_neighbors(&Point3::new(2., 2., 1.5), 2);
/// assert_eq!(*results[0].payload, "c");
/// assert_eq!(*results[1].payload, "b");
/// ```
#[derive(Debug, Clone)]
pub struct KdTreeBuilder<N: IndexableNum, T> {
    entries: Vec<Entry<N, T>>,
    num_items: usize,
    #[cfg(feature = "rayon")]
    parallel_threshold: usize,
}

impl<N: IndexableNum, T> KdTreeBuilder<N, T> {
    /// Create a new builder for the provided number of items.
    pub fn new(num_items: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_items),
            num_items,
            #[cfg(feature = "rayon")]
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Create a new builder for the provided number of items, where [`Self::par_finish`] stops
    /// splitting work across threads for subsets smaller than `parallel_threshold`.
    #[cfg(feature = "rayon")]
    pub fn new_with_parallel_threshold(num_items: usize, parallel_threshold: usize) -> Self {
        Self {
            parallel_threshold: parallel_threshold.max(2),
            ..Self::new(num_items)
        }
    }

    /// Add a point and its payload to the index.
    ///
    /// This returns the insertion index of the point.
    pub fn add(&mut self, point: Point3<N>, payload: T) -> usize {
        let index = self.entries.len();
        self.entries.push(Entry { point, payload });
        index
    }

    /// Add parallel sequences of points and payloads, which must have the same length.
    pub fn add_all(&mut self, points: Vec<Point3<N>>, payloads: Vec<T>) -> Result<()> {
        if points.len() != payloads.len() {
            return Err(KdTreeError::InvalidInput(format!(
                "Got {} points and {} payloads.",
                points.len(),
                payloads.len()
            )));
        }
        self.entries.extend(
            points
                .into_iter()
                .zip(payloads)
                .map(|(point, payload)| Entry { point, payload }),
        );
        Ok(())
    }

    /// Consume this builder, performing the k-d sort and generating a [`KdTree`] ready for
    /// queries.
    pub fn finish(mut self) -> Result<KdTree<N, T>> {
        let _span = tracing::debug_span!("kdtree_finish", num_items = self.num_items).entered();
        self.validate()?;
        kd_sort(&mut self.entries, Axis::X);
        self.into_tree()
    }

    /// Like [`Self::finish`], but kd-sorts the left and right halves of large subsets on the
    /// rayon thread pool.
    #[cfg(feature = "rayon")]
    pub fn par_finish(mut self) -> Result<KdTree<N, T>>
    where
        T: Send,
    {
        let _span =
            tracing::debug_span!("kdtree_par_finish", num_items = self.num_items).entered();
        self.validate()?;
        par_kd_sort(&mut self.entries, Axis::X, self.parallel_threshold);
        self.into_tree()
    }

    fn validate(&self) -> Result<()> {
        if self.entries.len() != self.num_items {
            return Err(KdTreeError::InvalidInput(format!(
                "Added {} items when expected {}.",
                self.entries.len(),
                self.num_items
            )));
        }
        if self.num_items == 0 {
            return Err(KdTreeError::InvalidInput(
                "Cannot build a KdTree without any points.".to_string(),
            ));
        }
        if let Some(index) = self.entries.iter().position(|e| e.point.has_nan()) {
            return Err(KdTreeError::InvalidInput(format!(
                "Point at insertion index {} has a NaN coordinate.",
                index
            )));
        }
        Ok(())
    }

    /// Move the kd-sorted entries into their implicit-tree slots.
    fn into_tree(self) -> Result<KdTree<N, T>> {
        let num_items = self.num_items;
        let storage_len = storage_len(num_items).ok_or_else(|| {
            KdTreeError::InvalidInput(format!("Too many items for one tree: {}.", num_items))
        })?;

        let mut slots: Vec<Option<Entry<N, T>>> =
            std::iter::repeat_with(|| None).take(storage_len).collect();
        for (entry, slot) in self.entries.into_iter().zip(slot_order(num_items)) {
            slots[slot] = Some(entry);
        }

        let tree = KdTree { slots, num_items };
        debug!(num_items, storage_len, height = tree.height(), "built kd-tree");
        Ok(tree)
    }
}

/// The slot array length for `num_items` points: the smallest power of two strictly greater than
/// `num_items`, i.e. `2^(floor(log2(num_items)) + 1)`.
pub(crate) fn storage_len(num_items: usize) -> Option<usize> {
    num_items.checked_add(1)?.checked_next_power_of_two()
}

/// Stable sort on one axis. NaN coordinates are rejected before sorting.
#[inline]
fn sort_on_axis<N: IndexableNum, T>(entries: &mut [Entry<N, T>], axis: Axis) {
    entries.sort_by(|a, b| {
        a.point
            .coord(axis)
            .partial_cmp(&b.point.coord(axis))
            .unwrap_or(Ordering::Equal)
    });
}

/// kd-sort entries so that every subset has its median at `len / 2`, smaller-or-equal values
/// before it and greater-or-equal values after it, alternating the axis with depth.
fn kd_sort<N: IndexableNum, T>(entries: &mut [Entry<N, T>], axis: Axis) {
    let mut stack: TinyVec<[(usize, usize, Axis); 64]> = TinyVec::new();
    stack.push((0, entries.len(), axis));

    while let Some((start, end, axis)) = stack.pop() {
        // zero or one entries are already in place
        if end - start < 2 {
            continue;
        }

        sort_on_axis(&mut entries[start..end], axis);

        let median = start + (end - start) / 2;
        stack.push((start, median, axis.next()));
        stack.push((median + 1, end, axis.next()));
    }
}

#[cfg(feature = "rayon")]
fn par_kd_sort<N: IndexableNum, T: Send>(
    entries: &mut [Entry<N, T>],
    axis: Axis,
    parallel_threshold: usize,
) {
    if entries.len() < parallel_threshold {
        kd_sort(entries, axis);
        return;
    }

    sort_on_axis(entries, axis);

    let median = entries.len() / 2;
    let (left, rest) = entries.split_at_mut(median);
    let right = &mut rest[1..];
    rayon::join(
        || par_kd_sort(left, axis.next(), parallel_threshold),
        || par_kd_sort(right, axis.next(), parallel_threshold),
    );
}

/// For each position of a kd-sorted sequence, the slot it occupies in the implicit tree.
///
/// The median of `[start, end)` goes to `slot`, the left part to `2 * slot + 1` and the right part
/// to `2 * slot + 2`.
pub(crate) fn slot_order(num_items: usize) -> Vec<usize> {
    let mut slots = vec![0; num_items];
    let mut stack: TinyVec<[(usize, usize, usize); 64]> = TinyVec::new();
    stack.push((0, num_items, 0));

    while let Some((start, end, slot)) = stack.pop() {
        if start == end {
            continue;
        }
        let median = start + (end - start) / 2;
        slots[median] = slot;
        stack.push((start, median, 2 * slot + 1));
        stack.push((median + 1, end, 2 * slot + 2));
    }

    slots
}
