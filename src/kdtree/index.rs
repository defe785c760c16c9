//! The immutable tree and the entries it stores.

use crate::error::Result;
use crate::kdtree::builder::KdTreeBuilder;
use crate::kdtree::point::Point3;
use crate::kdtree::r#trait::KdTreeIndex;
use crate::r#type::IndexableNum;

/// A point together with its payload, as stored in one slot of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<N: IndexableNum, T> {
    pub(crate) point: Point3<N>,
    pub(crate) payload: T,
}

impl<N: IndexableNum, T> Entry<N, T> {
    /// The point of this entry.
    pub fn point(&self) -> &Point3<N> {
        &self.point
    }

    /// The payload of this entry.
    pub fn payload(&self) -> &T {
        &self.payload
    }
}

/// An immutable 3D k-d tree.
///
/// Entries are stored in a flat slot array addressed as an implicit complete binary tree: the
/// root is slot 0 and the children of slot `i` are slots `2i + 1` and `2i + 2`. Slots past the
/// last leaf, and slots of absent children, are `None`.
///
/// Usually this will be created via [`KdTreeBuilder`] or [`KdTree::try_new`].
#[derive(Debug, Clone, PartialEq)]
pub struct KdTree<N: IndexableNum, T> {
    pub(crate) slots: Vec<Option<Entry<N, T>>>,
    pub(crate) num_items: usize,
}

impl<N: IndexableNum, T> KdTree<N, T> {
    /// Build a tree from parallel sequences of points and payloads.
    ///
    /// Fails with [`KdTreeError::InvalidInput`][crate::KdTreeError::InvalidInput] if the two
    /// sequences differ in length, are empty, or any point has a NaN coordinate.
    pub fn try_new(points: Vec<Point3<N>>, payloads: Vec<T>) -> Result<Self> {
        let mut builder = KdTreeBuilder::new(points.len());
        builder.add_all(points, payloads)?;
        builder.finish()
    }

    /// Build a tree from an iterator of `(point, payload)` pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (Point3<N>, T)>) -> Result<Self> {
        let entries: Vec<_> = entries.into_iter().collect();
        let mut builder = KdTreeBuilder::new(entries.len());
        for (point, payload) in entries {
            builder.add(point, payload);
        }
        builder.finish()
    }

    /// Consume the tree, returning its `(point, payload)` pairs in slot order.
    pub fn into_entries(self) -> Vec<(Point3<N>, T)> {
        self.slots
            .into_iter()
            .flatten()
            .map(|entry| (entry.point, entry.payload))
            .collect()
    }
}

impl<N: IndexableNum, T> KdTreeIndex<N, T> for KdTree<N, T> {
    fn slots(&self) -> &[Option<Entry<N, T>>] {
        &self.slots
    }

    fn num_items(&self) -> usize {
        self.num_items
    }
}
