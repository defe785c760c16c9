//! Utilities to traverse the KdTree structure.

use crate::kdtree::bbox::BoundingBox;
use crate::kdtree::index::Entry;
use crate::kdtree::point::{Axis, Point3};
use crate::kdtree::KdTreeIndex;
use crate::r#type::IndexableNum;

/// An occupied node in the KdTree.
///
/// Each node knows the bounding box of the subtree below it. The root's box is unbounded, and
/// each child's box is its parent's box trimmed at the parent's point along the parent's axis.
#[derive(Debug)]
pub struct Node<'a, N: IndexableNum, T, I: KdTreeIndex<N, T>> {
    /// The tree that this node is a reference onto
    tree: &'a I,

    entry: &'a Entry<N, T>,

    slot: usize,

    /// The axis that the children of this node are split over.
    axis: Axis,

    bbox: BoundingBox<N>,
}

impl<N: IndexableNum, T, I: KdTreeIndex<N, T>> Clone for Node<'_, N, T, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: IndexableNum, T, I: KdTreeIndex<N, T>> Copy for Node<'_, N, T, I> {}

impl<'a, N: IndexableNum, T, I: KdTreeIndex<N, T>> Node<'a, N, T, I> {
    fn new(tree: &'a I, slot: usize, axis: Axis, bbox: BoundingBox<N>) -> Option<Self> {
        let entry = tree.get(slot)?;
        Some(Self {
            tree,
            entry,
            slot,
            axis,
            bbox,
        })
    }

    pub(crate) fn from_root(tree: &'a I) -> Option<Self> {
        Self::new(tree, 0, Axis::X, BoundingBox::unbounded())
    }

    /// The slot of this node in the tree's storage.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// The depth of this node, zero at the root.
    pub fn depth(&self) -> usize {
        (usize::BITS - (self.slot + 1).leading_zeros() - 1) as usize
    }

    /// The axis this node splits its children on.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The point stored at this node.
    pub fn point(&self) -> &'a Point3<N> {
        &self.entry.point
    }

    /// The payload stored at this node.
    pub fn payload(&self) -> &'a T {
        &self.entry.payload
    }

    /// The box bounding every point in the subtree rooted at this node.
    pub fn bbox(&self) -> &BoundingBox<N> {
        &self.bbox
    }

    #[inline]
    fn split_value(&self) -> N {
        self.entry.point.coord(self.axis)
    }

    /// The child node holding points at or below this node's point along [`Self::axis`].
    pub fn left_child(&self) -> Option<Node<'a, N, T, I>> {
        let (left_box, _) = self.bbox.split(self.axis, self.split_value());
        Self::new(self.tree, 2 * self.slot + 1, self.axis.next(), left_box)
    }

    /// The child node holding points at or above this node's point along [`Self::axis`].
    pub fn right_child(&self) -> Option<Node<'a, N, T, I>> {
        let (_, right_box) = self.bbox.split(self.axis, self.split_value());
        Self::new(self.tree, 2 * self.slot + 2, self.axis.next(), right_box)
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.tree.get(2 * self.slot + 1).is_none() && self.tree.get(2 * self.slot + 2).is_none()
    }

    /// Returns `true` if this node has at least one child.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}
