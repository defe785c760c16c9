//! Queries over a built tree: nearest neighbors and radial search.

use geo_traits::CoordTrait;
use tinyvec::TinyVec;

use crate::error::{KdTreeError, Result};
use crate::kdtree::bbox::BoundingBox;
use crate::kdtree::candidates::BoundedCandidates;
use crate::kdtree::index::Entry;
use crate::kdtree::point::{Axis, Point3};
use crate::kdtree::result::{neighbors_from_candidates, Neighbor};
use crate::kdtree::traversal::Node;
use crate::r#type::IndexableNum;

/// A trait for searching and accessing data out of a KdTree.
pub trait KdTreeIndex<N: IndexableNum, T>: Sized {
    /// The underlying slot array of this tree, addressed as an implicit complete binary tree
    fn slots(&self) -> &[Option<Entry<N, T>>];

    /// The number of items in this tree
    fn num_items(&self) -> usize;

    /// The length of the slot array, a power of two larger than [`Self::num_items`]
    fn storage_len(&self) -> usize {
        self.slots().len()
    }

    /// The number of levels of this tree, `floor(log2(num_items)) + 1`
    fn height(&self) -> usize {
        (usize::BITS - self.num_items().leading_zeros()) as usize
    }

    /// The entry stored at `slot`, or `None` if the slot is unoccupied or out of range
    fn get(&self, slot: usize) -> Option<&Entry<N, T>> {
        self.slots().get(slot)?.as_ref()
    }

    /// Iterate over all occupied slots as `(slot, entry)`, in slot order
    fn iter<'a>(&'a self) -> impl Iterator<Item = (usize, &'a Entry<N, T>)>
    where
        T: 'a,
    {
        self.slots()
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| Some((slot, entry.as_ref()?)))
    }

    /// Run a branch-and-bound search from the root, returning the retained candidates.
    ///
    /// - target: query point
    /// - capacity: the most candidates to retain
    /// - max_dist_squared: only points at a squared distance at most this are considered
    ///
    /// The returned candidates are slots paired with squared distances, ascending. Use
    /// [`neighbors_from_candidates`] to resolve them into points and payloads.
    fn search_candidates(
        &self,
        target: &Point3<N>,
        capacity: usize,
        max_dist_squared: N,
    ) -> BoundedCandidates<N> {
        let slots = self.slots();
        let occupied = |slot: usize| matches!(slots.get(slot), Some(Some(_)));

        let mut candidates = BoundedCandidates::new(capacity);

        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[Frame<N>; 32]> = TinyVec::new();
        if occupied(0) {
            stack.push(Frame::new(Step::Visit, 0, Axis::X, BoundingBox::unbounded()));
        }

        while let Some(frame) = stack.pop() {
            let Some(Some(entry)) = slots.get(frame.slot) else {
                continue;
            };

            match frame.step {
                Step::Visit => {
                    let axis = frame.axis;
                    let split = entry.point.coord(axis);
                    let (left_box, right_box) = frame.bbox.split(axis, split);
                    let left = (2 * frame.slot + 1, left_box);
                    let right = (2 * frame.slot + 2, right_box);
                    let (near, far) = if target.coord(axis) <= split {
                        (left, right)
                    } else {
                        (right, left)
                    };

                    // Note: these are pushed in backwards order to what gets popped. The near
                    // subtree is searched completely before the far subtree is considered, and
                    // the node itself is offered last.
                    stack.push(Frame::new(Step::Offer, frame.slot, axis, frame.bbox));
                    if occupied(far.0) {
                        stack.push(Frame::new(Step::Far, far.0, axis.next(), far.1));
                    }
                    if occupied(near.0) {
                        stack.push(Frame::new(Step::Visit, near.0, axis.next(), near.1));
                    }
                }
                Step::Far => {
                    // The far subtree can only contribute a point if its box is within the
                    // search distance and either there is room left or it may beat the worst
                    // retained candidate.
                    let dist = frame.bbox.distance_squared(target);
                    let may_improve = !candidates.is_full()
                        || candidates.max_priority().is_some_and(|worst| dist < worst);
                    if dist <= max_dist_squared && may_improve {
                        stack.push(Frame { step: Step::Visit, ..frame });
                    }
                }
                Step::Offer => {
                    let dist = entry.point.distance_squared(target);
                    if dist <= max_dist_squared {
                        candidates.add(frame.slot, dist);
                    }
                }
            }
        }

        candidates
    }

    /// Search for the `k` points closest to `point`.
    ///
    /// Returns up to `min(k, num_items)` results, ascending by distance. Points at equal distance
    /// may be returned in any order.
    fn nearest_neighbors(&self, point: &Point3<N>, k: usize) -> Vec<Neighbor<'_, N, T>> {
        let candidates = self.search_candidates(point, k, N::infinity());
        neighbors_from_candidates(candidates, self.slots())
    }

    /// Search for the single point closest to `point`.
    fn nearest_neighbor(&self, point: &Point3<N>) -> Option<Neighbor<'_, N, T>> {
        self.nearest_neighbors(point, 1).into_iter().next()
    }

    /// Search for the `k` points closest to a 3D coordinate.
    ///
    /// Fails with [`KdTreeError::OutOfRange`] if `coord` has no `z` axis.
    fn nearest_neighbors_coord(
        &self,
        coord: &impl CoordTrait<T = N>,
        k: usize,
    ) -> Result<Vec<Neighbor<'_, N, T>>> {
        let point = Point3::try_from_coord(coord)?;
        Ok(self.nearest_neighbors(&point, k))
    }

    /// Search the index for points within a given radius.
    ///
    /// - center: query point
    /// - radius: search radius, points at exactly this distance are included
    /// - count: the most results to return, or `None` for no limit
    ///
    /// Returns results ascending by distance. Fails with [`KdTreeError::InvalidInput`] if
    /// `radius` is negative or NaN.
    fn radial_search(
        &self,
        center: &Point3<N>,
        radius: N,
        count: Option<usize>,
    ) -> Result<Vec<Neighbor<'_, N, T>>> {
        if radius.is_nan() || radius < N::zero() {
            return Err(KdTreeError::InvalidInput(format!(
                "Search radius must be non-negative, got {:?}.",
                radius
            )));
        }

        let capacity = count.unwrap_or(self.num_items());
        let candidates = self.search_candidates(center, capacity, radius * radius);
        Ok(neighbors_from_candidates(candidates, self.slots()))
    }

    /// Search the index for points within a given radius of a 3D coordinate.
    ///
    /// Fails with [`KdTreeError::OutOfRange`] if `coord` has no `z` axis.
    fn radial_search_coord(
        &self,
        coord: &impl CoordTrait<T = N>,
        radius: N,
        count: Option<usize>,
    ) -> Result<Vec<Neighbor<'_, N, T>>> {
        let center = Point3::try_from_coord(coord)?;
        self.radial_search(&center, radius, count)
    }

    /// Access the root node of the tree for manual traversal.
    fn root(&self) -> Option<Node<'_, N, T, Self>> {
        Node::from_root(self)
    }
}

/// What to do with a slot popped from the search stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Step {
    /// Split the node's box and queue its children and itself
    #[default]
    Visit,
    /// Descend into a far subtree if it can still contribute
    Far,
    /// Offer the node's own point to the candidates
    Offer,
}

#[derive(Debug, Clone, Copy, Default)]
struct Frame<N: IndexableNum> {
    step: Step,
    slot: usize,
    axis: Axis,
    bbox: BoundingBox<N>,
}

impl<N: IndexableNum> Frame<N> {
    #[inline]
    fn new(step: Step, slot: usize, axis: Axis, bbox: BoundingBox<N>) -> Self {
        Self {
            step,
            slot,
            axis,
            bbox,
        }
    }
}
