//! Conversion of retained search candidates into `(point, payload)` results.

use crate::kdtree::candidates::BoundedCandidates;
use crate::kdtree::index::Entry;
use crate::kdtree::point::Point3;
use crate::r#type::IndexableNum;

/// One result of a nearest-neighbor or radial query.
#[derive(Debug, PartialEq)]
pub struct Neighbor<'a, N: IndexableNum, T> {
    /// The slot of the tree this result was read from
    pub slot: usize,
    /// The indexed point
    pub point: &'a Point3<N>,
    /// The payload stored with `point`
    pub payload: &'a T,
    /// The squared Euclidean distance from the query point
    pub distance_squared: N,
}

impl<N: IndexableNum, T> Clone for Neighbor<'_, N, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: IndexableNum, T> Copy for Neighbor<'_, N, T> {}

impl<'a, N: IndexableNum, T> Neighbor<'a, N, T> {
    /// The Euclidean distance from the query point.
    pub fn distance(&self) -> N {
        self.distance_squared.sqrt()
    }

    /// Drop the distance, keeping the `(point, payload)` pair.
    pub fn into_pair(self) -> (&'a Point3<N>, &'a T) {
        (self.point, self.payload)
    }
}

/// Resolve the slots retained by a query against the tree's storage.
///
/// The ascending-distance order of `candidates` is preserved.
pub fn neighbors_from_candidates<N: IndexableNum, T>(
    candidates: BoundedCandidates<N>,
    slots: &[Option<Entry<N, T>>],
) -> Vec<Neighbor<'_, N, T>> {
    candidates
        .into_iter()
        .filter_map(|(slot, distance_squared)| {
            let entry = slots.get(slot)?.as_ref()?;
            Some(Neighbor {
                slot,
                point: &entry.point,
                payload: &entry.payload,
                distance_squared,
            })
        })
        .collect()
}
