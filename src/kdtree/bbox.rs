//! Axis-aligned bounding boxes used to bound unvisited subtrees during search.

use crate::kdtree::point::{Axis, Point3};
use crate::r#type::IndexableNum;

/// An axis-aligned box in three-dimensional space.
///
/// Boxes are plain values. Each recursion level of a search derives the boxes of its two children
/// with [`BoundingBox::split`] instead of clamping a shared box in place.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox<N: IndexableNum> {
    min: Point3<N>,
    max: Point3<N>,
}

impl<N: IndexableNum> BoundingBox<N> {
    /// Create a new box from its minimum and maximum corners.
    pub fn new(min: Point3<N>, max: Point3<N>) -> Self {
        Self { min, max }
    }

    /// A box spanning the full finite range of `N` on every axis.
    ///
    /// The bounds are finite so that clamping an infinite target yields a finite corner, whose
    /// distance to the target is infinite rather than NaN.
    pub fn unbounded() -> Self {
        let lo = N::min_value();
        let hi = N::max_value();
        Self {
            min: Point3::new(lo, lo, lo),
            max: Point3::new(hi, hi, hi),
        }
    }

    /// The minimum corner.
    pub fn min_point(&self) -> &Point3<N> {
        &self.min
    }

    /// The maximum corner.
    pub fn max_point(&self) -> &Point3<N> {
        &self.max
    }

    /// The point inside this box closest to `target`.
    ///
    /// Each axis is clamped independently: below the minimum snaps to the minimum, above the
    /// maximum snaps to the maximum, anything else keeps the target's value.
    #[inline]
    pub fn closest_point(&self, target: &Point3<N>) -> Point3<N> {
        let mut closest = *target;
        for axis in Axis::ALL {
            let value = target.coord(axis);
            if value < self.min.coord(axis) {
                closest.set_coord(axis, self.min.coord(axis));
            } else if value > self.max.coord(axis) {
                closest.set_coord(axis, self.max.coord(axis));
            }
        }
        closest
    }

    /// Squared distance from `target` to the closest point of this box. Zero when `target` lies
    /// inside.
    #[inline]
    pub fn distance_squared(&self, target: &Point3<N>) -> N {
        self.closest_point(target).distance_squared(target)
    }

    /// Returns `true` if `point` lies inside this box, boundary included.
    pub fn contains(&self, point: &Point3<N>) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let value = point.coord(axis);
            value >= self.min.coord(axis) && value <= self.max.coord(axis)
        })
    }

    /// Split this box at `value` along `axis`.
    ///
    /// The first box keeps everything at or below `value` (its maximum is trimmed), the second
    /// everything at or above it (its minimum is trimmed).
    #[inline]
    pub fn split(&self, axis: Axis, value: N) -> (Self, Self) {
        let mut left = *self;
        let mut right = *self;
        left.max.set_coord(axis, value);
        right.min.set_coord(axis, value);
        (left, right)
    }
}
