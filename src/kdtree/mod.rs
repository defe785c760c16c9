//! An implementation of an immutable 3D k-d tree with payloads.

#![warn(missing_docs)]

mod bbox;
mod builder;
mod candidates;
mod index;
mod point;
mod result;
mod r#trait;
pub mod traversal;

pub use bbox::BoundingBox;
#[cfg(feature = "rayon")]
pub use builder::DEFAULT_PARALLEL_THRESHOLD;
pub use builder::KdTreeBuilder;
pub use candidates::BoundedCandidates;
pub use index::{Entry, KdTree};
pub use point::{Axis, Point3};
pub use r#trait::KdTreeIndex;
pub use result::{neighbors_from_candidates, Neighbor};

#[cfg(test)]
mod test;
