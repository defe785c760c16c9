//! The coordinate types an index can be built over.

use std::fmt::Debug;

use num_traits::Float;

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Only `f32` and `f64` are
/// supported, since distances are computed as squared Euclidean distances in the coordinate type
/// and integer coordinates would overflow for moderately large inputs.
pub trait IndexableNum:
    private::Sealed + Float + Default + Debug + Send + Sync + 'static
{
}

impl IndexableNum for f32 {}

impl IndexableNum for f64 {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
