//! Points and axes of three-dimensional space.

use geo_traits::{CoordTrait, Dimensions};

use crate::error::{KdTreeError, Result};
use crate::r#type::IndexableNum;

/// One of the three coordinate axes.
///
/// The tree splits on `x` at the root, then `y`, then `z`, and wraps back around to `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// The first axis, index 0
    #[default]
    X = 0,
    /// The second axis, index 1
    Y = 1,
    /// The third axis, index 2
    Z = 2,
}

impl Axis {
    /// All axes in split order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The split axis used at the given tree depth, `depth mod 3`.
    #[inline]
    pub fn from_depth(depth: usize) -> Self {
        Self::ALL[depth % 3]
    }

    /// The axis following this one, wrapping from `z` back to `x`.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// The numeric index of this axis.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Axis {
    type Error = KdTreeError;

    fn try_from(axis: usize) -> Result<Self> {
        match axis {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            axis => Err(KdTreeError::OutOfRange { axis }),
        }
    }
}

/// A point in three-dimensional space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3<N: IndexableNum> {
    coords: [N; 3],
}

impl<N: IndexableNum> Point3<N> {
    /// Create a new point from its three coordinates.
    #[inline]
    pub fn new(x: N, y: N, z: N) -> Self {
        Self { coords: [x, y, z] }
    }

    /// Convert any three-dimensional [`CoordTrait`] into a point.
    ///
    /// Coordinates without a `z` axis are rejected with [`KdTreeError::OutOfRange`] for axis 2. A
    /// fourth `m` value is ignored.
    pub fn try_from_coord(coord: &impl CoordTrait<T = N>) -> Result<Self> {
        match coord.dim() {
            Dimensions::Xyz | Dimensions::Xyzm => {
                Ok(Self::new(coord.x(), coord.y(), coord.nth_or_panic(2)))
            }
            _ => Err(KdTreeError::OutOfRange { axis: Axis::Z.index() }),
        }
    }

    /// The `x` coordinate.
    #[inline]
    pub fn x(&self) -> N {
        self.coords[0]
    }

    /// The `y` coordinate.
    #[inline]
    pub fn y(&self) -> N {
        self.coords[1]
    }

    /// The `z` coordinate.
    #[inline]
    pub fn z(&self) -> N {
        self.coords[2]
    }

    /// Get the value along the axis with the given index.
    ///
    /// Returns [`KdTreeError::OutOfRange`] for any index other than 0, 1 or 2.
    pub fn get(&self, axis: usize) -> Result<N> {
        Ok(self.coord(Axis::try_from(axis)?))
    }

    /// Set the value along the axis with the given index.
    ///
    /// Returns [`KdTreeError::OutOfRange`] for any index other than 0, 1 or 2.
    pub fn set(&mut self, axis: usize, value: N) -> Result<()> {
        self.set_coord(Axis::try_from(axis)?, value);
        Ok(())
    }

    /// Get the value along an axis.
    #[inline]
    pub fn coord(&self, axis: Axis) -> N {
        self.coords[axis.index()]
    }

    /// Set the value along an axis.
    #[inline]
    pub fn set_coord(&mut self, axis: Axis, value: N) {
        self.coords[axis.index()] = value;
    }

    /// The squared Euclidean distance to another point.
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> N {
        let dx = self.coords[0] - other.coords[0];
        let dy = self.coords[1] - other.coords[1];
        let dz = self.coords[2] - other.coords[2];
        dx * dx + dy * dy + dz * dz
    }

    /// Returns `true` if any coordinate is NaN.
    #[inline]
    pub fn has_nan(&self) -> bool {
        self.coords.iter().any(|c| c.is_nan())
    }
}

impl<N: IndexableNum> From<[N; 3]> for Point3<N> {
    fn from(coords: [N; 3]) -> Self {
        Self { coords }
    }
}

impl<N: IndexableNum> From<(N, N, N)> for Point3<N> {
    fn from((x, y, z): (N, N, N)) -> Self {
        Self::new(x, y, z)
    }
}

impl<N: IndexableNum> From<Point3<N>> for [N; 3] {
    fn from(point: Point3<N>) -> Self {
        point.coords
    }
}

impl<N: IndexableNum> CoordTrait for Point3<N> {
    type T = N;

    fn dim(&self) -> Dimensions {
        Dimensions::Xyz
    }

    fn x(&self) -> Self::T {
        self.coords[0]
    }

    fn y(&self) -> Self::T {
        self.coords[1]
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0..=2 => self.coords[n],
            _ => panic!("Invalid index of coord"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn axis_cycles_with_depth() {
        let axes: Vec<Axis> = (0..7).map(Axis::from_depth).collect();
        assert_eq!(
            axes,
            vec![Axis::X, Axis::Y, Axis::Z, Axis::X, Axis::Y, Axis::Z, Axis::X]
        );
        assert_eq!(Axis::Z.next(), Axis::X);
    }

    #[test]
    fn accessor_rejects_invalid_axis() {
        let mut point = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(point.get(2), Ok(3.0));
        assert_eq!(point.get(3), Err(KdTreeError::OutOfRange { axis: 3 }));

        point.set(1, 5.0).unwrap();
        assert_eq!(point.y(), 5.0);
        assert_eq!(
            point.set(7, 0.0),
            Err(KdTreeError::OutOfRange { axis: 7 })
        );
        assert_eq!(point, Point3::new(1.0, 5.0, 3.0));
    }

    #[test]
    fn converts_from_coord_trait() {
        let point = Point3::new(1.0f32, -2.0, 0.5);
        let copy = Point3::try_from_coord(&point).unwrap();
        assert_eq!(point, copy);
        assert_eq!(point.nth(2), Some(0.5));
        assert_eq!(point.nth(3), None);
    }

    /// A planar coordinate, which has no `z` axis.
    struct Planar(f64, f64);

    impl CoordTrait for Planar {
        type T = f64;

        fn dim(&self) -> Dimensions {
            Dimensions::Xy
        }

        fn x(&self) -> f64 {
            self.0
        }

        fn y(&self) -> f64 {
            self.1
        }

        fn nth_or_panic(&self, n: usize) -> f64 {
            match n {
                0 => self.0,
                1 => self.1,
                _ => panic!("Invalid index of coord"),
            }
        }
    }

    #[test]
    fn rejects_coord_without_z() {
        assert_eq!(
            Point3::try_from_coord(&Planar(1.0, 2.0)),
            Err(KdTreeError::OutOfRange { axis: 2 })
        );
    }

    #[test]
    fn squared_distance() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 2.0, 2.0);
        assert_eq!(a.distance_squared(&b), 9.0);
        assert!(!a.has_nan());
        assert!(Point3::new(f64::NAN, 0.0, 0.0).has_nan());
    }
}
