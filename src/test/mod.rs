//! Fixtures shared by the tests of this crate.

use rand::Rng;

use crate::kdtree::{KdTree, Point3};


/// `n` points with coordinates drawn uniformly from `[-extent, extent)`.
pub(crate) fn random_points(rng: &mut impl Rng, n: usize, extent: f64) -> Vec<Point3<f64>> {
    (0..n)
        .map(|_| {
            Point3::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            )
        })
        .collect()
}

/// `n` points on a coarse integer lattice, so that many coordinates and distances repeat.
pub(crate) fn lattice_points(rng: &mut impl Rng, n: usize, side: i32) -> Vec<Point3<f64>> {
    (0..n)
        .map(|_| {
            Point3::new(
                rng.gen_range(0..side).into(),
                rng.gen_range(0..side).into(),
                rng.gen_range(0..side).into(),
            )
        })
        .collect()
}

/// A tree whose payload is each point's insertion index.
pub(crate) fn indexed_tree(points: &[Point3<f64>]) -> KdTree<f64, usize> {
    KdTree::try_new(points.to_vec(), (0..points.len()).collect()).unwrap()
}

/// Squared distances of the `k` closest points, by linear scan.
pub(crate) fn brute_force_knn(points: &[Point3<f64>], target: &Point3<f64>, k: usize) -> Vec<f64> {
    let mut dists: Vec<f64> = points.iter().map(|p| p.distance_squared(target)).collect();
    dists.sort_by(|a, b| a.partial_cmp(b).unwrap());
    dists.truncate(k);
    dists
}

/// Insertion indices and squared distances of every point within `radius`, ascending by distance.
pub(crate) fn brute_force_radial(
    points: &[Point3<f64>],
    center: &Point3<f64>,
    radius: f64,
) -> Vec<(usize, f64)> {
    let r2 = radius * radius;
    let mut found: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, p.distance_squared(center)))
        .filter(|(_, d)| *d <= r2)
        .collect();
    found.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then(a.0.cmp(&b.0)));
    found
}
