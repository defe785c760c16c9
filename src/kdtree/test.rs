use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::KdTreeError;
use crate::kdtree::builder::{slot_order, storage_len};
use crate::kdtree::{Axis, KdTree, KdTreeBuilder, KdTreeIndex, Point3};
use crate::test::{indexed_tree, lattice_points, random_points};

/// The four points of the unit "corner": origin plus one step along each axis.
fn corner_tree() -> KdTree<f64, char> {
    let points = vec![
        Point3::new(0., 0., 0.),
        Point3::new(1., 0., 0.),
        Point3::new(0., 1., 0.),
        Point3::new(0., 0., 1.),
    ];
    KdTree::try_new(points, vec!['A', 'B', 'C', 'D']).unwrap()
}

#[test]
fn nearest_two_from_the_origin() {
    let tree = corner_tree();
    let origin = Point3::new(0., 0., 0.);

    let results = tree.nearest_neighbors(&origin, 2);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].point, &origin);
    assert_eq!(*results[0].payload, 'A');
    assert_eq!(results[0].distance_squared, 0.);

    // B, C and D are all at distance 1, any of them may come second
    assert_eq!(results[1].distance(), 1.);
    assert!(['B', 'C', 'D'].contains(results[1].payload));
}

#[test]
fn zero_radius_finds_only_the_exact_point() {
    let tree = corner_tree();
    let origin = Point3::new(0., 0., 0.);

    let results = tree.radial_search(&origin, 0., None).unwrap();
    let pairs: Vec<_> = results.into_iter().map(|n| n.into_pair()).collect();
    assert_eq!(pairs, vec![(&origin, &'A')]);
}

#[test]
fn unit_radius_includes_the_boundary() {
    let tree = corner_tree();
    let origin = Point3::new(0., 0., 0.);

    let results = tree.radial_search(&origin, 1., None).unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(*results[0].payload, 'A');

    let mut rest: Vec<char> = results[1..].iter().map(|n| *n.payload).collect();
    rest.sort();
    assert_eq!(rest, vec!['B', 'C', 'D']);
    assert!(results.iter().all(|n| n.distance() <= 1.));
}

#[test]
fn origin_points_are_not_confused_with_empty_slots() {
    // Two points leave half of the four slots empty. Searching far away must not report
    // phantom points at the origin.
    let points = vec![Point3::new(5., 5., 5.), Point3::new(6., 6., 6.)];
    let tree = KdTree::try_new(points, vec![1, 2]).unwrap();
    assert_eq!(tree.storage_len(), 4);

    let results = tree.nearest_neighbors(&Point3::new(0., 0., 0.), 10);
    assert_eq!(results.len(), 2);
    assert_eq!(*results[0].payload, 1);

    let results = tree
        .radial_search(&Point3::new(0., 0., 0.), 1., None)
        .unwrap();
    assert!(results.is_empty());
}

#[test]
fn storage_len_is_next_power_of_two_above_count() {
    let cases = [(1, 2), (2, 4), (3, 4), (4, 8), (5, 8), (7, 8), (8, 16), (100, 128), (128, 256)];
    for (num_items, expected) in cases {
        assert_eq!(storage_len(num_items), Some(expected), "n = {}", num_items);
    }

    let mut rng = StdRng::seed_from_u64(0);
    for n in [1, 2, 15, 16, 17, 200] {
        let tree = indexed_tree(&random_points(&mut rng, n, 1.));
        let len = tree.storage_len();
        assert!(len.is_power_of_two());
        assert!(len > n);
        assert!(len / 2 <= n);
        assert_eq!(tree.num_items(), n);
        assert_eq!(tree.iter().count(), n);
    }
}

#[test]
fn slot_order_places_medians() {
    // sorted positions 0..5, median 2 at the root, then 1 and 4, then 0 and 3
    assert_eq!(slot_order(5), vec![3, 1, 0, 5, 2]);
    assert_eq!(slot_order(1), vec![0]);
    // upper median for even counts
    assert_eq!(slot_order(2), vec![1, 0]);
}

#[test]
fn builds_a_median_split_tree() {
    let points: Vec<Point3<f64>> = [[3., 0., 0.], [1., 0., 0.], [4., 0., 0.], [0., 0., 0.], [2., 0., 0.]]
        .into_iter()
        .map(Point3::from)
        .collect();
    let tree = indexed_tree(&points);

    // root is the x median
    assert_eq!(tree.get(0).unwrap().point().x(), 2.);
    // left subset {0, 1} keeps its upper median 1, right subset {3, 4} keeps 4
    assert_eq!(tree.get(1).unwrap().point().x(), 1.);
    assert_eq!(tree.get(2).unwrap().point().x(), 4.);
    assert_eq!(tree.get(3).unwrap().point().x(), 0.);
    assert_eq!(tree.get(5).unwrap().point().x(), 3.);
    assert!(tree.get(4).is_none());
    assert!(tree.get(6).is_none());
    assert!(tree.get(100).is_none());
    assert_eq!(tree.height(), 3);
}

#[test]
fn every_subtree_respects_its_split() {
    let mut rng = StdRng::seed_from_u64(13);
    let points = lattice_points(&mut rng, 300, 6);
    let tree = indexed_tree(&points);

    let root = tree.root().unwrap();
    let mut stack = vec![root];
    let mut visited = 0;
    while let Some(node) = stack.pop() {
        visited += 1;
        assert_eq!(node.axis(), Axis::from_depth(node.depth()));
        assert!(node.bbox().contains(node.point()));

        let split = node.point().coord(node.axis());
        if let Some(left) = node.left_child() {
            assert!(left.point().coord(node.axis()) <= split);
            stack.push(left);
        }
        if let Some(right) = node.right_child() {
            assert!(right.point().coord(node.axis()) >= split);
            stack.push(right);
        }
        assert_eq!(node.is_leaf(), node.left_child().is_none() && node.right_child().is_none());
    }
    assert_eq!(visited, 300);
}

#[test]
fn single_point_tree() {
    let tree = KdTree::try_new(vec![Point3::new(1., 2., 3.)], vec!["only"]).unwrap();
    assert_eq!(tree.storage_len(), 2);
    assert_eq!(tree.height(), 1);
    assert!(tree.root().unwrap().is_leaf());

    let results = tree.nearest_neighbors(&Point3::new(-4., 0., 9.), 3);
    assert_eq!(results.len(), 1);
    assert_eq!(*results[0].payload, "only");
    assert!(tree.nearest_neighbors(&Point3::new(0., 0., 0.), 0).is_empty());
}

#[test]
fn nearest_neighbor_by_coord() {
    let tree = corner_tree();
    let nearest = tree.nearest_neighbor(&Point3::new(0.9, 0.1, 0.)).unwrap();
    assert_eq!(*nearest.payload, 'B');

    let results = tree
        .nearest_neighbors_coord(&Point3::new(0., 0.2, 0.9), 1)
        .unwrap();
    assert_eq!(*results[0].payload, 'D');

    let results = tree
        .radial_search_coord(&Point3::new(0., 1., 0.), 0.5, None)
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(*results[0].payload, 'C');
}

#[test]
fn candidates_can_be_resolved_by_callers() {
    use crate::kdtree::neighbors_from_candidates;

    let tree = corner_tree();
    let candidates = tree.search_candidates(&Point3::new(0., 0., 0.), 4, 0.25);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates.min_priority(), Some(0.));

    let neighbors = neighbors_from_candidates(candidates, tree.slots());
    assert_eq!(*neighbors[0].payload, 'A');
}

#[test]
fn rejects_invalid_construction() {
    let err = KdTree::try_new(vec![Point3::new(0., 0., 0.)], vec![1, 2]).unwrap_err();
    assert!(matches!(err, KdTreeError::InvalidInput(_)));

    let err = KdTree::<f64, u8>::try_new(vec![], vec![]).unwrap_err();
    assert!(matches!(err, KdTreeError::InvalidInput(_)));

    let err = KdTree::try_new(vec![Point3::new(0., f64::NAN, 0.)], vec![1]).unwrap_err();
    assert!(matches!(err, KdTreeError::InvalidInput(_)));

    let mut builder = KdTreeBuilder::new(3);
    builder.add(Point3::new(0., 0., 0.), ());
    assert_eq!(
        builder.finish().unwrap_err(),
        KdTreeError::InvalidInput("Added 1 items when expected 3.".to_string())
    );
}

#[test]
fn rejects_negative_radius() {
    let tree = corner_tree();
    let origin = Point3::new(0., 0., 0.);
    assert!(matches!(
        tree.radial_search(&origin, -1., None),
        Err(KdTreeError::InvalidInput(_))
    ));
    assert!(tree.radial_search(&origin, f64::NAN, None).is_err());
}

#[test]
fn builds_from_entries_with_f32() {
    let tree = KdTree::from_entries(
        (0..10u32).map(|i| (Point3::new(i as f32, 0., 0.), i)),
    )
    .unwrap();
    let results = tree.nearest_neighbors(&Point3::new(6.2, 0., 0.), 3);
    let payloads: Vec<u32> = results.iter().map(|n| *n.payload).collect();
    assert_eq!(payloads, vec![6, 7, 5]);

    let mut entries = tree.into_entries();
    entries.sort_by_key(|(_, payload)| *payload);
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[3], (Point3::new(3., 0., 0.), 3));
}
