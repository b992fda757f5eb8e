//! Bulk loading: every point comes back and every box is tight.

use spatio_int_test::test_util::{
    load_tree, random_int_points, random_points, run_test, sorted_coords,
};
use spatio_rtree::{Point, RTree, SpatialError};

#[test]
fn test_load_returns_same_point_set() {
    run_test(|| {
        for dimension in 1..=4 {
            for &count in &[1, 9, 10, 11, 99, 100, 101, 1234] {
                let points =
                    random_points(count, dimension, 1000.0, count as u64 * 31 + dimension as u64);
                let tree = load_tree(dimension, points.clone())?;

                assert_eq!(tree.len(), count);
                assert_eq!(sorted_coords(tree.points()), sorted_coords(&points));
                tree.check_invariants()?;
            }
        }
        Ok(())
    })
}

#[test]
fn test_load_integer_points_with_duplicates() {
    run_test(|| {
        let points = random_int_points(500, 2, 10, 3);
        let tree = load_tree(2, points.clone())?;
        assert_eq!(tree.len(), 500);
        assert_eq!(sorted_coords(tree.points()), sorted_coords(&points));
        tree.check_invariants()?;
        Ok(())
    })
}

#[test]
fn test_root_box_covers_data() {
    run_test(|| {
        let points = random_points(300, 3, 50.0, 11);
        let tree = load_tree(3, points.clone())?;
        let bbox = tree.bbox();
        for p in &points {
            assert!(bbox.contains_point(p)?);
        }
        Ok(())
    })
}

#[test]
fn test_load_statistics() {
    run_test(|| {
        let tree = load_tree(2, random_points(1000, 2, 100.0, 5))?;
        let stats = tree.stats();
        assert_eq!(stats.dimension, 2);
        assert_eq!(stats.total_points, 1000);
        // 1000 leaves packed into 100, 10 and 1 internal nodes
        assert_eq!(stats.internal_nodes, 111);
        assert_eq!(stats.node_count, 1111);
        assert_eq!(stats.height, 4);
        Ok(())
    })
}

#[test]
fn test_custom_fanout() {
    run_test(|| {
        let mut tree = RTree::builder().dimension(2).max_load(4).min_load(2).build()?;
        tree.load(random_points(257, 2, 10.0, 8))?;
        tree.check_invariants()?;
        assert_eq!(tree.len(), 257);
        // 257 -> 65 -> 17 -> 5 -> 2 -> 1
        assert_eq!(tree.stats().height, 6);
        Ok(())
    })
}

#[test]
fn test_dimension_mismatch_keeps_previous_tree() {
    run_test(|| {
        let mut tree = load_tree(2, random_points(40, 2, 10.0, 1))?;
        let mut bad = random_points(10, 2, 10.0, 2);
        bad.push(Point::new(vec![1.0]));

        assert_eq!(
            tree.load(bad),
            Err(SpatialError::DimensionMismatch {
                expected: 2,
                found: 1,
            })
        );
        assert_eq!(tree.len(), 40);
        tree.check_invariants()?;
        Ok(())
    })
}
