//! Counting and range queries over circles agree with a full scan.

use spatio_int_test::test_util::{
    linear_count, load_tree, random_int_points, random_points, run_test, sorted_coords,
};
use spatio_rtree::{Circle, Point};

#[test]
fn test_count_within_is_capped_exact_count() {
    run_test(|| {
        let points = random_points(1000, 2, 100.0, 13);
        let tree = load_tree(2, points.clone())?;

        for center in &random_points(10, 2, 100.0, 14) {
            for radius in [0.0, 1.0, 5.0, 20.0, 200.0] {
                let circle = Circle::new(center.clone(), radius)?;
                let exact = linear_count(&points, center, radius);
                for threshold in [1, 5, 50, 1000, usize::MAX] {
                    assert_eq!(
                        tree.count_within(&circle, threshold)?,
                        exact.min(threshold),
                        "center = {}, radius = {}, threshold = {}",
                        center,
                        radius,
                        threshold
                    );
                }
            }
        }
        Ok(())
    })
}

#[test]
fn test_count_within_boundary_is_inclusive() {
    run_test(|| {
        let points = random_int_points(400, 2, 20, 15);
        let tree = load_tree(2, points.clone())?;
        let center = Point::new(vec![10, 10]);
        for radius in [1.0, 2.0, 5.0, 13.0_f64.sqrt()] {
            let circle = Circle::new(center.clone(), radius)?;
            assert_eq!(
                tree.count_within(&circle, usize::MAX)?,
                linear_count(&points, &center, radius)
            );
        }
        Ok(())
    })
}

#[test]
fn test_points_within_matches_linear_scan() {
    run_test(|| {
        let points = random_points(700, 3, 50.0, 16);
        let tree = load_tree(3, points.clone())?;
        let center = Point::new(vec![25.0, 25.0, 25.0]);
        let circle = Circle::new(center.clone(), 12.5)?;

        let expected: Vec<Point<f64>> = points
            .iter()
            .filter(|p| center.distance(p).unwrap() <= 12.5)
            .cloned()
            .collect();
        assert_eq!(sorted_coords(tree.points_within(&circle)?), sorted_coords(&expected));
        Ok(())
    })
}
