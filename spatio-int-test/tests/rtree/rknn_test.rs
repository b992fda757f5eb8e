//! Both RkNN strategies return exactly the full-scan answer.

use spatio_int_test::test_util::{
    linear_rknn, load_tree, points_1d, random_int_points, random_points, run_test, sorted_coords,
};
use spatio_rtree::{Point, RknnHeuristic, SpatialDatabase, SpatialError};

const STRATEGIES: [RknnHeuristic; 2] = [
    RknnHeuristic::BRUTE_FORCE,
    RknnHeuristic::VERIFY_RANGE_COUNT,
];

#[test]
fn test_rknn_matches_linear_scan() {
    run_test(|| {
        for dimension in 1..=3 {
            let points = random_points(300, dimension, 100.0, 40 + dimension as u64);
            let tree = load_tree(dimension, points.clone())?;

            for q in &random_points(5, dimension, 100.0, 7) {
                for k in [1, 2, 4, 8] {
                    let expected = linear_rknn(&points, q, k);
                    for heuristic in STRATEGIES {
                        let found: Vec<_> = tree.rknn(q, k, heuristic)?.collect();
                        assert_eq!(
                            sorted_coords(found),
                            sorted_coords(&expected),
                            "q = {}, k = {}, heuristic = {:?}",
                            q,
                            k,
                            heuristic
                        );
                    }
                }
            }
        }
        Ok(())
    })
}

#[test]
fn test_rknn_integer_points_with_ties() {
    run_test(|| {
        let points = random_int_points(200, 2, 15, 9);
        let tree = load_tree(2, points.clone())?;
        for q in &random_int_points(5, 2, 15, 10) {
            for k in [1, 3, 6] {
                let expected = sorted_coords(&linear_rknn(&points, q, k));
                for heuristic in STRATEGIES {
                    let found: Vec<_> = tree.rknn(q, k, heuristic)?.collect();
                    assert_eq!(sorted_coords(found), expected, "q = {}, k = {}", q, k);
                }
            }
        }
        Ok(())
    })
}

#[test]
fn test_rknn_yields_in_point_order() {
    run_test(|| {
        let tree = load_tree(2, random_points(200, 2, 10.0, 12))?;
        let q = Point::new(vec![5.0, 5.0]);
        let order: Vec<&Point<f64>> = tree.points().collect();

        let found: Vec<_> = tree.rknn(&q, 3, RknnHeuristic::VERIFY_RANGE_COUNT)?.collect();
        let positions: Vec<usize> = found
            .iter()
            .map(|p| order.iter().position(|o| std::ptr::eq(*o, *p)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        Ok(())
    })
}

#[test]
fn test_rknn_with_too_few_points() {
    run_test(|| {
        let points = points_1d(&[1, 5, 9]);
        let tree = load_tree(1, points.clone())?;
        let q = Point::new(vec![4]);
        for heuristic in STRATEGIES {
            // every point has only two others
            assert_eq!(tree.rknn(&q, 3, heuristic)?.count(), 0);
            assert_eq!(tree.rknn(&q, 2, heuristic)?.count(), 3);
        }
        assert_eq!(linear_rknn(&points, &q, 2).len(), 3);
        Ok(())
    })
}

#[test]
fn test_rknn_unsupported_heuristics() {
    run_test(|| {
        let tree = load_tree(1, points_1d(&[1, 5, 9]))?;
        let q = Point::new(vec![4]);
        for heuristic in [
            RknnHeuristic::empty(),
            RknnHeuristic::all(),
            RknnHeuristic::from_bits_retain(0b1000),
        ] {
            assert!(matches!(
                tree.rknn(&q, 1, heuristic),
                Err(SpatialError::UnsupportedHeuristic(bits)) if bits == heuristic.bits()
            ));
        }
        Ok(())
    })
}

#[test]
fn test_rknn_through_database_trait() {
    run_test(|| {
        let points = random_points(100, 2, 10.0, 77);
        let mut db: Box<dyn SpatialDatabase<f64>> = Box::new(load_tree::<f64>(2, Vec::new())?);
        db.load(points.clone())?;

        let q = Point::new(vec![2.0, 8.0]);
        let found: Vec<_> = db.rknn_default(&q, 2)?.collect();
        assert_eq!(sorted_coords(found), sorted_coords(&linear_rknn(&points, &q, 2)));
        Ok(())
    })
}
