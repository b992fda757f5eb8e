//! Behavior of a tree loaded with no points, and argument validation.

use spatio_int_test::test_util::{load_tree, run_test};
use spatio_rtree::{Circle, Point, RTree, RknnHeuristic, SpatialError};

#[test]
fn test_empty_load() {
    run_test(|| {
        let tree = load_tree::<f64>(2, Vec::new())?;
        let q = Point::new(vec![0.0, 0.0]);

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.points().count(), 0);
        assert_eq!(
            tree.knn(&q, 1),
            Err(SpatialError::InsufficientData {
                requested: 1,
                available: 0,
            })
        );
        assert_eq!(tree.rknn(&q, 1, RknnHeuristic::BRUTE_FORCE)?.count(), 0);
        assert_eq!(tree.rknn(&q, 1, RknnHeuristic::VERIFY_RANGE_COUNT)?.count(), 0);
        assert_eq!(tree.count_within(&Circle::new(q.clone(), 10.0)?, 5)?, 0);
        assert_eq!(tree.io(true), 0);
        tree.check_invariants()?;
        Ok(())
    })
}

#[test]
fn test_single_point() {
    run_test(|| {
        let p = Point::new(vec![3.0, 4.0]);
        let tree = load_tree(2, vec![p.clone()])?;
        let q = Point::new(vec![0.0, 0.0]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.knn(&q, 1)?, p);
        assert!(tree.knn(&q, 2).is_err());
        // no other point exists to compare against
        assert_eq!(tree.rknn(&q, 1, RknnHeuristic::BRUTE_FORCE)?.count(), 0);
        assert_eq!(tree.rknn(&q, 1, RknnHeuristic::VERIFY_RANGE_COUNT)?.count(), 0);
        assert_eq!(tree.io(false), 0);
        Ok(())
    })
}

#[test]
fn test_argument_validation() {
    run_test(|| {
        let tree = load_tree(2, vec![Point::new(vec![1.0, 1.0]), Point::new(vec![2.0, 2.0])])?;
        let q = Point::new(vec![0.0, 0.0]);
        let wrong = Point::new(vec![0.0, 0.0, 0.0]);

        assert!(matches!(tree.knn(&q, 0), Err(SpatialError::InvalidArgument(_))));
        assert!(matches!(
            tree.rknn(&q, 0, RknnHeuristic::BRUTE_FORCE),
            Err(SpatialError::InvalidArgument(_))
        ));
        assert_eq!(
            tree.knn(&wrong, 1),
            Err(SpatialError::DimensionMismatch {
                expected: 2,
                found: 3,
            })
        );
        assert!(matches!(
            tree.count_within(&Circle::new(wrong.clone(), 1.0)?, 1),
            Err(SpatialError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            Circle::new(q.clone(), -1.0),
            Err(SpatialError::InvalidRadius(_))
        ));
        Ok(())
    })
}

#[test]
fn test_invalid_configuration() {
    assert!(matches!(RTree::<f64>::new(0), Err(SpatialError::InvalidConfig(_))));
    assert!(matches!(
        RTree::<f64>::builder().dimension(2).max_load(1).build(),
        Err(SpatialError::InvalidConfig(_))
    ));
}
