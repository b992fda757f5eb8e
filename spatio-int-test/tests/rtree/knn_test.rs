//! kNN results agree with a full scan.

use spatio_int_test::test_util::{
    linear_knn_distance, load_tree, random_int_points, random_points, run_test,
};
use spatio_rtree::{Point, SpatialError};

#[test]
fn test_knn_matches_linear_scan() {
    run_test(|| {
        for dimension in 1..=3 {
            let points = random_points(800, dimension, 100.0, 17 + dimension as u64);
            let tree = load_tree(dimension, points.clone())?;
            let queries = random_points(20, dimension, 120.0, 99);

            for q in &queries {
                for k in [1, 2, 5, 10, 37, 800] {
                    let found = tree.knn(q, k)?;
                    let expected = linear_knn_distance(&points, q, k).unwrap();
                    assert_eq!(found.distance(q)?, expected, "q = {}, k = {}", q, k);
                }
            }
        }
        Ok(())
    })
}

#[test]
fn test_knn_list_matches_linear_scan() {
    run_test(|| {
        let points = random_points(500, 2, 100.0, 4);
        let tree = load_tree(2, points.clone())?;
        let q = Point::new(vec![50.0, 50.0]);

        let list = tree.knn_list(&q, 25)?;
        assert_eq!(list.len(), 25);
        for (i, neighbor) in list.iter().enumerate() {
            assert_eq!(neighbor.distance, linear_knn_distance(&points, &q, i + 1).unwrap());
            assert_eq!(neighbor.point.distance(&q)?, neighbor.distance);
        }
        Ok(())
    })
}

#[test]
fn test_knn_integer_points() {
    run_test(|| {
        let points = random_int_points(600, 2, 40, 21);
        let tree = load_tree(2, points.clone())?;
        for q in random_int_points(10, 2, 40, 22) {
            for k in [1, 3, 8, 50] {
                let found = tree.knn(&q, k)?;
                assert_eq!(found.distance(&q)?, linear_knn_distance(&points, &q, k).unwrap());
            }
        }
        Ok(())
    })
}

#[test]
fn test_knn_insufficient_data() {
    run_test(|| {
        let tree = load_tree(2, random_points(7, 2, 10.0, 1))?;
        let q = Point::new(vec![0.0, 0.0]);
        assert!(tree.knn(&q, 7).is_ok());
        assert_eq!(
            tree.knn(&q, 8),
            Err(SpatialError::InsufficientData {
                requested: 8,
                available: 7,
            })
        );
        Ok(())
    })
}
