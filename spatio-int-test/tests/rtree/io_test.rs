//! Page-access accounting.

use spatio_int_test::test_util::{points_1d, random_points, run_test};
use spatio_rtree::{Circle, Point, RTree, RknnHeuristic};

fn line_tree(count: i32) -> RTree<i32> {
    let mut tree = RTree::new(1).unwrap();
    tree.load(points_1d(&(0..count).collect::<Vec<_>>())).unwrap();
    tree
}

#[test]
fn test_full_traversal_reads_every_internal_node() {
    let tree = line_tree(1000);
    assert_eq!(tree.io(false), 0);
    assert_eq!(tree.points().count(), 1000);
    // 100 + 10 internal nodes below the root
    assert_eq!(tree.io(true), 110);
    assert_eq!(tree.io(false), 0);
}

#[test]
fn test_knn_reads_few_pages() {
    run_test(|| {
        let tree = line_tree(1000);
        tree.knn(&Point::new(vec![500]), 5)?;
        let pages = tree.io(true);
        assert!(pages > 0);
        assert!(pages < 10, "knn read {} pages", pages);
        Ok(())
    })
}

#[test]
fn test_accesses_accumulate_until_reset() {
    run_test(|| {
        let tree = line_tree(1000);
        tree.knn(&Point::new(vec![5]), 1)?;
        let first = tree.io(false);
        tree.knn(&Point::new(vec![995]), 1)?;
        let both = tree.io(false);
        assert!(both > first);

        // repeating a query reads no new pages
        tree.knn(&Point::new(vec![995]), 1)?;
        assert_eq!(tree.io(true), both);
        Ok(())
    })
}

#[test]
fn test_counting_reads_pages() {
    run_test(|| {
        let tree = line_tree(1000);
        let circle = Circle::new(Point::new(vec![500]), 3.0)?;
        assert_eq!(tree.count_within(&circle, 100)?, 7);
        assert!(tree.io(true) > 0);
        Ok(())
    })
}

#[test]
fn test_tracking_does_not_change_results() {
    run_test(|| {
        let points = random_points(500, 2, 100.0, 31);
        let mut tracked = RTree::new(2)?;
        tracked.load(points.clone())?;
        let mut untracked = RTree::builder().dimension(2).track_page_access(false).build()?;
        untracked.load(points)?;

        let q = Point::new(vec![30.0, 70.0]);
        for k in [1, 4, 16] {
            assert_eq!(tracked.knn(&q, k)?, untracked.knn(&q, k)?);
            let a: Vec<_> = tracked.rknn(&q, k, RknnHeuristic::VERIFY_RANGE_COUNT)?.collect();
            let b: Vec<_> = untracked.rknn(&q, k, RknnHeuristic::VERIFY_RANGE_COUNT)?.collect();
            assert_eq!(a, b);
        }
        assert!(tracked.io(false) > 0);
        assert_eq!(untracked.io(false), 0);
        Ok(())
    })
}

#[test]
fn test_concurrent_queries() {
    let tree = line_tree(1000);
    let expected: Vec<Point<i32>> = (0..8)
        .map(|i| tree.knn(&Point::new(vec![i * 100]), 3).unwrap())
        .collect();
    tree.io(true);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let tree = &tree;
                scope.spawn(move || tree.knn(&Point::new(vec![i * 100]), 3).unwrap())
            })
            .collect();
        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
    assert!(tree.io(false) > 0);
}
