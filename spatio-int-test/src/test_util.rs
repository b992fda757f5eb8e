//! Shared fixtures and linear-scan oracles for the integration tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatio_rtree::{Coord, Point, RTree, SpatialResult};

/// Runs a test body, failing with the error's debug form if it returns `Err`.
pub fn run_test<T>(test: T)
where
    T: FnOnce() -> SpatialResult<()>,
{
    if let Err(e) = test() {
        panic!("Test failed: {:?}", e);
    }
}

/// The 14-value data set used by the one-dimensional scenarios.
pub const SAMPLE_VALUES: [i32; 14] = [27, 5, 3, 37, 6, 89, 2, 9, 67, 87, 1, 79, 72, 17];

pub fn points_1d(values: &[i32]) -> Vec<Point<i32>> {
    values.iter().map(|&v| Point::new(vec![v])).collect()
}

/// Uniformly distributed points in `[0, extent)^dimension`, reproducible by `seed`.
pub fn random_points(count: usize, dimension: usize, extent: f64, seed: u64) -> Vec<Point<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let coords = (0..dimension).map(|_| rng.random_range(0.0..extent)).collect();
            Point::new(coords)
        })
        .collect()
}

/// Integer points in `[0, max)^dimension`; small ranges produce duplicates.
pub fn random_int_points(count: usize, dimension: usize, max: i32, seed: u64) -> Vec<Point<i32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let coords = (0..dimension).map(|_| rng.random_range(0..max)).collect();
            Point::new(coords)
        })
        .collect()
}

pub fn load_tree<T: Coord>(dimension: usize, points: Vec<Point<T>>) -> SpatialResult<RTree<T>> {
    let mut tree = RTree::new(dimension)?;
    tree.load(points)?;
    Ok(tree)
}

/// Coordinates of `points` in a canonical order, for set comparisons.
pub fn sorted_coords<'a, T, I>(points: I) -> Vec<Vec<f64>>
where
    T: Coord,
    I: IntoIterator<Item = &'a Point<T>>,
{
    let mut coords: Vec<Vec<f64>> = points
        .into_iter()
        .map(|p| p.coords().iter().map(|c| c.as_f64()).collect())
        .collect();
    coords.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    coords
}

/// Distance from `query` to its k-th nearest point, by full scan.
pub fn linear_knn_distance<T: Coord>(
    points: &[Point<T>],
    query: &Point<T>,
    k: usize,
) -> Option<f64> {
    let mut distances: Vec<f64> = points.iter().map(|p| p.distance(query).unwrap()).collect();
    distances.sort_by(f64::total_cmp);
    k.checked_sub(1).and_then(|i| distances.get(i).copied())
}

/// Points having `query` among their `k` nearest other points, by full scan.
///
/// A point with fewer than `k` other points never qualifies.
pub fn linear_rknn<T: Coord>(points: &[Point<T>], query: &Point<T>, k: usize) -> Vec<Point<T>> {
    points
        .iter()
        .enumerate()
        .filter(|&(i, p)| {
            let mut others: Vec<f64> = points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, o)| p.distance(o).unwrap())
                .collect();
            if others.len() < k {
                return false;
            }
            others.sort_by(f64::total_cmp);
            p.distance(query).unwrap() < others[k - 1]
        })
        .map(|(_, p)| p.clone())
        .collect()
}

/// Number of points within `radius` of `center` (boundary included), by full scan.
pub fn linear_count<T: Coord>(points: &[Point<T>], center: &Point<T>, radius: f64) -> usize {
    points
        .iter()
        .filter(|p| center.distance(p).unwrap() <= radius)
        .count()
}
