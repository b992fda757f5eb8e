//! SpatialDatabase trait definition.

use crate::coord::Coord;
use crate::point::Point;
use crate::rtree::{RTree, RknnHeuristic, SpatialResult};

/// A point database answering nearest-neighbor and reverse
/// nearest-neighbor queries.
///
/// This trait is object safe; iterators are boxed.
pub trait SpatialDatabase<T: Coord>: Send + Sync {
    /// Replaces the stored points. On failure the previous contents are kept.
    fn load(&mut self, points: Vec<Point<T>>) -> SpatialResult<()>;

    /// Iterates over every stored point.
    fn points(&self) -> Box<dyn Iterator<Item = &Point<T>> + '_>;

    /// Returns the k-th nearest stored point to `query`.
    fn knn(&self, query: &Point<T>, k: usize) -> SpatialResult<Point<T>>;

    /// Iterates over the stored points that have `query` among their `k`
    /// nearest neighbors.
    fn rknn(
        &self,
        query: &Point<T>,
        k: usize,
        heuristic: RknnHeuristic,
    ) -> SpatialResult<Box<dyn Iterator<Item = &Point<T>> + '_>>;

    /// [`SpatialDatabase::rknn`] with the default heuristic.
    fn rknn_default(
        &self,
        query: &Point<T>,
        k: usize,
    ) -> SpatialResult<Box<dyn Iterator<Item = &Point<T>> + '_>> {
        self.rknn(query, k, RknnHeuristic::default())
    }

    /// Number of simulated page accesses since the last reset.
    fn io(&self, reset: bool) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn dimension(&self) -> usize;
}

impl<T: Coord> SpatialDatabase<T> for RTree<T> {
    fn load(&mut self, points: Vec<Point<T>>) -> SpatialResult<()> {
        RTree::load(self, points)
    }

    fn points(&self) -> Box<dyn Iterator<Item = &Point<T>> + '_> {
        Box::new(RTree::points(self))
    }

    fn knn(&self, query: &Point<T>, k: usize) -> SpatialResult<Point<T>> {
        RTree::knn(self, query, k)
    }

    fn rknn(
        &self,
        query: &Point<T>,
        k: usize,
        heuristic: RknnHeuristic,
    ) -> SpatialResult<Box<dyn Iterator<Item = &Point<T>> + '_>> {
        Ok(Box::new(RTree::rknn(self, query, k, heuristic)?))
    }

    fn io(&self, reset: bool) -> usize {
        RTree::io(self, reset)
    }

    fn len(&self) -> usize {
        RTree::len(self)
    }

    fn dimension(&self) -> usize {
        RTree::dimension(self)
    }
}
