//! Reverse k-nearest-neighbor search and circular range counting.
//!
//! A stored point `p` is a reverse k-nearest neighbor of `q` when `q` would
//! rank among `p`'s k nearest neighbors, `p` itself excluded. Two strategies
//! decide this per point and always agree:
//!
//! - brute force: run a (k+1)-NN query around `p` (the extra slot is `p`
//!   itself) and compare its distance with `|p - q|`;
//! - verify via counting: count the stored points inside the circle of
//!   radius `|p - q|` around `p`, stopping as soon as the count passes `k`.

use crate::circle::{Circle, Overlap};
use crate::coord::Coord;
use crate::point::Point;

use super::knn::SearchQueue;
use super::rtree_constants::TRACE_TARGET;
use super::rtree_impl::{PointIter, RTree};
use super::rtree_types::{Node, NodeId, SpatialError, SpatialResult};

bitflags::bitflags! {
    /// Selects the strategy used by [`RTree::rknn`].
    ///
    /// Exactly one flag must be set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RknnHeuristic: u32 {
        const BRUTE_FORCE = 0b01;
        const VERIFY_RANGE_COUNT = 0b10;
    }
}

impl Default for RknnHeuristic {
    fn default() -> Self {
        RknnHeuristic::BRUTE_FORCE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    BruteForce,
    VerifyRangeCount,
}

impl RknnHeuristic {
    fn strategy(self) -> SpatialResult<Strategy> {
        if self == RknnHeuristic::BRUTE_FORCE {
            Ok(Strategy::BruteForce)
        } else if self == RknnHeuristic::VERIFY_RANGE_COUNT {
            Ok(Strategy::VerifyRangeCount)
        } else {
            Err(SpatialError::UnsupportedHeuristic(self.bits()))
        }
    }
}

impl<T: Coord> RTree<T> {
    /// Lazily yields every stored point that has `query` among its `k`
    /// nearest neighbors, in [`RTree::points`] order.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `k` is 0
    /// - `DimensionMismatch` if `query` does not have the tree's dimension
    /// - `UnsupportedHeuristic` unless exactly one known flag is set
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spatio_rtree::{Point, RTree, RknnHeuristic};
    ///
    /// let mut tree = RTree::new(1).unwrap();
    /// tree.load([0, 1, 10].into_iter().map(|v| Point::new(vec![v]))).unwrap();
    ///
    /// let q = Point::new(vec![9]);
    /// let hits: Vec<_> = tree
    ///     .rknn(&q, 1, RknnHeuristic::VERIFY_RANGE_COUNT)
    ///     .unwrap()
    ///     .map(|p| p[0])
    ///     .collect();
    /// assert_eq!(hits, vec![10]);
    /// ```
    pub fn rknn(
        &self,
        query: &Point<T>,
        k: usize,
        heuristic: RknnHeuristic,
    ) -> SpatialResult<Rknn<'_, T>> {
        if k == 0 {
            return Err(SpatialError::InvalidArgument("k must be at least 1".into()));
        }
        SpatialError::check_dimension(self.dimension(), query.dimension())?;
        let strategy = heuristic.strategy()?;

        // every stored point needs k others besides itself
        let points = if self.len() > k {
            Some(self.points())
        } else {
            log::debug!("rknn with k = {} over {} points yields nothing", k, self.len());
            None
        };

        Ok(Rknn {
            tree: self,
            query: query.clone(),
            k,
            strategy,
            points,
        })
    }

    /// [`RTree::rknn`] with the default (brute force) heuristic.
    pub fn rknn_default(&self, query: &Point<T>, k: usize) -> SpatialResult<Rknn<'_, T>> {
        self.rknn(query, k, RknnHeuristic::default())
    }

    /// Counts the stored points inside `circle` (boundary included), giving
    /// up once `threshold` is reached. The result never exceeds `threshold`.
    ///
    /// Nodes are visited by ascending distance from the center to their
    /// farthest corner, so fully covered subtrees tend to be counted first.
    pub fn count_within(&self, circle: &Circle<T>, threshold: usize) -> SpatialResult<usize> {
        let center = circle.center();
        SpatialError::check_dimension(self.dimension(), center.dimension())?;
        let Some(root) = self.root else {
            return Ok(0);
        };
        if threshold == 0 {
            return Ok(0);
        }

        let trace = self.config.trace_queries();
        let mut count = 0;
        let mut queue = SearchQueue::default();
        queue.push(self.upper_bound(root, center)?, root);

        while let Some(entry) = queue.pop() {
            if count >= threshold {
                break;
            }
            match &self.nodes[entry.node.index()] {
                Node::Leaf { point, .. } => {
                    if circle.overlaps(point)? {
                        count += 1;
                    }
                }
                Node::Internal(node) => {
                    let overlap = circle.classify(node.bbox())?;
                    if trace {
                        log::trace!(
                            target: TRACE_TARGET,
                            "count node {} {:?}",
                            entry.node.index(),
                            overlap
                        );
                    }
                    match overlap {
                        Overlap::Disjoint => {}
                        Overlap::Contains => count += node.size(),
                        Overlap::Intersects => {
                            for &child in self.children(entry.node) {
                                queue.push(self.upper_bound(child, center)?, child);
                            }
                        }
                    }
                }
            }
        }

        Ok(count.min(threshold))
    }

    /// Returns every stored point inside `circle` (boundary included).
    pub fn points_within(&self, circle: &Circle<T>) -> SpatialResult<Vec<&Point<T>>> {
        SpatialError::check_dimension(self.dimension(), circle.center().dimension())?;
        let Some(root) = self.root else {
            return Ok(Vec::new());
        };

        let mut found = Vec::new();
        // (node, already known to lie inside the circle)
        let mut stack = vec![(root, false)];
        while let Some((id, inside)) = stack.pop() {
            match &self.nodes[id.index()] {
                Node::Leaf { point, .. } => {
                    if inside || circle.overlaps(point)? {
                        found.push(point);
                    }
                }
                Node::Internal(node) => {
                    let inside = inside
                        || match circle.classify(node.bbox())? {
                            Overlap::Disjoint => continue,
                            Overlap::Contains => true,
                            Overlap::Intersects => false,
                        };
                    stack.extend(self.children(id).iter().rev().map(|&child| (child, inside)));
                }
            }
        }
        Ok(found)
    }

    /// Exact distance for a leaf, farthest-corner distance for an internal node.
    fn upper_bound(&self, id: NodeId, center: &Point<T>) -> SpatialResult<f64> {
        match &self.nodes[id.index()] {
            Node::Leaf { point, .. } => point.distance(center),
            Node::Internal(node) => node.bbox().max_distance(center),
        }
    }
}

/// Lazy iterator over reverse k-nearest neighbors, see [`RTree::rknn`].
pub struct Rknn<'a, T: Coord> {
    tree: &'a RTree<T>,
    query: Point<T>,
    k: usize,
    strategy: Strategy,
    points: Option<PointIter<'a, T>>,
}

impl<'a, T: Coord> Rknn<'a, T> {
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn query(&self) -> &Point<T> {
        &self.query
    }

    fn qualifies(&self, point: &Point<T>) -> SpatialResult<bool> {
        let to_query = point.distance(&self.query)?;
        match self.strategy {
            Strategy::BruteForce => {
                let to_kth = self.tree.knn_distance(point, self.k + 1)?;
                Ok(to_query < to_kth)
            }
            Strategy::VerifyRangeCount => {
                let circle = Circle::new(point.clone(), to_query)?;
                Ok(self.tree.count_within(&circle, self.k + 1)? <= self.k)
            }
        }
    }
}

impl<'a, T: Coord> Iterator for Rknn<'a, T> {
    type Item = &'a Point<T>;

    fn next(&mut self) -> Option<&'a Point<T>> {
        while let Some(point) = self.points.as_mut()?.next() {
            match self.qualifies(point) {
                Ok(true) => {
                    if self.tree.config.trace_queries() {
                        log::trace!(
                            target: TRACE_TARGET,
                            "rknn {} qualifies for {}",
                            point,
                            self.query
                        );
                    }
                    return Some(point);
                }
                Ok(false) => {}
                Err(err) => log::warn!("rknn skipped {}: {}", point, err),
            }
        }
        None
    }
}
