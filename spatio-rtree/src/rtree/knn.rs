//! k-nearest-neighbor search.
//!
//! Best-first traversal: a min-heap of nodes keyed by their distance lower
//! bound, and a bounded [`TopK`] collector holding the k closest points seen.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::coord::Coord;
use crate::point::Point;

use super::rtree_constants::TRACE_TARGET;
use super::rtree_impl::RTree;
use super::rtree_types::{Node, NodeId, SpatialError, SpatialResult};

// ============================================================================
// Top-K Collector
// ============================================================================

/// A bounded collector retaining the `k` best values offered to it.
///
/// In keep-smallest mode the `k` lowest keys are retained and the k-th
/// value is the largest of them; keep-largest mode is the mirror image.
/// Among equal keys the value offered first ranks better, so a late
/// arrival never displaces an equally ranked one.
#[derive(Debug, Clone)]
pub struct TopK<V> {
    k: usize,
    keep_smallest: bool,
    heap: BinaryHeap<Ranked<V>>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct Ranked<V> {
    key: f64,
    // `key` for keep-smallest, `-key` for keep-largest; lower is better
    rank: f64,
    seq: u64,
    value: V,
}

impl<V> PartialEq for Ranked<V> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<V> Eq for Ranked<V> {}

impl<V> PartialOrd for Ranked<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V> Ord for Ranked<V> {
    // Max-heap on "worse": the heap top is the entry to evict next.
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .total_cmp(&other.rank)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl<V> TopK<V> {
    /// Collector keeping the `k` smallest keys.
    pub fn smallest(k: usize) -> Self {
        Self::new(k, true)
    }

    /// Collector keeping the `k` largest keys.
    pub fn largest(k: usize) -> Self {
        Self::new(k, false)
    }

    fn new(k: usize, keep_smallest: bool) -> Self {
        Self {
            k,
            keep_smallest,
            heap: BinaryHeap::with_capacity(k + 1),
            next_seq: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Offers a value; returns whether it was retained.
    pub fn offer(&mut self, key: f64, value: V) -> bool {
        let rank = if self.keep_smallest { key } else { -key };
        let entry = Ranked {
            key,
            rank,
            seq: self.next_seq,
            value,
        };
        self.next_seq += 1;

        if !self.is_full() {
            self.heap.push(entry);
            return true;
        }
        match self.heap.peek() {
            Some(worst) if entry < *worst => {
                self.heap.pop();
                self.heap.push(entry);
                true
            }
            _ => false,
        }
    }

    /// The worst retained entry: the current k-th once the collector is full.
    pub fn worst(&self) -> Option<(f64, &V)> {
        self.heap.peek().map(|entry| (entry.key, &entry.value))
    }

    /// The k-th best entry.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` while fewer than `k` values are retained.
    pub fn top_k(&self) -> SpatialResult<(f64, &V)> {
        let insufficient = SpatialError::InsufficientData {
            requested: self.k,
            available: self.heap.len(),
        };
        if !self.is_full() {
            return Err(insufficient);
        }
        self.worst().ok_or(insufficient)
    }

    /// Retained entries, best first.
    pub fn into_sorted_vec(self) -> Vec<(f64, V)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect()
    }
}

// ============================================================================
// Search Queue
// ============================================================================

/// Node waiting in a best-first search queue.
///
/// Ordered as a min-heap on `key`, discovery order breaking ties.
#[derive(Debug, Clone, Copy)]
pub(super) struct QueueEntry {
    pub(super) key: f64,
    pub(super) seq: u64,
    pub(super) node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed for min-heap behavior
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of nodes with a running discovery counter.
#[derive(Debug, Default)]
pub(super) struct SearchQueue {
    heap: BinaryHeap<QueueEntry>,
    next_seq: u64,
}

impl SearchQueue {
    pub(super) fn push(&mut self, key: f64, node: NodeId) {
        self.heap.push(QueueEntry {
            key,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }

    pub(super) fn pop(&mut self) -> Option<QueueEntry> {
        self.heap.pop()
    }
}

// ============================================================================
// kNN Queries
// ============================================================================

/// A point returned by a nearest-neighbor query with its distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a, T: Coord> {
    pub distance: f64,
    pub point: &'a Point<T>,
}

impl<T: Coord> RTree<T> {
    /// Returns the k-th nearest stored point to `query`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `k` is 0
    /// - `DimensionMismatch` if `query` does not have the tree's dimension
    /// - `InsufficientData` if the tree holds fewer than `k` points
    pub fn knn(&self, query: &Point<T>, k: usize) -> SpatialResult<Point<T>> {
        let found = self.nearest(query, k)?;
        let (_, point) = found.top_k()?;
        Ok(Point::clone(point))
    }

    /// Returns the `k` nearest stored points to `query`, nearest first.
    ///
    /// Fails under the same conditions as [`RTree::knn`].
    pub fn knn_list(&self, query: &Point<T>, k: usize) -> SpatialResult<Vec<Neighbor<'_, T>>> {
        let found = self.nearest(query, k)?;
        Ok(found
            .into_sorted_vec()
            .into_iter()
            .map(|(distance, point)| Neighbor { distance, point })
            .collect())
    }

    /// Distance from `query` to its k-th nearest stored point.
    pub(crate) fn knn_distance(&self, query: &Point<T>, k: usize) -> SpatialResult<f64> {
        let found = self.nearest(query, k)?;
        let (distance, _) = found.top_k()?;
        Ok(distance)
    }

    fn nearest(&self, query: &Point<T>, k: usize) -> SpatialResult<TopK<&Point<T>>> {
        if k == 0 {
            return Err(SpatialError::InvalidArgument("k must be at least 1".into()));
        }
        SpatialError::check_dimension(self.dimension(), query.dimension())?;

        let available = self.len();
        let insufficient = SpatialError::InsufficientData {
            requested: k,
            available,
        };
        if available < k {
            return Err(insufficient);
        }
        let Some(root) = self.root else {
            return Err(insufficient);
        };

        let trace = self.config.trace_queries();
        let mut found = TopK::smallest(k);
        let mut queue = SearchQueue::default();
        queue.push(self.lower_bound(root, query)?, root);

        while let Some(entry) = queue.pop() {
            // nothing left in the queue can beat the current k-th
            if found.is_full() && found.worst().is_some_and(|(kth, _)| entry.key > kth) {
                if trace {
                    log::trace!(
                        target: TRACE_TARGET,
                        "knn cut-off at bound {} (k-th distance reached)",
                        entry.key
                    );
                }
                break;
            }

            match &self.nodes[entry.node.index()] {
                Node::Leaf { point, .. } => {
                    let kept = found.offer(entry.key, point);
                    if trace {
                        log::trace!(
                            target: TRACE_TARGET,
                            "knn leaf {} at {} kept={}",
                            point,
                            entry.key,
                            kept
                        );
                    }
                }
                Node::Internal(_) => {
                    if trace {
                        log::trace!(
                            target: TRACE_TARGET,
                            "knn expand node {} bound {}",
                            entry.node.index(),
                            entry.key
                        );
                    }
                    for &child in self.children(entry.node) {
                        queue.push(self.lower_bound(child, query)?, child);
                    }
                }
            }
        }

        Ok(found)
    }

    /// Exact distance for a leaf, box lower bound for an internal node.
    fn lower_bound(&self, id: NodeId, query: &Point<T>) -> SpatialResult<f64> {
        match &self.nodes[id.index()] {
            Node::Leaf { point, .. } => point.distance(query),
            Node::Internal(node) => node.bbox().min_distance(query),
        }
    }
}
