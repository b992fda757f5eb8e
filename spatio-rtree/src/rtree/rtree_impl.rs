//! RTree implementation.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::bounding_box::BoundingBox;
use crate::coord::Coord;
use crate::point::Point;

use super::bulk_load::{bulk_load, PackedTree};
use super::page_tracker::PageTracker;
use super::rtree_config::{RTreeBuilder, RTreeConfig};
use super::rtree_types::{Node, NodeId, RTreeStats, SpatialError, SpatialResult};

/// A static, bulk-loaded R-Tree over points of type `T`.
///
/// The tree is built in one pass by [`RTree::load`] and is read-only
/// afterwards; every query takes `&self`. The only state touched by queries
/// is the page-access record reported by [`RTree::io`].
#[derive(Debug)]
pub struct RTree<T: Coord> {
    pub(super) config: RTreeConfig,
    pub(super) nodes: Vec<Node<T>>,
    pub(super) root: Option<NodeId>,
    pub(super) height: u32,
    pub(super) tracker: PageTracker,
}

impl<T: Coord> RTree<T> {
    /// Creates an empty tree of the given dimension with default parameters.
    pub fn new(dimension: usize) -> SpatialResult<Self> {
        Self::with_config(RTreeConfig::new(dimension))
    }

    /// Creates an empty tree from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn with_config(config: RTreeConfig) -> SpatialResult<Self> {
        config.validate()?;
        let tracker = PageTracker::new(config.track_page_access());
        Ok(Self {
            config,
            nodes: Vec::new(),
            root: None,
            height: 0,
            tracker,
        })
    }

    pub fn builder() -> RTreeBuilder<T> {
        RTreeBuilder::new()
    }

    pub fn config(&self) -> &RTreeConfig {
        &self.config
    }

    pub fn dimension(&self) -> usize {
        self.config.dimension()
    }

    /// Number of points stored in the tree.
    pub fn len(&self) -> usize {
        self.root.map_or(0, |root| self.nodes[root.index()].size())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Looks up a node of the arena. Does not count as a page access.
    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    /// Bounding box of the whole data set (empty for an empty tree).
    pub fn bbox(&self) -> BoundingBox<T> {
        self.root
            .map(|root| self.nodes[root.index()].bbox().clone())
            .unwrap_or_default()
    }

    /// Replaces the contents of the tree with `points`, bulk loaded with STR.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if any point does not have the tree's
    /// dimension. The previous contents are kept in that case.
    pub fn load<I>(&mut self, points: I) -> SpatialResult<()>
    where
        I: IntoIterator<Item = Point<T>>,
    {
        let PackedTree {
            nodes,
            root,
            height,
        } = bulk_load(points.into_iter().collect(), &self.config)?;

        self.nodes = nodes;
        self.root = root;
        self.height = height;
        self.tracker.clear();
        Ok(())
    }

    /// Iterates over every stored point in breadth-first order.
    ///
    /// Each call starts a fresh traversal. Reading internal nodes counts
    /// toward [`RTree::io`].
    pub fn points(&self) -> PointIter<'_, T> {
        PointIter {
            tree: self,
            queue: self.root.into_iter().collect(),
        }
    }

    /// Reads the child list of an internal node and records the page access.
    ///
    /// Leaves have no children.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id.index()) {
            Some(Node::Internal(node)) => {
                self.tracker.touch(id);
                node.children()
            }
            _ => &[],
        }
    }

    /// Number of internal nodes, root excluded, read since the last reset.
    ///
    /// With `reset` the record is cleared after counting.
    pub fn io(&self, reset: bool) -> usize {
        self.tracker.count(self.root, reset)
    }

    pub fn stats(&self) -> RTreeStats {
        let internal_nodes = self.nodes.iter().filter(|node| !node.is_leaf()).count();
        RTreeStats {
            dimension: self.dimension(),
            total_points: self.len(),
            node_count: self.nodes.len(),
            internal_nodes,
            height: self.height,
            pages_accessed: self.tracker.count(self.root, false),
        }
    }

    /// Walks the whole tree and checks its structural invariants: every
    /// internal node has between 1 and `max_load` children, its box is the
    /// tight union of its children's boxes, its size is the sum of theirs,
    /// and all leaves sit on the same level.
    ///
    /// Does not count as page accesses.
    pub fn check_invariants(&self) -> SpatialResult<()> {
        let Some(root) = self.root else {
            return Ok(());
        };

        let mut stack = vec![root];
        let mut visited = 0;
        while let Some(id) = stack.pop() {
            visited += 1;
            let Node::Internal(node) = &self.nodes[id.index()] else {
                continue;
            };

            if node.is_empty() || node.len() > self.config.max_load() {
                return Err(SpatialError::InvariantViolation(format!(
                    "node {} has {} children",
                    id.index(),
                    node.len()
                )));
            }

            let mut bbox = BoundingBox::empty();
            let mut size = 0;
            for &child_id in node.children() {
                let child = &self.nodes[child_id.index()];
                if child.level() + 1 != node.level() {
                    return Err(SpatialError::InvariantViolation(format!(
                        "node {} at level {} has a child at level {}",
                        id.index(),
                        node.level(),
                        child.level()
                    )));
                }
                bbox.expand_box(child.bbox())?;
                size += child.size();
                stack.push(child_id);
            }

            if &bbox != node.bbox() {
                return Err(SpatialError::InvariantViolation(format!(
                    "node {} box {} is not the union {} of its children",
                    id.index(),
                    node.bbox(),
                    bbox
                )));
            }
            if size != node.size() {
                return Err(SpatialError::InvariantViolation(format!(
                    "node {} size {} but children hold {}",
                    id.index(),
                    node.size(),
                    size
                )));
            }
        }

        if visited != self.nodes.len() {
            return Err(SpatialError::InvariantViolation(format!(
                "{} of {} nodes reachable from the root",
                visited,
                self.nodes.len()
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Point Iterator
// ============================================================================

/// Breadth-first iterator over the points of an [`RTree`], see [`RTree::points`].
pub struct PointIter<'a, T: Coord> {
    tree: &'a RTree<T>,
    queue: VecDeque<NodeId>,
}

impl<'a, T: Coord> Iterator for PointIter<'a, T> {
    type Item = &'a Point<T>;

    fn next(&mut self) -> Option<&'a Point<T>> {
        while let Some(id) = self.queue.pop_front() {
            match &self.tree.nodes[id.index()] {
                Node::Leaf { point, .. } => return Some(point),
                Node::Internal(_) => self.queue.extend(self.tree.children(id)),
            }
        }
        None
    }
}

impl<T: Coord> FusedIterator for PointIter<'_, T> {}
