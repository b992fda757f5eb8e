//! Core types and data structures for the bulk-loaded R-Tree.
//!
//! This module defines the fundamental types used throughout the R-Tree:
//! - Error types and result types
//! - Node types (Leaf and Internal) stored in the node arena
//! - Statistics structures

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::bounding_box::BoundingBox;
use crate::coord::Coord;
use crate::point::Point;

use super::rtree_constants::MAX_LOAD;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur in spatial indexing operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialError {
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Coordinate {index} out of range for dimension {dimension}")]
    CoordinateOutOfRange { index: usize, dimension: usize },

    #[error("Invalid bounding box: {0}")]
    InvalidBox(String),

    #[error("Bounding box is empty")]
    EmptyBox,

    #[error("Invalid radius: {0}")]
    InvalidRadius(f64),

    /// An entry was added to a full internal node. The bulk loader checks
    /// fullness before every add, so this signals a logic defect.
    #[error("Node is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("Insufficient data: requested {requested}, available {available}")]
    InsufficientData { requested: usize, available: usize },

    #[error("Unsupported RkNN heuristic: {0:#b}")]
    UnsupportedHeuristic(u32),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Tree invariant violated: {0}")]
    InvariantViolation(String),
}

impl SpatialError {
    /// Checks the two dimensions agree.
    pub(crate) fn check_dimension(expected: usize, found: usize) -> SpatialResult<()> {
        if expected == found {
            Ok(())
        } else {
            Err(SpatialError::DimensionMismatch { expected, found })
        }
    }
}

/// Result type for spatial operations
pub type SpatialResult<T> = Result<T, SpatialError>;

// ============================================================================
// Node Types
// ============================================================================

/// Index of a node inside the tree's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in the arena.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Child list of an internal node. Inline storage covers the default fanout.
pub type Children = SmallVec<[NodeId; MAX_LOAD]>;

/// An internal node under construction or stored in the arena.
#[derive(Debug, Clone)]
pub struct InternalNode<T: Coord> {
    children: Children,
    bbox: BoundingBox<T>,
    size: usize,
    level: u32,
    capacity: usize,
}

impl<T: Coord> InternalNode<T> {
    /// Creates an empty internal node holding at most `capacity` children,
    /// `level` levels above the leaves.
    pub fn new(capacity: usize, level: u32) -> Self {
        Self {
            children: Children::new(),
            bbox: BoundingBox::empty(),
            size: 0,
            level,
            capacity,
        }
    }

    /// Appends a child and folds its box and size into this node.
    ///
    /// Returns `false` once the node is full, telling the caller to start a
    /// new sibling.
    pub fn add_entry(
        &mut self,
        child: NodeId,
        child_bbox: &BoundingBox<T>,
        child_size: usize,
    ) -> SpatialResult<bool> {
        if self.children.len() >= self.capacity {
            return Err(SpatialError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        if self.children.is_empty() {
            self.bbox = child_bbox.clone();
        } else {
            self.bbox.expand_box(child_bbox)?;
        }

        self.children.push(child);
        self.size += child_size;
        Ok(self.children.len() < self.capacity)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn bbox(&self) -> &BoundingBox<T> {
        &self.bbox
    }

    /// Number of points in this subtree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Height above the leaf level (parents of leaves are level 1).
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.children.len() >= self.capacity
    }
}

/// Node types in the R-Tree
#[derive(Debug, Clone)]
pub enum Node<T: Coord> {
    /// Leaf wrapping exactly one point; its box is the degenerate box of the point.
    Leaf {
        point: Point<T>,
        bbox: BoundingBox<T>,
    },
    /// Internal node with up to `max_load` children.
    Internal(InternalNode<T>),
}

impl<T: Coord> Node<T> {
    pub fn leaf(point: Point<T>) -> Self {
        let bbox = BoundingBox::from_point(&point);
        Node::Leaf { point, bbox }
    }

    pub fn bbox(&self) -> &BoundingBox<T> {
        match self {
            Node::Leaf { bbox, .. } => bbox,
            Node::Internal(node) => node.bbox(),
        }
    }

    /// Number of points below this node (1 for a leaf).
    pub fn size(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal(node) => node.size(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn level(&self) -> u32 {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal(node) => node.level(),
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Statistics about the R-Tree structure and page accesses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RTreeStats {
    pub dimension: usize,
    pub total_points: usize,
    pub node_count: usize,
    pub internal_nodes: usize,
    /// Number of levels, counting the leaf level. 0 for an empty tree.
    pub height: u32,
    /// Internal nodes (root excluded) read since the last page-access reset.
    pub pages_accessed: usize,
}
