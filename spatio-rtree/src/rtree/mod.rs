//! Static, bulk-loaded R-Tree over points.
//!
//! This module provides the in-memory R-Tree used by [`SpatialDatabase`](crate::SpatialDatabase):
//! - Sort-Tile-Recursive bulk loading into a flat node arena
//! - Best-first k-nearest-neighbor search with branch-and-bound pruning
//! - Reverse k-nearest-neighbor search with two interchangeable strategies
//! - Circular range counting and range queries
//! - Simulated page-access accounting for comparing query strategies

pub mod rtree_config;
pub mod rtree_constants;
pub mod rtree_types;
mod bulk_load;
mod knn;
mod page_tracker;
mod rknn;
mod rtree_impl;

pub use knn::{Neighbor, TopK};
pub use rknn::{Rknn, RknnHeuristic};
pub use rtree_config::{RTreeBuilder, RTreeConfig};
pub use rtree_constants::{MAX_LOAD, MIN_LOAD, TRACE_TARGET};
pub use rtree_impl::{PointIter, RTree};
pub use rtree_types::{
    Children, InternalNode, Node, NodeId, RTreeStats, SpatialError, SpatialResult,
};
