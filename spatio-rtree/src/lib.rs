//! # Spatio R-Tree - Bulk-Loaded Point Index
//!
//! This crate provides a static, in-memory R-Tree over multi-dimensional
//! points, bulk loaded with the Sort-Tile-Recursive (STR) algorithm, and the
//! geometry primitives it is built from.
//!
//! ## Features
//!
//! - **Generic Coordinates**: integer and floating-point points of any dimension
//! - **STR Bulk Loading**: balanced, densely packed trees in a single pass
//! - **kNN Queries**: best-first search with branch-and-bound pruning
//! - **RkNN Queries**: brute force or counting-range verification, chosen per query
//! - **Range Counting**: early-terminating counts over circular ranges
//! - **Page-Access Accounting**: simulated I/O cost of every query
//! - **Thread Safe**: queries take `&self`; the tree is `Send + Sync`
//!
//! ## Quick Start
//!
//! ```rust
//! use spatio_rtree::{Point, RTree, RknnHeuristic};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = RTree::new(2)?;
//! tree.load(vec![
//!     Point::new(vec![0.0, 0.0]),
//!     Point::new(vec![1.0, 1.0]),
//!     Point::new(vec![5.0, 5.0]),
//!     Point::new(vec![6.0, 5.0]),
//! ])?;
//!
//! // Second nearest point to the origin
//! let q = Point::new(vec![0.0, 0.0]);
//! assert_eq!(tree.knn(&q, 2)?, Point::new(vec![1.0, 1.0]));
//!
//! // Points that would have q as their nearest neighbor
//! let reverse: Vec<_> = tree.rknn(&q, 1, RknnHeuristic::BRUTE_FORCE)?.collect();
//! assert_eq!(reverse.len(), 1);
//!
//! // Simulated page reads so far
//! let _pages = tree.io(true);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use spatio_rtree::RTree;
//!
//! let tree = RTree::<i32>::builder()
//!     .dimension(3)
//!     .max_load(16)
//!     .min_load(8)
//!     .trace_queries(true)
//!     .build()
//!     .unwrap();
//! assert!(tree.is_empty());
//! ```

// Geometry
pub mod bounding_box;
pub mod circle;
pub mod coord;
pub mod point;

// Index
pub mod database;
pub mod rtree;

// Re-export geometry types
pub use bounding_box::{BoundingBox, Vertices};
pub use circle::{Circle, Overlap};
pub use coord::Coord;
pub use point::Point;

// Re-export R-Tree types
pub use database::SpatialDatabase;
pub use rtree::{
    Neighbor, Node, NodeId, PointIter, RTree, RTreeBuilder, RTreeConfig, RTreeStats, Rknn,
    RknnHeuristic, SpatialError, SpatialResult, TopK,
};
