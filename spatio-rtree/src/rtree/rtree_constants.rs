//! Constants for the bulk-loaded R-Tree.

/// Maximum number of children per internal node
pub const MAX_LOAD: usize = 10;

/// Target minimum fanout used when packing.
///
/// Not enforced after load: the last node of each level may hold fewer children.
pub const MIN_LOAD: usize = 6;

/// Smallest fanout that still lets the packing loop shrink every level
pub const MIN_FANOUT: usize = 2;

/// Target used for query trace events
pub const TRACE_TARGET: &str = "spatio_rtree::query";
