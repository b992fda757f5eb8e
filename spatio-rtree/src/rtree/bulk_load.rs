//! Sort-Tile-Recursive (STR) bulk loading.
//!
//! The loader builds a balanced tree bottom-up in one pass:
//! 1. every point becomes a leaf;
//! 2. for each axis k = 1..=dim the leaf sequence is cut into
//!    `S = ceil((N / max_load)^((k-1)/dim))` consecutive slices of width
//!    `N / S`, and each slice is stably sorted on axis k. Later axes re-sort
//!    inside the slices left by earlier ones, which is what clusters nearby
//!    points together;
//! 3. the sequence is packed into internal nodes of `max_load` children;
//! 4. packing repeats on each new level, without re-sorting, until a single
//!    root remains.

use crate::coord::Coord;
use crate::point::Point;

use super::rtree_config::RTreeConfig;
use super::rtree_types::{InternalNode, Node, NodeId, SpatialError, SpatialResult};

/// Node arena produced by a bulk load.
#[derive(Debug)]
pub(crate) struct PackedTree<T: Coord> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) root: Option<NodeId>,
    pub(crate) height: u32,
}

impl<T: Coord> PackedTree<T> {
    pub(crate) fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            height: 0,
        }
    }
}

/// Builds a packed tree from `points`.
///
/// Every point must have the configured dimension. An empty input produces
/// an empty tree.
pub(crate) fn bulk_load<T: Coord>(
    mut points: Vec<Point<T>>,
    config: &RTreeConfig,
) -> SpatialResult<PackedTree<T>> {
    for point in &points {
        SpatialError::check_dimension(config.dimension(), point.dimension())?;
    }
    if points.is_empty() {
        log::debug!("bulk load with no points, tree is empty");
        return Ok(PackedTree::empty());
    }

    let total = points.len();
    str_sort(&mut points, config.dimension(), config.max_load());

    let mut nodes: Vec<Node<T>> = Vec::with_capacity(total + total / (config.max_load() - 1) + 1);
    let mut level: Vec<NodeId> = points
        .into_iter()
        .map(|point| push_node(&mut nodes, Node::leaf(point)))
        .collect();

    let mut height = 1;
    while level.len() > 1 {
        level = pack_level(&mut nodes, &level, config.max_load(), height)?;
        height += 1;
    }

    log::debug!(
        "bulk loaded {} points into {} nodes (height {})",
        total,
        nodes.len(),
        height
    );

    Ok(PackedTree {
        root: level.first().copied(),
        nodes,
        height,
    })
}

/// Sorts the leaf sequence slice by slice along every axis in turn.
pub(crate) fn str_sort<T: Coord>(points: &mut [Point<T>], dimension: usize, max_load: usize) {
    for k in 1..=dimension {
        sort_slices(points, dimension, k, max_load);
    }
}

/// One STR pass: stable-sorts each slice on axis `k - 1` (`k` is 1-based).
pub(crate) fn sort_slices<T: Coord>(
    points: &mut [Point<T>],
    dimension: usize,
    k: usize,
    max_load: usize,
) {
    let n = points.len();
    if n == 0 {
        return;
    }

    let slices = slice_count(n, dimension, k, max_load);
    let width = (n / slices).max(1);
    let axis = k - 1;

    for slice in points.chunks_mut(width) {
        slice.sort_by(|a, b| a[axis].order(&b[axis]));
    }
}

/// `ceil((n / max_load)^((k-1)/dim))`, at least 1.
fn slice_count(n: usize, dimension: usize, k: usize, max_load: usize) -> usize {
    let base = n as f64 / max_load as f64;
    let exponent = (k - 1) as f64 / dimension as f64;
    (base.powf(exponent).ceil() as usize).max(1)
}

fn pack_level<T: Coord>(
    nodes: &mut Vec<Node<T>>,
    level: &[NodeId],
    max_load: usize,
    height: u32,
) -> SpatialResult<Vec<NodeId>> {
    let mut parents = Vec::with_capacity(level.len().div_ceil(max_load));
    let mut parent = InternalNode::new(max_load, height);

    for &child in level {
        let node = &nodes[child.index()];
        if !parent.add_entry(child, node.bbox(), node.size())? {
            let full = std::mem::replace(&mut parent, InternalNode::new(max_load, height));
            parents.push(push_node(nodes, Node::Internal(full)));
        }
    }
    if !parent.is_empty() {
        parents.push(push_node(nodes, Node::Internal(parent)));
    }

    Ok(parents)
}

fn push_node<T: Coord>(nodes: &mut Vec<Node<T>>, node: Node<T>) -> NodeId {
    let id = NodeId::new(nodes.len());
    nodes.push(node);
    id
}
