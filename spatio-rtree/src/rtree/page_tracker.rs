//! Simulated page-access accounting.
//!
//! Every read of an internal node's child list counts as one page fault.
//! The record lives beside the node arena instead of inside the nodes, so
//! queries only need `&RTree` and concurrent readers only contend on this
//! informational counter.

use std::collections::HashSet;

use parking_lot::Mutex;

use super::rtree_types::NodeId;

#[derive(Debug)]
pub(crate) struct PageTracker {
    enabled: bool,
    accessed: Mutex<HashSet<NodeId>>,
}

impl PageTracker {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            accessed: Mutex::new(HashSet::new()),
        }
    }

    /// Records a read of `node`'s children.
    #[inline]
    pub(crate) fn touch(&self, node: NodeId) {
        if self.enabled {
            self.accessed.lock().insert(node);
        }
    }

    /// Number of distinct nodes read since the last reset, `root` excluded.
    pub(crate) fn count(&self, root: Option<NodeId>, reset: bool) -> usize {
        let mut accessed = self.accessed.lock();
        let count = accessed
            .iter()
            .filter(|&&id| Some(id) != root)
            .count();
        if reset {
            accessed.clear();
        }
        count
    }

    pub(crate) fn clear(&self) {
        self.accessed.lock().clear();
    }
}
