//! Configuration for the R-Tree.

use std::marker::PhantomData;

use crate::coord::Coord;

use super::rtree_constants::{MAX_LOAD, MIN_FANOUT, MIN_LOAD};
use super::rtree_impl::RTree;
use super::rtree_types::{SpatialError, SpatialResult};

/// Tree parameters fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RTreeConfig {
    dimension: usize,
    max_load: usize,
    min_load: usize,
    track_page_access: bool,
    trace_queries: bool,
}

impl RTreeConfig {
    /// Default configuration for a tree of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            max_load: MAX_LOAD,
            min_load: MIN_LOAD,
            track_page_access: true,
            trace_queries: false,
        }
    }

    /// Dimension every loaded point must have.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Maximum number of children per internal node.
    pub fn max_load(&self) -> usize {
        self.max_load
    }

    /// Target minimum fanout (informational, not enforced).
    pub fn min_load(&self) -> usize {
        self.min_load
    }

    /// Whether reads of internal nodes are recorded for [`RTree::io`].
    pub fn track_page_access(&self) -> bool {
        self.track_page_access
    }

    /// Whether query loops emit `log::trace!` events.
    pub fn trace_queries(&self) -> bool {
        self.trace_queries
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the dimension is zero, the fanout is
    /// below 2 or the minimum load exceeds the maximum.
    pub fn validate(&self) -> SpatialResult<()> {
        if self.dimension == 0 {
            return Err(SpatialError::InvalidConfig(
                "dimension must be at least 1".into(),
            ));
        }
        if self.max_load < MIN_FANOUT {
            return Err(SpatialError::InvalidConfig(format!(
                "max_load must be at least {}, got {}",
                MIN_FANOUT, self.max_load
            )));
        }
        if self.min_load == 0 || self.min_load > self.max_load {
            return Err(SpatialError::InvalidConfig(format!(
                "min_load must be in 1..={}, got {}",
                self.max_load, self.min_load
            )));
        }
        Ok(())
    }
}

/// Builder for creating and configuring an [`RTree`].
///
/// # Examples
///
/// ```rust
/// use spatio_rtree::RTree;
///
/// let tree = RTree::<f64>::builder()
///     .dimension(2)
///     .max_load(16)
///     .min_load(8)
///     .track_page_access(false)
///     .build()
///     .unwrap();
/// assert_eq!(tree.config().max_load(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct RTreeBuilder<T: Coord> {
    config: RTreeConfig,
    _coord: PhantomData<T>,
}

impl<T: Coord> Default for RTreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Coord> RTreeBuilder<T> {
    /// Creates a builder with the default fanout and a dimension of 1.
    pub fn new() -> Self {
        Self {
            config: RTreeConfig::new(1),
            _coord: PhantomData,
        }
    }

    pub fn dimension(mut self, dimension: usize) -> Self {
        self.config.dimension = dimension;
        self
    }

    pub fn max_load(mut self, max_load: usize) -> Self {
        self.config.max_load = max_load;
        self
    }

    pub fn min_load(mut self, min_load: usize) -> Self {
        self.config.min_load = min_load;
        self
    }

    pub fn track_page_access(mut self, enabled: bool) -> Self {
        self.config.track_page_access = enabled;
        self
    }

    pub fn trace_queries(mut self, enabled: bool) -> Self {
        self.config.trace_queries = enabled;
        self
    }

    /// Validates the configuration and creates an empty tree.
    pub fn build(self) -> SpatialResult<RTree<T>> {
        RTree::with_config(self.config)
    }
}
