//! Fixed-dimension points.

use std::fmt::{self, Display};
use std::ops::Index;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::coord::Coord;
use crate::rtree::{SpatialError, SpatialResult};

/// Inline capacity for point coordinates; higher dimensions spill to the heap.
pub(crate) type Coords<T> = SmallVec<[T; 4]>;

/// A point in `dimension()`-dimensional space.
///
/// Points are immutable: [`Point::move_to`] returns a new point and leaves
/// the receiver untouched. Cloning is a deep copy.
///
/// # Examples
///
/// ```rust
/// use spatio_rtree::Point;
///
/// let p = Point::new(vec![3.0, 4.0]);
/// let origin = Point::new(vec![0.0, 0.0]);
/// assert_eq!(p.distance(&origin).unwrap(), 5.0);
///
/// let moved = p.move_to(1, 0.0).unwrap();
/// assert_eq!(moved.to_string(), "(3,0)");
/// assert_eq!(p.to_string(), "(3,4)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Point<T: Coord> {
    coords: Coords<T>,
}

impl<T: Coord> Point<T> {
    /// Creates a point from its coordinates.
    pub fn new(coords: Vec<T>) -> Self {
        Self {
            coords: Coords::from_vec(coords),
        }
    }

    /// Creates a point by copying a coordinate slice.
    pub fn from_slice(coords: &[T]) -> Self {
        Self {
            coords: Coords::from_slice(coords),
        }
    }

    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Coordinate `i`, or `None` past the last dimension.
    pub fn get(&self, i: usize) -> Option<T> {
        self.coords.get(i).copied()
    }

    pub fn coords(&self) -> &[T] {
        &self.coords
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_squared(&self, other: &Point<T>) -> SpatialResult<f64> {
        SpatialError::check_dimension(self.dimension(), other.dimension())?;
        Ok(self
            .coords
            .iter()
            .zip(other.coords.iter())
            .map(|(&a, &b)| {
                let d = a.delta(b);
                d * d
            })
            .sum())
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point<T>) -> SpatialResult<f64> {
        self.distance_squared(other).map(f64::sqrt)
    }

    /// Returns a copy of this point with coordinate `coord` replaced by `value`.
    pub fn move_to(&self, coord: usize, value: T) -> SpatialResult<Point<T>> {
        if coord >= self.dimension() {
            return Err(SpatialError::CoordinateOutOfRange {
                index: coord,
                dimension: self.dimension(),
            });
        }
        let mut coords = self.coords.clone();
        coords[coord] = value;
        Ok(Point { coords })
    }
}

impl<T: Coord> Index<usize> for Point<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.coords[index]
    }
}

impl<T: Coord> From<Vec<T>> for Point<T> {
    fn from(coords: Vec<T>) -> Self {
        Point::new(coords)
    }
}

impl<T: Coord> Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}
