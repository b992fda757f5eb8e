//! Circles (balls, in higher dimensions) and their relation to bounding boxes.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::bounding_box::BoundingBox;
use crate::coord::Coord;
use crate::point::Point;
use crate::rtree::{SpatialError, SpatialResult};

/// How a circle relates to a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// No point of the box lies inside the circle.
    Disjoint,
    /// The box and the circle share some, but not necessarily all, points.
    Intersects,
    /// Every point of the box lies inside the circle.
    Contains,
}

impl Overlap {
    pub fn overlaps(self) -> bool {
        !matches!(self, Overlap::Disjoint)
    }

    pub fn contains(self) -> bool {
        matches!(self, Overlap::Contains)
    }
}

/// A circle with a center point and a non-negative radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"),
    try_from = "CircleRepr<T>"
)]
pub struct Circle<T: Coord> {
    center: Point<T>,
    radius: f64,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct CircleRepr<T: Coord> {
    center: Point<T>,
    radius: f64,
}

impl<T: Coord> TryFrom<CircleRepr<T>> for Circle<T> {
    type Error = SpatialError;

    fn try_from(repr: CircleRepr<T>) -> SpatialResult<Self> {
        Circle::new(repr.center, repr.radius)
    }
}

impl<T: Coord> Circle<T> {
    /// Creates a circle.
    ///
    /// # Errors
    ///
    /// Fails if `radius` is negative or NaN.
    pub fn new(center: Point<T>, radius: f64) -> SpatialResult<Self> {
        if radius.is_nan() || radius < 0.0 {
            return Err(SpatialError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> &Point<T> {
        &self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Checks if `point` lies inside the circle (boundary included).
    pub fn overlaps(&self, point: &Point<T>) -> SpatialResult<bool> {
        Ok(self.center.distance(point)? <= self.radius)
    }

    /// Checks if `bbox` encloses the circle's own bounding box
    /// (`center ± radius` on every axis).
    pub fn is_enclosed_by(&self, bbox: &BoundingBox<T>) -> SpatialResult<bool> {
        let (Some(bl), Some(tr)) = (bbox.bl(), bbox.tr()) else {
            return Ok(false);
        };
        SpatialError::check_dimension(bl.dimension(), self.center.dimension())?;

        Ok((0..bl.dimension()).all(|i| {
            let c = self.center[i].as_f64();
            bl[i].as_f64() <= c - self.radius && tr[i].as_f64() >= c + self.radius
        }))
    }

    /// Classifies how this circle relates to `bbox`.
    ///
    /// The box is contained when its farthest corner lies inside the circle
    /// and overlaps it when its nearest point does. Both distances are taken
    /// per axis, so this stays linear in the dimension.
    pub fn classify(&self, bbox: &BoundingBox<T>) -> SpatialResult<Overlap> {
        if bbox.is_empty() {
            return Ok(Overlap::Disjoint);
        }

        let overlap = if bbox.max_distance(&self.center)? <= self.radius {
            Overlap::Contains
        } else if bbox.min_distance(&self.center)? <= self.radius {
            Overlap::Intersects
        } else {
            Overlap::Disjoint
        };
        Ok(overlap)
    }
}

impl<T: Coord> Display for Circle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle({},{})", self.center, self.radius)
    }
}
