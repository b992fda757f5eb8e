//! Axis-aligned bounding boxes over points of equal dimension.

use std::fmt::{self, Display};
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::point::Point;
use crate::rtree::{SpatialError, SpatialResult};

/// An axis-aligned minimum bounding rectangle over points of equal dimension.
///
/// `BoundingBox` is defined by its bottom-left (BL) and top-right (TR)
/// corners with `BL[i] <= TR[i]` on every axis. A box may also be *empty*,
/// which is only meaningful while it is being grown with [`expand`] during
/// tree construction: the first expansion turns it into exactly the added
/// geometry.
///
/// # Examples
///
/// ```rust
/// use spatio_rtree::{BoundingBox, Point};
///
/// let mut bbox =
///     BoundingBox::new(Point::new(vec![3, 5, 5]), Point::new(vec![10, 10, 12])).unwrap();
/// let extra = BoundingBox::new(Point::new(vec![4, 6, 6]), Point::new(vec![5, 17, 11])).unwrap();
///
/// assert!(bbox.expand_box(&extra).unwrap());
/// assert_eq!(bbox.to_string(), "[(3,5,5),(10,17,12)]");
/// ```
///
/// [`expand`]: BoundingBox::expand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"),
    try_from = "BoundingBoxRepr<T>"
)]
pub struct BoundingBox<T: Coord> {
    corners: Option<(Point<T>, Point<T>)>,
}

/// Unchecked wire form, validated through [`BoundingBox::new`].
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct BoundingBoxRepr<T: Coord> {
    corners: Option<(Point<T>, Point<T>)>,
}

impl<T: Coord> TryFrom<BoundingBoxRepr<T>> for BoundingBox<T> {
    type Error = SpatialError;

    fn try_from(repr: BoundingBoxRepr<T>) -> SpatialResult<Self> {
        match repr.corners {
            Some((bl, tr)) => BoundingBox::new(bl, tr),
            None => Ok(BoundingBox::empty()),
        }
    }
}

impl<T: Coord> Default for BoundingBox<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Coord> BoundingBox<T> {
    /// Creates a bounding box from its bottom-left and top-right corners.
    ///
    /// # Errors
    ///
    /// Fails if the corners differ in dimension or if `bl[i] > tr[i]` on any axis.
    pub fn new(bl: Point<T>, tr: Point<T>) -> SpatialResult<Self> {
        SpatialError::check_dimension(bl.dimension(), tr.dimension())?;
        if let Some(axis) = (0..bl.dimension()).find(|&i| bl[i] > tr[i]) {
            return Err(SpatialError::InvalidBox(format!(
                "bottom-left {} exceeds top-right {} on axis {}",
                bl, tr, axis
            )));
        }
        Ok(Self {
            corners: Some((bl, tr)),
        })
    }

    /// The degenerate box `(point, point)`.
    pub fn from_point(point: &Point<T>) -> Self {
        Self {
            corners: Some((point.clone(), point.clone())),
        }
    }

    /// A box with no geometry yet.
    pub fn empty() -> Self {
        Self { corners: None }
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_none()
    }

    /// Bottom-left corner, `None` while the box is empty.
    pub fn bl(&self) -> Option<&Point<T>> {
        self.corners.as_ref().map(|(bl, _)| bl)
    }

    /// Top-right corner, `None` while the box is empty.
    pub fn tr(&self) -> Option<&Point<T>> {
        self.corners.as_ref().map(|(_, tr)| tr)
    }

    /// Dimension of the corners, 0 for an empty box.
    pub fn dimension(&self) -> usize {
        self.bl().map_or(0, Point::dimension)
    }

    fn corners(&self) -> SpatialResult<(&Point<T>, &Point<T>)> {
        self.corners
            .as_ref()
            .map(|(bl, tr)| (bl, tr))
            .ok_or(SpatialError::EmptyBox)
    }

    /// Checks if this bounding box contains another bounding box.
    ///
    /// An empty `other` is contained in every box; an empty `self` contains
    /// no non-empty box.
    pub fn contains(&self, other: &BoundingBox<T>) -> SpatialResult<bool> {
        let Some((in_bl, in_tr)) = other.corners.as_ref() else {
            return Ok(true);
        };
        let Some((out_bl, out_tr)) = self.corners.as_ref() else {
            return Ok(false);
        };
        SpatialError::check_dimension(out_bl.dimension(), in_bl.dimension())?;

        Ok((0..out_bl.dimension()).all(|i| in_bl[i] >= out_bl[i] && in_tr[i] <= out_tr[i]))
    }

    /// Checks if this bounding box contains a point (boundary included).
    pub fn contains_point(&self, point: &Point<T>) -> SpatialResult<bool> {
        self.contains(&BoundingBox::from_point(point))
    }

    /// Grows this box to enclose `point`. Returns whether the box changed.
    pub fn expand(&mut self, point: &Point<T>) -> SpatialResult<bool> {
        self.expand_corners(point, point)
    }

    /// Grows this box to enclose `other`. Returns whether the box changed.
    pub fn expand_box(&mut self, other: &BoundingBox<T>) -> SpatialResult<bool> {
        match other.corners.as_ref() {
            Some((bl, tr)) => self.expand_corners(bl, tr),
            None => Ok(false),
        }
    }

    fn expand_corners(&mut self, extra_bl: &Point<T>, extra_tr: &Point<T>) -> SpatialResult<bool> {
        if self.corners.is_none() {
            self.corners = Some((extra_bl.clone(), extra_tr.clone()));
            return Ok(true);
        }
        let (bl, tr) = self.corners.as_mut().ok_or(SpatialError::EmptyBox)?;
        SpatialError::check_dimension(bl.dimension(), extra_bl.dimension())?;

        // corners are replaced, never edited, so shared inputs stay intact
        let mut extended = false;
        for i in 0..bl.dimension() {
            if extra_bl[i] < bl[i] {
                *bl = bl.move_to(i, extra_bl[i])?;
                extended = true;
            }
            if extra_tr[i] > tr[i] {
                *tr = tr.move_to(i, extra_tr[i])?;
                extended = true;
            }
        }
        Ok(extended)
    }

    /// Minimum Euclidean distance from `point` to this box; 0 if inside.
    pub fn min_distance(&self, point: &Point<T>) -> SpatialResult<f64> {
        let (bl, tr) = self.corners()?;
        SpatialError::check_dimension(bl.dimension(), point.dimension())?;

        let mut dist = 0.0;
        for i in 0..bl.dimension() {
            let p = point[i];
            if p < bl[i] {
                let d = bl[i].delta(p);
                dist += d * d;
            } else if p > tr[i] {
                let d = p.delta(tr[i]);
                dist += d * d;
            }
        }
        Ok(dist.sqrt())
    }

    /// Distance from `point` to the farthest corner of this box.
    ///
    /// On each axis the corner coordinate farther from `point` is taken, so
    /// the result equals [`Point::distance`] to that corner and is never
    /// smaller than the distance to any other corner.
    pub fn max_distance(&self, point: &Point<T>) -> SpatialResult<f64> {
        let (bl, tr) = self.corners()?;
        SpatialError::check_dimension(bl.dimension(), point.dimension())?;

        let mut dist = 0.0;
        for i in 0..bl.dimension() {
            let p = point[i];
            let d = p.delta(bl[i]).abs().max(p.delta(tr[i]).abs());
            dist += d * d;
        }
        Ok(dist.sqrt())
    }

    /// Lazily enumerates the `2^dim` corner points of this box.
    ///
    /// Bit `b` of the vertex number selects the top-right coordinate on axis
    /// `b`. An empty box has no vertices. With 64 or more axes the count
    /// saturates at `u64::MAX` and axes past the 63rd always take the
    /// bottom-left coordinate.
    pub fn vertices(&self) -> Vertices<'_, T> {
        let count = match self.corners.as_ref() {
            Some((bl, _)) => 1u64.checked_shl(bl.dimension() as u32).unwrap_or(u64::MAX),
            None => 0,
        };
        Vertices {
            bbox: self,
            next: 0,
            count,
        }
    }
}

impl<T: Coord> Display for BoundingBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.corners {
            Some((bl, tr)) => write!(f, "[{},{}]", bl, tr),
            None => write!(f, "[]"),
        }
    }
}

/// Iterator over the corners of a [`BoundingBox`], see [`BoundingBox::vertices`].
pub struct Vertices<'a, T: Coord> {
    bbox: &'a BoundingBox<T>,
    next: u64,
    count: u64,
}

impl<T: Coord> Iterator for Vertices<'_, T> {
    type Item = Point<T>;

    fn next(&mut self) -> Option<Point<T>> {
        if self.next >= self.count {
            return None;
        }
        let (bl, tr) = self.bbox.corners.as_ref()?;
        let v = self.next;
        self.next += 1;

        let coords = (0..bl.dimension())
            .map(|axis| {
                let top = u32::try_from(axis)
                    .ok()
                    .and_then(|shift| v.checked_shr(shift))
                    .is_some_and(|bits| bits & 1 == 1);
                if top { tr[axis] } else { bl[axis] }
            })
            .collect();
        Some(Point::new(coords))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.count - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl<T: Coord> ExactSizeIterator for Vertices<'_, T> {}

impl<T: Coord> FusedIterator for Vertices<'_, T> {}
