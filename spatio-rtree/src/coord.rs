//! Numeric coordinate types.
//!
//! Every geometry type in this crate is generic over a [`Coord`]. Ordering
//! comparisons stay in the native type; all distance arithmetic is done in
//! `f64` so that integer coordinates never overflow when subtracted or squared.

use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use num_traits::{NumCast, ToPrimitive};

/// A scalar usable as a point coordinate.
pub trait Coord:
    Copy + PartialOrd + Debug + Display + NumCast + ToPrimitive + Send + Sync + 'static
{
    /// Widens the coordinate to `f64`.
    #[inline]
    fn as_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }

    /// Signed difference `self - other`, computed in `f64`.
    #[inline]
    fn delta(self, other: Self) -> f64 {
        self.as_f64() - other.as_f64()
    }

    /// Total order used for sorting. Incomparable values (NaN) compare equal.
    #[inline]
    fn order(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

impl Coord for f32 {}
impl Coord for f64 {}
impl Coord for i16 {}
impl Coord for i32 {}
impl Coord for i64 {}
impl Coord for u16 {}
impl Coord for u32 {}
impl Coord for u64 {}
