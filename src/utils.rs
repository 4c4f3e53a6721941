//! Utilities module.

use num_traits::Float;

use crate::{Point3, Real, Vector3};

/// Fast floating point minimum.  This function matches the semantics of
///
/// ```no_compile
/// if x < y { x } else { y }
/// ```
///
/// which has efficient instruction sequences on many platforms (1 instruction on x86).  For most
/// values, it matches the semantics of `x.min(y)`; the special cases are:
///
/// ```text
/// min(-0.0, +0.0); +0.0
/// min(+0.0, -0.0): -0.0
/// min( NaN,  1.0):  1.0
/// min( 1.0,  NaN):  NaN
/// ```
///
/// Note: This exists because [`std::cmp::min`] requires Ord which floating point types do not satisfy
#[inline(always)]
pub fn fast_min<T: Float>(x: T, y: T) -> T {
    if x < y {
        x
    } else {
        y
    }
}

/// Fast floating point maximum.  This function matches the semantics of
///
/// ```no_compile
/// if x > y { x } else { y }
/// ```
///
/// which has efficient instruction sequences on many platforms (1 instruction on x86).  For most
/// values, it matches the semantics of `x.max(y)`; the special cases are:
///
/// ```text
/// max(-0.0, +0.0); +0.0
/// max(+0.0, -0.0): -0.0
/// max( NaN,  1.0):  1.0
/// max( 1.0,  NaN):  NaN
/// ```
///
/// Note: This exists because [`std::cmp::max`] requires Ord which floating point types do not satisfy
#[inline(always)]
pub fn fast_max<T: Float>(x: T, y: T) -> T {
    if x > y {
        x
    } else {
        y
    }
}

/// Minimum of three values.
#[inline(always)]
pub fn min3<T: Float>(a: T, b: T, c: T) -> T {
    fast_min(a, fast_min(b, c))
}

/// Maximum of three values.
#[inline(always)]
pub fn max3<T: Float>(a: T, b: T, c: T) -> T {
    fast_max(a, fast_max(b, c))
}

/// The closed interval a set of points covers once projected onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Smallest projected value.
    pub min: Real,
    /// Largest projected value.
    pub max: Real,
}

impl Interval {
    /// Projects the three `points` onto `axis`. The axis does not need to be normalized.
    pub fn project(points: &[Point3; 3], axis: &Vector3) -> Interval {
        let a = points[0].coords.dot(axis);
        let b = points[1].coords.dot(axis);
        let c = points[2].coords.dot(axis);
        Interval {
            min: min3(a, b, c),
            max: max3(a, b, c),
        }
    }

    /// Length of the overlap between two intervals. Negative when they are disjoint,
    /// in which case the magnitude is the gap between them.
    pub fn overlap(&self, other: &Interval) -> Real {
        fast_min(self.max, other.max) - fast_max(self.min, other.min)
    }

    /// Returns true if this interval lies entirely outside `[-radius, radius]`.
    pub fn outside_radius(&self, radius: Real) -> bool {
        self.min > radius || self.max < -radius
    }

    /// How far this interval lies outside `[-radius, radius]`. Positive only when
    /// [`Interval::outside_radius`] holds.
    pub fn gap_to_radius(&self, radius: Real) -> Real {
        fast_max(self.min - radius, -radius - self.max)
    }
}
