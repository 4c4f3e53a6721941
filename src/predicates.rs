//! Orientation predicates.

use crate::{Point3, Real};

/// Signed volume of the tetrahedron `p, q, r, s`, times six.
///
/// Positive when `s` lies on the side of plane `pqr` that `(q - p) × (r - p)` points away
/// from, i.e. `p, q, r` appear clockwise when seen from `s`.
///
/// # Examples
/// ```
/// use collide3d::predicates::orientation;
/// use collide3d::Point3;
///
/// let p = Point3::new(0.0, 0.0, 0.0);
/// let q = Point3::new(1.0, 0.0, 0.0);
/// let r = Point3::new(0.0, 1.0, 0.0);
///
/// assert!(orientation(&p, &q, &r, &Point3::new(0.0, 0.0, -1.0)) > 0.0);
/// assert!(orientation(&p, &q, &r, &Point3::new(0.0, 0.0, 1.0)) < 0.0);
/// assert_eq!(orientation(&p, &q, &r, &Point3::new(0.3, 0.3, 0.0)), 0.0);
/// ```
#[inline]
pub fn orientation(p: &Point3, q: &Point3, r: &Point3, s: &Point3) -> Real {
    (p - s).dot(&(q - s).cross(&(r - s)))
}

/// Sign of an orientation value, with a dead band around zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Below `-epsilon`.
    Negative,
    /// Within `[-epsilon, epsilon]`.
    Zero,
    /// Above `epsilon`.
    Positive,
}

impl Sign {
    /// Classifies `value` against the band `[-epsilon, epsilon]`.
    #[inline]
    pub fn of(value: Real, epsilon: Real) -> Sign {
        if value > epsilon {
            Sign::Positive
        } else if value < -epsilon {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }
}

/// [`Sign`] of [`orientation`]`(p, q, r, s)`.
#[inline]
pub fn orientation_sign(p: &Point3, q: &Point3, r: &Point3, s: &Point3, epsilon: Real) -> Sign {
    Sign::of(orientation(p, q, r, s), epsilon)
}

#[cfg(test)]
mod tests {
    use super::{orientation, orientation_sign, Sign};
    use crate::testbase::{tuple_to_point, tuplevec_small_strategy};
    use crate::Point3;
    use proptest::prelude::*;

    #[test]
    fn unit_tetrahedron_volume() {
        let p = Point3::new(0.0, 0.0, 0.0);
        let q = Point3::new(1.0, 0.0, 0.0);
        let r = Point3::new(0.0, 1.0, 0.0);
        let s = Point3::new(0.0, 0.0, -1.0);
        assert_eq!(orientation(&p, &q, &r, &s), 1.0);
    }

    #[test]
    fn sign_dead_band() {
        assert_eq!(Sign::of(0.5, 0.1), Sign::Positive);
        assert_eq!(Sign::of(-0.5, 0.1), Sign::Negative);
        assert_eq!(Sign::of(0.1, 0.1), Sign::Zero);
        assert_eq!(Sign::of(-0.05, 0.1), Sign::Zero);
        assert_eq!(Sign::of(0.0, 0.0), Sign::Zero);
    }

    proptest! {
        // Swapping two plane points flips the sign of the orientation.
        #[test]
        fn test_swap_flips_sign(p in tuplevec_small_strategy(),
                                q in tuplevec_small_strategy(),
                                r in tuplevec_small_strategy(),
                                s in tuplevec_small_strategy()) {
            let (p, q, r, s) = (tuple_to_point(&p), tuple_to_point(&q), tuple_to_point(&r), tuple_to_point(&s));
            let forward = orientation_sign(&p, &q, &r, &s, 1e-2);
            let swapped = orientation_sign(&p, &r, &q, &s, 1e-2);
            let expected = match forward {
                Sign::Positive => Sign::Negative,
                Sign::Negative => Sign::Positive,
                Sign::Zero => Sign::Zero,
            };
            prop_assert_eq!(swapped, expected);
        }

        // The query point itself is always on the plane through it.
        #[test]
        fn test_point_on_own_plane(p in tuplevec_small_strategy(),
                                   q in tuplevec_small_strategy(),
                                   r in tuplevec_small_strategy()) {
            let (p, q, r) = (tuple_to_point(&p), tuple_to_point(&q), tuple_to_point(&r));
            prop_assert_eq!(orientation(&p, &q, &r, &p), 0.0);
        }
    }
}
