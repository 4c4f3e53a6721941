//! Axis Aligned Bounding Boxes.

use crate::axis::Axis;
use crate::{Point3, Real, Vector3};

/// An axis aligned box centered on the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Half the side length along X, Y and Z.
    pub half_extents: [Real; 3],
}

impl Aabb {
    /// Creates a new [`Aabb`] with the given half extents.
    ///
    /// # Examples
    /// ```
    /// use collide3d::aabb::Aabb;
    ///
    /// let aabb = Aabb::new([1.0, 2.0, 3.0]);
    /// assert_eq!(aabb.size(), [2.0, 4.0, 6.0]);
    /// ```
    pub fn new(half_extents: [Real; 3]) -> Aabb {
        debug_assert!(
            half_extents.iter().all(|&h| h >= 0.0),
            "half extents must not be negative: {:?}",
            half_extents
        );
        Aabb { half_extents }
    }

    /// Full side lengths of the box.
    pub fn size(&self) -> [Real; 3] {
        self.half_extents.map(|h| h * 2.0)
    }

    /// Returns true if the [`Point3`] is inside the [`Aabb`]. The boundary counts as inside.
    ///
    /// # Examples
    /// ```
    /// use collide3d::aabb::Aabb;
    /// use collide3d::Point3;
    ///
    /// let aabb = Aabb::new([1.0, 1.0, 1.0]);
    /// assert!(aabb.contains(&Point3::new(1.0, -0.5, 0.0)));
    /// assert!(!aabb.contains(&Point3::new(1.0, -0.5, 1.5)));
    /// ```
    pub fn contains(&self, p: &Point3) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| axis.component(&p.coords).abs() <= self.half_extents[axis])
    }

    /// Half the width of the box projected onto `axis`, scaled by the length of `axis`.
    pub fn radius_along(&self, axis: &Vector3) -> Real {
        let h = &self.half_extents;
        h[0] * axis.x.abs() + h[1] * axis.y.abs() + h[2] * axis.z.abs()
    }
}
