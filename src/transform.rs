//! World/local frame transforms for oriented boxes.
//!
//! A box's local frame has its center at the origin and its axes along X, Y and Z. Expressing
//! another shape in that frame turns an oriented query into an axis aligned one.

use crate::shapes::obb::Obb;
use crate::shapes::triangle::Triangle;
use crate::{Matrix4, Point3};

/// The pair of homogeneous matrices that move points between world space and an [`Obb`]'s
/// local frame.
///
/// Built fresh for every query from the box it describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// World to local.
    pub to_local: Matrix4,
    /// Local to world.
    pub to_world: Matrix4,
}

impl LocalTransform {
    /// Builds both directions for `obb`.
    ///
    /// The local to world matrix has the box axes as its rotation columns and the center as
    /// its translation. Because the axes are orthonormal its inverse is the transposed rotation
    /// with translation `-Rᵀ · center`, which is what `to_local` holds.
    ///
    /// # Examples
    /// ```
    /// use collide3d::transform::LocalTransform;
    /// use collide3d::{Obb, Point3};
    ///
    /// let obb = Obb::axis_aligned(Point3::new(1.0, 2.0, 3.0), [1.0, 1.0, 1.0]);
    /// let transform = LocalTransform::from_obb(&obb);
    ///
    /// assert_eq!(transform.point_to_local(&Point3::new(1.0, 2.0, 4.0)), Point3::new(0.0, 0.0, 1.0));
    /// ```
    pub fn from_obb(obb: &Obb) -> LocalTransform {
        let [u, v, w] = &obb.axes;
        let c = &obb.center;

        #[rustfmt::skip]
        let to_world = Matrix4::new(
            u.x, v.x, w.x, c.x,
            u.y, v.y, w.y, c.y,
            u.z, v.z, w.z, c.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let c = c.coords;
        #[rustfmt::skip]
        let to_local = Matrix4::new(
            u.x, u.y, u.z, -u.dot(&c),
            v.x, v.y, v.z, -v.dot(&c),
            w.x, w.y, w.z, -w.dot(&c),
            0.0, 0.0, 0.0, 1.0,
        );

        LocalTransform { to_local, to_world }
    }

    /// Moves a world space point into the local frame.
    #[inline]
    pub fn point_to_local(&self, point: &Point3) -> Point3 {
        apply(&self.to_local, point)
    }

    /// Moves a local point back into world space.
    #[inline]
    pub fn point_to_world(&self, point: &Point3) -> Point3 {
        apply(&self.to_world, point)
    }

    /// Moves every vertex of `triangle` into the local frame.
    pub fn triangle_to_local(&self, triangle: &Triangle) -> Triangle {
        Triangle::from(triangle.vertices.map(|v| self.point_to_local(&v)))
    }

    /// Moves every vertex of a local `triangle` back into world space.
    pub fn triangle_to_world(&self, triangle: &Triangle) -> Triangle {
        Triangle::from(triangle.vertices.map(|v| self.point_to_world(&v)))
    }
}

/// Applies a homogeneous matrix to a point with `w = 1` and keeps `xyz`.
#[inline]
pub(crate) fn apply(matrix: &Matrix4, point: &Point3) -> Point3 {
    let h = matrix * point.to_homogeneous();
    Point3::new(h.x, h.y, h.z)
}
