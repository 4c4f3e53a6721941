//! Shapes the collision predicates understand.

pub mod obb;
pub mod triangle;

use crate::error::CollisionResult;
use crate::tolerance::Tolerances;
use crate::trace::{NoTrace, Tracer};
use crate::tri_tri;

pub use obb::Obb;
pub use triangle::Triangle;

/// Either of the supported shapes.
///
/// The set of shapes is closed, so every pair maps onto exactly one predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// An oriented box.
    Obb(Obb),
    /// A triangle.
    Triangle(Triangle),
}

impl Shape {
    /// Returns true if the two shapes overlap, using default tolerances.
    ///
    /// # Examples
    /// ```
    /// use collide3d::{Obb, Point3, Shape, Triangle};
    ///
    /// let obb: Shape = Obb::axis_aligned(Point3::origin(), [1.0, 1.0, 1.0]).into();
    /// let triangle: Shape = Triangle::new(
    ///     Point3::new(-2.0, -2.0, 0.5),
    ///     Point3::new(2.0, -2.0, 0.5),
    ///     Point3::new(0.0, 2.0, 0.5),
    /// )
    /// .into();
    ///
    /// assert_eq!(obb.collides(&triangle), Ok(true));
    /// assert_eq!(triangle.collides(&obb), Ok(true));
    /// ```
    pub fn collides(&self, other: &Shape) -> CollisionResult<bool> {
        self.collides_traced(other, &Tolerances::default(), &mut NoTrace)
    }

    /// Same as [`Shape::collides`] with explicit tolerances and a trace sink.
    ///
    /// Triangle pairs go through the orientation classifier, so coplanar triangles report no
    /// collision.
    pub fn collides_traced<T: Tracer + ?Sized>(
        &self,
        other: &Shape,
        tolerances: &Tolerances,
        tracer: &mut T,
    ) -> CollisionResult<bool> {
        match (self, other) {
            (Shape::Obb(a), Shape::Obb(b)) => Ok(a.intersects_obb_traced(b, tolerances, tracer)),
            (Shape::Obb(obb), Shape::Triangle(triangle))
            | (Shape::Triangle(triangle), Shape::Obb(obb)) => {
                obb.intersects_triangle_traced(triangle, tolerances, tracer)
            }
            (Shape::Triangle(a), Shape::Triangle(b)) => {
                tri_tri::orientation::collide_traced(a, b, tolerances, tracer)
            }
        }
    }
}

impl From<Obb> for Shape {
    fn from(obb: Obb) -> Self {
        Shape::Obb(obb)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}
