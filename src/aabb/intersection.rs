use crate::aabb::Aabb;
use crate::axis::Axis;
use crate::error::CollisionResult;
use crate::shapes::triangle::Triangle;
use crate::tolerance::Tolerances;
use crate::trace::{emit, NoTrace, SeparatingAxis, TraceEvent, Tracer};
use crate::Point3;

/// A trait implemented by things that may or may not intersect an origin centered [`Aabb`].
pub trait IntersectsAabb {
    /// Returns whether this object intersects an [`Aabb`].
    ///
    /// # Examples
    /// ```
    /// use collide3d::aabb::{Aabb, IntersectsAabb};
    /// use collide3d::{CollisionResult, Point3};
    ///
    /// struct XyPlane;
    ///
    /// impl IntersectsAabb for XyPlane {
    ///     fn intersects_aabb(&self, _aabb: &Aabb) -> CollisionResult<bool> {
    ///         Ok(true)
    ///     }
    /// }
    ///
    /// let aabb = Aabb::new([1.0, 1.0, 1.0]);
    /// assert_eq!(XyPlane.intersects_aabb(&aabb), Ok(true));
    /// assert_eq!(Point3::new(2.0, 0.0, 0.0).intersects_aabb(&aabb), Ok(false));
    /// ```
    fn intersects_aabb(&self, aabb: &Aabb) -> CollisionResult<bool>;
}

impl IntersectsAabb for Point3 {
    fn intersects_aabb(&self, aabb: &Aabb) -> CollisionResult<bool> {
        Ok(aabb.contains(self))
    }
}

impl IntersectsAabb for Triangle {
    fn intersects_aabb(&self, aabb: &Aabb) -> CollisionResult<bool> {
        aabb.intersects_triangle(self)
    }
}

impl Aabb {
    /// Returns true if a triangle given in this box's frame overlaps the box.
    ///
    /// # Examples
    /// ```
    /// use collide3d::aabb::Aabb;
    /// use collide3d::{Point3, Triangle};
    ///
    /// let aabb = Aabb::new([1.0, 1.0, 1.0]);
    /// let through = Triangle::new(
    ///     Point3::new(-3.0, -3.0, 0.0),
    ///     Point3::new(3.0, -3.0, 0.0),
    ///     Point3::new(0.0, 3.0, 0.0),
    /// );
    /// assert_eq!(aabb.intersects_triangle(&through), Ok(true));
    /// ```
    pub fn intersects_triangle(&self, triangle: &Triangle) -> CollisionResult<bool> {
        self.intersects_triangle_traced(triangle, &Tolerances::default(), &mut NoTrace)
    }

    /// Separating axis test between this box and a triangle in its frame.
    ///
    /// Tries the triangle's face normal, then the three box axes, then the nine cross
    /// products of a box axis with a triangle edge, and stops at the first axis along which
    /// the projections are disjoint. Intervals that only touch do not separate.
    ///
    /// Fails with [`DegenerateTriangle`] if the triangle's face normal can not be normalized.
    ///
    /// [`DegenerateTriangle`]: crate::CollisionError::DegenerateTriangle
    pub fn intersects_triangle_traced<T: Tracer + ?Sized>(
        &self,
        triangle: &Triangle,
        tolerances: &Tolerances,
        tracer: &mut T,
    ) -> CollisionResult<bool> {
        let normal = triangle.unit_normal(tolerances)?;
        let vertices = &triangle.vertices;

        let distance = vertices[0].coords.dot(&normal).abs();
        let radius = self.radius_along(&normal);
        if distance > radius {
            emit(
                tracer,
                TraceEvent::Separated {
                    axis: SeparatingAxis::TriangleNormal,
                    gap: distance - radius,
                },
            );
            return Ok(false);
        }

        for axis in Axis::ALL {
            let interval = triangle.project(&axis.unit());
            let radius = self.half_extents[axis];
            if interval.outside_radius(radius) {
                emit(
                    tracer,
                    TraceEvent::Separated {
                        axis: SeparatingAxis::AabbFace(axis),
                        gap: interval.gap_to_radius(radius),
                    },
                );
                return Ok(false);
            }
        }

        let edges = triangle.edges();
        for axis in Axis::ALL {
            for (edge, direction) in edges.iter().enumerate() {
                // Zero when the edge runs along `axis`; the projections then never separate.
                let cross = axis.unit().cross(direction);
                let interval = triangle.project(&cross);
                let radius = self.radius_along(&cross);
                if interval.outside_radius(radius) {
                    emit(
                        tracer,
                        TraceEvent::Separated {
                            axis: SeparatingAxis::AabbEdgeCross { axis, edge },
                            gap: interval.gap_to_radius(radius),
                        },
                    );
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }
}
