//! This module defines a Triangle and its intersection algorithms.

use crate::error::{CollisionError, CollisionResult};
use crate::tolerance::Tolerances;
use crate::transform::apply;
use crate::utils::Interval;
use crate::{Matrix4, Point3, Real, Vector3};

/// A triangle given by three ordered vertices.
///
/// The winding decides which side of the supporting plane is positive for the orientation
/// classifier. The separating axis tests do not care about it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    /// The vertices, in winding order.
    pub vertices: [Point3; 3],
}

impl Triangle {
    /// Creates a new triangle given a counter clockwise set of points.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Triangle {
        Triangle {
            vertices: [a, b, c],
        }
    }

    /// Edge vectors `v1 - v0`, `v2 - v1` and `v0 - v2`.
    pub fn edges(&self) -> [Vector3; 3] {
        let [a, b, c] = &self.vertices;
        [b - a, c - b, a - c]
    }

    /// Unnormalized face normal `(v1 - v0) × (v2 - v0)`. Its length is twice the area.
    pub fn normal(&self) -> Vector3 {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Twice the area of the triangle.
    pub fn area2(&self) -> Real {
        self.normal().norm()
    }

    /// Returns true if the face normal is too short to normalize.
    pub fn is_degenerate(&self, tolerances: &Tolerances) -> bool {
        self.normal().norm_squared() <= tolerances.degenerate_epsilon
    }

    /// Unit face normal.
    ///
    /// # Examples
    /// ```
    /// use collide3d::{CollisionError, Point3, Tolerances, Triangle, Vector3};
    ///
    /// let triangle = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    ///     Point3::new(0.0, 2.0, 0.0),
    /// );
    /// assert_eq!(triangle.unit_normal(&Tolerances::default()), Ok(Vector3::z()));
    ///
    /// let sliver = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 1.0, 1.0),
    ///     Point3::new(2.0, 2.0, 2.0),
    /// );
    /// assert!(matches!(
    ///     sliver.unit_normal(&Tolerances::default()),
    ///     Err(CollisionError::DegenerateTriangle { .. })
    /// ));
    /// ```
    pub fn unit_normal(&self, tolerances: &Tolerances) -> CollisionResult<Vector3> {
        let normal = self.normal();
        let normal_length_squared = normal.norm_squared();
        if normal_length_squared <= tolerances.degenerate_epsilon {
            return Err(CollisionError::DegenerateTriangle {
                normal_length_squared,
            });
        }
        Ok(normal / normal_length_squared.sqrt())
    }

    /// Fails with [`CollisionError::DegenerateTriangle`] if the triangle has no usable normal.
    pub(crate) fn check_degenerate(&self, tolerances: &Tolerances) -> CollisionResult<()> {
        self.unit_normal(tolerances).map(|_| ())
    }

    /// The same triangle with the opposite winding.
    pub fn flipped(&self) -> Triangle {
        let [a, b, c] = self.vertices;
        Triangle::new(a, c, b)
    }

    /// Applies a homogeneous transform to every vertex.
    pub fn transformed(&self, matrix: &Matrix4) -> Triangle {
        Triangle::from(self.vertices.map(|v| apply(matrix, &v)))
    }

    /// Mean of the three vertices.
    pub fn centroid(&self) -> Point3 {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Interval covered by the vertices projected onto `axis`.
    pub fn project(&self, axis: &Vector3) -> Interval {
        Interval::project(&self.vertices, axis)
    }
}

impl From<[Point3; 3]> for Triangle {
    fn from(vertices: [Point3; 3]) -> Self {
        Triangle { vertices }
    }
}

#[cfg(test)]
mod tests {
    use super::Triangle;
    use crate::testbase::triangle_strategy;
    use crate::{CollisionError, Matrix4, Point3, Tolerances, Vector3};
    use proptest::prelude::*;

    fn right_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        )
    }

    #[test]
    fn edges_close_the_loop() {
        let edges = right_triangle().edges();
        assert_eq!(edges[0], Vector3::new(3.0, 0.0, 0.0));
        assert_eq!(edges[1], Vector3::new(-3.0, 4.0, 0.0));
        assert_eq!(edges[2], Vector3::new(0.0, -4.0, 0.0));
        assert_eq!(edges[0] + edges[1] + edges[2], Vector3::zeros());
    }

    #[test]
    fn normal_and_area() {
        let triangle = right_triangle();
        assert_eq!(triangle.normal(), Vector3::new(0.0, 0.0, 12.0));
        assert_eq!(triangle.area2(), 12.0);
        assert_eq!(triangle.flipped().normal(), Vector3::new(0.0, 0.0, -12.0));
    }

    #[test]
    fn repeated_vertex_is_degenerate() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let triangle = Triangle::new(p, p, Point3::origin());
        let tolerances = Tolerances::default();
        assert!(triangle.is_degenerate(&tolerances));
        assert_eq!(
            triangle.unit_normal(&tolerances),
            Err(CollisionError::DegenerateTriangle {
                normal_length_squared: 0.0
            })
        );
    }

    #[test]
    fn centroid_and_projection() {
        let triangle = right_triangle();
        assert_eq!(triangle.centroid(), Point3::new(1.0, 4.0 / 3.0, 0.0));
        let interval = triangle.project(&Vector3::y());
        assert_eq!((interval.min, interval.max), (0.0, 4.0));
    }

    #[test]
    fn transformed_translates_vertices() {
        let moved = right_triangle().transformed(&Matrix4::new_translation(&Vector3::new(1.0, 1.0, 1.0)));
        assert_eq!(moved.vertices[2], Point3::new(1.0, 5.0, 1.0));
    }

    proptest! {
        // Flipping twice restores the triangle.
        #[test]
        fn test_flip_involution(triangle in triangle_strategy()) {
            prop_assert_eq!(triangle.flipped().flipped(), triangle);
        }

        // Unit normals are unit length.
        #[test]
        fn test_unit_normal_length(triangle in triangle_strategy()) {
            prop_assume!(triangle.area2() > 1e-2);
            let normal = triangle.unit_normal(&Tolerances::default()).unwrap();
            prop_assert!((normal.norm() - 1.0).abs() < 1e-4);
        }
    }
}
