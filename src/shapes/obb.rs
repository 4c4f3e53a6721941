//! This module defines an Oriented Bounding Box and its intersection properties.

use nalgebra::UnitQuaternion;

use crate::axis::Axis;
use crate::error::CollisionResult;
use crate::shapes::triangle::Triangle;
use crate::tolerance::Tolerances;
use crate::trace::{emit, NoTrace, SeparatingAxis, TraceEvent, Tracer};
use crate::transform::{apply, LocalTransform};
use crate::{Matrix4, Point3, Real, Vector3};

/// Represents a box that can be rotated in any direction.
///
/// The axes must be orthonormal. Nothing here checks that; a box with skewed or scaled axes
/// gives geometrically meaningless answers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obb {
    /// Center of the box.
    pub center: Point3,
    /// Half the side length along each of `axes`. Never negative; zero flattens the box.
    pub half_extents: [Real; 3],
    /// Local X, Y and Z directions of the box in world space.
    pub axes: [Vector3; 3],
}

impl Obb {
    /// Creates a new [`Obb`].
    pub fn new(center: Point3, half_extents: [Real; 3], axes: [Vector3; 3]) -> Obb {
        debug_assert!(
            half_extents.iter().all(|&h| h >= 0.0),
            "half extents must not be negative: {:?}",
            half_extents
        );
        Obb {
            center,
            half_extents,
            axes,
        }
    }

    /// Creates an [`Obb`] whose axes are the world axes.
    ///
    /// # Examples
    /// ```
    /// use collide3d::{Obb, Point3, Vector3};
    ///
    /// let obb = Obb::axis_aligned(Point3::new(0.0, 1.0, 0.0), [0.5, 0.5, 2.0]);
    /// assert_eq!(obb.axes, [Vector3::x(), Vector3::y(), Vector3::z()]);
    /// ```
    pub fn axis_aligned(center: Point3, half_extents: [Real; 3]) -> Obb {
        Obb::new(center, half_extents, [Vector3::x(), Vector3::y(), Vector3::z()])
    }

    /// Creates an [`Obb`] whose axes are the world axes rotated by `orientation`.
    pub fn from_rotation(
        center: Point3,
        half_extents: [Real; 3],
        orientation: UnitQuaternion<Real>,
    ) -> Obb {
        Obb::new(
            center,
            half_extents,
            Axis::ALL.map(|axis| orientation * axis.unit()),
        )
    }

    /// Returns the eight corners of the box.
    pub fn vertices(&self) -> [Point3; 8] {
        let [hx, hy, hz] = self.half_extents;
        let x = self.axes[Axis::X] * hx;
        let y = self.axes[Axis::Y] * hy;
        let z = self.axes[Axis::Z] * hz;
        let c = self.center;
        [
            c - x - y - z,
            c + x - y - z,
            c - x + y - z,
            c + x + y - z,
            c - x - y + z,
            c + x - y + z,
            c - x + y + z,
            c + x + y + z,
        ]
    }

    /// Moves a box given in some body's local space into the space `matrix` maps to.
    ///
    /// `matrix` may scale. The scale along each box axis is folded into the half extents so
    /// the axes of the result stay unit length. An axis the matrix collapses keeps its
    /// direction and ends up with a zero half extent.
    pub fn transformed(&self, matrix: &Matrix4) -> Obb {
        let linear = matrix.fixed_view::<3, 3>(0, 0);
        let mut half_extents = self.half_extents;
        let mut axes = self.axes;
        for (axis, half_extent) in axes.iter_mut().zip(half_extents.iter_mut()) {
            let moved = linear * *axis;
            let length = moved.norm();
            *half_extent *= length;
            if length > 0.0 {
                *axis = moved / length;
            }
        }
        Obb::new(apply(matrix, &self.center), half_extents, axes)
    }

    /// Builds the transforms between world space and this box's local frame.
    pub fn local_transform(&self) -> LocalTransform {
        LocalTransform::from_obb(self)
    }

    /// Returns true if the two boxes overlap. Touching boxes overlap.
    ///
    /// # Examples
    /// ```
    /// use collide3d::{Obb, Point3};
    ///
    /// let a = Obb::axis_aligned(Point3::origin(), [1.0, 1.0, 1.0]);
    /// let b = Obb::axis_aligned(Point3::new(1.5, 0.0, 0.0), [1.0, 1.0, 1.0]);
    /// assert!(a.intersects_obb(&b));
    /// ```
    pub fn intersects_obb(&self, other: &Obb) -> bool {
        self.intersects_obb_traced(other, &Tolerances::default(), &mut NoTrace)
    }

    /// Separating axis test against another box, reporting the separating axis to `tracer`.
    ///
    /// Works in this box's frame. `r[i][j]` correlates axis `i` of this box with axis `j` of
    /// `other`, and `tolerances.axis_epsilon` is added to every entry so that the cross axes of
    /// nearly parallel edges do not collapse to zero length bounds.
    pub fn intersects_obb_traced<T: Tracer + ?Sized>(
        &self,
        other: &Obb,
        tolerances: &Tolerances,
        tracer: &mut T,
    ) -> bool {
        let (a, b) = (self, other);
        let translation = b.center - a.center;

        let mut r = [[0.0 as Real; 3]; 3];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = a.axes[i].dot(&b.axes[j]) + tolerances.axis_epsilon;
            }
        }

        // Translation in a's frame.
        let t = Axis::ALL.map(|i| translation.dot(&a.axes[i]));

        let mut separated = |axis: SeparatingAxis, distance: Real, radius: Real| {
            if distance > radius {
                emit(
                    &mut *tracer,
                    TraceEvent::Separated {
                        axis,
                        gap: distance - radius,
                    },
                );
                true
            } else {
                false
            }
        };

        // Face axes of a.
        for i in Axis::ALL {
            let rb: Real = Axis::ALL
                .iter()
                .map(|&j| (b.half_extents[j] * r[i][j]).abs())
                .sum();
            if separated(SeparatingAxis::ObbFaceA(i), t[i].abs(), a.half_extents[i] + rb) {
                return false;
            }
        }

        // Face axes of b.
        for j in Axis::ALL {
            let ra: Real = Axis::ALL
                .iter()
                .map(|&i| (a.half_extents[i] * r[i][j]).abs())
                .sum();
            let distance = translation.dot(&b.axes[j]).abs();
            if separated(SeparatingAxis::ObbFaceB(j), distance, ra + b.half_extents[j]) {
                return false;
            }
        }

        // Edge cross axes a[i] x b[j].
        for i in Axis::ALL {
            let (i1, i2) = i.others();
            for j in Axis::ALL {
                let (j1, j2) = j.others();
                let distance = (t[i2] * r[i1][j] - t[i1] * r[i2][j]).abs();
                let ra = a.half_extents[i1] * r[i2][j].abs() + a.half_extents[i2] * r[i1][j].abs();
                let rb = b.half_extents[j1] * r[i][j2].abs() + b.half_extents[j2] * r[i][j1].abs();
                if separated(SeparatingAxis::ObbEdgeCross { a: i, b: j }, distance, ra + rb) {
                    return false;
                }
            }
        }

        true
    }

    /// Returns true if `triangle` overlaps this box.
    ///
    /// Fails with [`DegenerateTriangle`] if the triangle has no area.
    ///
    /// [`DegenerateTriangle`]: crate::CollisionError::DegenerateTriangle
    pub fn intersects_triangle(&self, triangle: &Triangle) -> CollisionResult<bool> {
        self.intersects_triangle_traced(triangle, &Tolerances::default(), &mut NoTrace)
    }

    /// Moves `triangle` into this box's local frame and runs the axis aligned box test there.
    pub fn intersects_triangle_traced<T: Tracer + ?Sized>(
        &self,
        triangle: &Triangle,
        tolerances: &Tolerances,
        tracer: &mut T,
    ) -> CollisionResult<bool> {
        let local = self.local_transform().triangle_to_local(triangle);
        crate::aabb::Aabb::new(self.half_extents).intersects_triangle_traced(
            &local,
            tolerances,
            tracer,
        )
    }
}
