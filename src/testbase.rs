//! Common utilities shared by unit tests.
#![cfg(test)]

use nalgebra::UnitQuaternion;
use proptest::prelude::*;

use crate::{Obb, Point3, Real, Triangle, Vector3};

/// A vector represented as a tuple
pub type TupleVec = (Real, Real, Real);

/// Generate a `TupleVec` for [`proptest::strategy::Strategy`] from -10 to 10.
/// Small enough that products of a few coordinates stay far from `Real` precision limits.
pub fn tuplevec_small_strategy() -> impl Strategy<Value = TupleVec> {
    (
        -10.0 as Real..10.0 as Real,
        -10.0 as Real..10.0 as Real,
        -10.0 as Real..10.0 as Real,
    )
}

/// Convert a `TupleVec` to a [`Point3`].
pub fn tuple_to_point(tpl: &TupleVec) -> Point3 {
    Point3::new(tpl.0, tpl.1, tpl.2)
}

/// Convert a `TupleVec` to a [`Vector3`].
pub fn tuple_to_vector(tpl: &TupleVec) -> Vector3 {
    Vector3::new(tpl.0, tpl.1, tpl.2)
}

/// Generate a [`Triangle`] with vertices from [`tuplevec_small_strategy`]. May be degenerate.
pub fn triangle_strategy() -> impl Strategy<Value = Triangle> {
    (
        tuplevec_small_strategy(),
        tuplevec_small_strategy(),
        tuplevec_small_strategy(),
    )
        .prop_map(|(a, b, c)| {
            Triangle::new(tuple_to_point(&a), tuple_to_point(&b), tuple_to_point(&c))
        })
}

/// Generate an arbitrarily rotated [`Obb`] with half extents between 0.1 and 3.
pub fn obb_strategy() -> impl Strategy<Value = Obb> {
    let extent = 0.1 as Real..3.0 as Real;
    let angle = -3.0 as Real..3.0 as Real;
    (
        tuplevec_small_strategy(),
        (extent.clone(), extent.clone(), extent),
        (angle.clone(), angle.clone(), angle),
    )
        .prop_map(|(center, (hx, hy, hz), rotation)| {
            Obb::from_rotation(
                tuple_to_point(&center),
                [hx, hy, hz],
                UnitQuaternion::from_scaled_axis(tuple_to_vector(&rotation)),
            )
        })
}

/// A cube with half extent 1 and identity axes.
pub fn unit_cube(center: Point3) -> Obb {
    Obb::axis_aligned(center, [1.0, 1.0, 1.0])
}

/// Two triangles that cross each other along a shared segment of the y axis.
///
/// The first lies in the plane z = 0, the second in the plane x = 0.
pub fn triangle_pair() -> (Triangle, Triangle) {
    (
        Triangle::new(
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ),
        Triangle::new(
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ),
    )
}
