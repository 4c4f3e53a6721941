//! Orientation predicate classifier for triangle pairs.
//!
//! Each triangle is first tested against the other's supporting plane. If both straddle, the
//! triangles are rotated so that vertex 0 of each is the vertex alone on its side, and then
//! flipped so that each lone vertex lies on the positive side of the other triangle. In that
//! canonical form the two intervals cut out of the line where the planes meet overlap exactly
//! when two more orientation predicates are non-positive, so the line never has to be built.

use crate::error::CollisionResult;
use crate::predicates::{orientation_sign, Sign};
use crate::shapes::triangle::Triangle;
use crate::tolerance::Tolerances;
use crate::trace::{emit, NoTrace, Operand, TraceEvent, Tracer};
use crate::tri_tri::{ContactCase, TriangleContact};
use crate::{Point3, Real, Vector3};

/// Both triangles after canonicalization.
struct Canonical {
    a: [Point3; 3],
    b: [Point3; 3],
}

/// How a triangle sits relative to another triangle's plane.
enum PlaneSide {
    /// Every vertex strictly on the same side.
    Separated,
    /// At least one vertex inside the sign band.
    Touching,
    /// Vertices strictly on both sides. Holds the sign of the lone vertex and its index.
    Straddling { lone: usize, sign: Sign },
}

fn plane_side(plane: &Triangle, points: &Triangle, epsilon: Real) -> PlaneSide {
    let [p, q, r] = &plane.vertices;
    let signs = points
        .vertices
        .map(|s| orientation_sign(p, q, r, &s, epsilon));

    if signs[0] == signs[1] && signs[1] == signs[2] && signs[0] != Sign::Zero {
        return PlaneSide::Separated;
    }
    if signs.contains(&Sign::Zero) {
        return PlaneSide::Touching;
    }
    let lone = if signs[0] == signs[1] {
        2
    } else if signs[0] == signs[2] {
        1
    } else {
        0
    };
    PlaneSide::Straddling {
        lone,
        sign: signs[lone],
    }
}

/// Rotates `vertices` so that `lone` comes first, keeping the winding.
fn lone_vertex_first(vertices: [Point3; 3], lone: usize) -> [Point3; 3] {
    let [v0, v1, v2] = vertices;
    match lone {
        1 => [v1, v2, v0],
        2 => [v2, v0, v1],
        _ => vertices,
    }
}

fn classify<T: Tracer + ?Sized>(
    a: &Triangle,
    b: &Triangle,
    tolerances: &Tolerances,
    tracer: &mut T,
) -> CollisionResult<Option<Canonical>> {
    a.check_degenerate(tolerances)?;
    b.check_degenerate(tolerances)?;
    let epsilon = tolerances.sign_epsilon;

    let mut straddle = |plane: &Triangle, points: &Triangle, operand: Operand| {
        match plane_side(plane, points, epsilon) {
            PlaneSide::Separated => {
                emit(&mut *tracer, TraceEvent::PlaneSide { plane: operand });
                None
            }
            PlaneSide::Touching => {
                emit(&mut *tracer, TraceEvent::Coplanar);
                None
            }
            PlaneSide::Straddling { lone, sign } => Some((lone, sign)),
        }
    };

    let Some((lone_a, side_a)) = straddle(b, a, Operand::B) else {
        return Ok(None);
    };
    let Some((lone_b, side_b)) = straddle(a, b, Operand::A) else {
        return Ok(None);
    };

    let mut pa = lone_vertex_first(a.vertices, lone_a);
    let mut pb = lone_vertex_first(b.vertices, lone_b);

    // Rotations keep the winding, so the lone vertex of b still has sign `side_b` against a.
    if side_b == Sign::Negative {
        pa.swap(1, 2);
    }
    if side_a == Sign::Negative {
        pb.swap(1, 2);
    }

    let overlap = orientation_sign(&pa[0], &pa[1], &pb[0], &pb[1], epsilon) != Sign::Positive
        && orientation_sign(&pa[0], &pa[2], &pb[2], &pb[0], epsilon) != Sign::Positive;
    if !overlap {
        emit(tracer, TraceEvent::StraddleRejected);
        return Ok(None);
    }

    Ok(Some(Canonical { a: pa, b: pb }))
}

/// Returns true if the triangles intersect.
///
/// Pairs with a vertex on the other triangle's plane, coplanar pairs included, are reported
/// as not intersecting.
///
/// # Examples
/// ```
/// use collide3d::tri_tri::orientation::collide;
/// use collide3d::{Point3, Triangle};
///
/// let a = Triangle::new(
///     Point3::new(-1.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
/// );
/// let b = Triangle::new(
///     Point3::new(0.0, 0.0, -1.0),
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(0.0, 1.0, 1.0),
/// );
/// assert_eq!(collide(&a, &b), Ok(true));
/// assert_eq!(collide(&a, &a), Ok(false));
/// ```
pub fn collide(a: &Triangle, b: &Triangle) -> CollisionResult<bool> {
    collide_traced(a, b, &Tolerances::default(), &mut NoTrace)
}

/// Same as [`collide`] with explicit tolerances and a trace sink.
pub fn collide_traced<T: Tracer + ?Sized>(
    a: &Triangle,
    b: &Triangle,
    tolerances: &Tolerances,
    tracer: &mut T,
) -> CollisionResult<bool> {
    Ok(classify(a, b, tolerances, tracer)?.is_some())
}

/// Returns the contact between two intersecting triangles, or `None` if they do not intersect.
pub fn contact(a: &Triangle, b: &Triangle) -> CollisionResult<Option<TriangleContact>> {
    contact_traced(a, b, &Tolerances::default(), &mut NoTrace)
}

/// Same as [`contact`] with explicit tolerances and a trace sink.
pub fn contact_traced<T: Tracer + ?Sized>(
    a: &Triangle,
    b: &Triangle,
    tolerances: &Tolerances,
    tracer: &mut T,
) -> CollisionResult<Option<TriangleContact>> {
    let Some(Canonical { a, b }) = classify(a, b, tolerances, tracer)? else {
        return Ok(None);
    };
    let epsilon = tolerances.sign_epsilon;

    let na = unit_or(face_normal(&a), Vector3::z());
    let nb = unit_or(face_normal(&b), Vector3::z());

    let outer_a = orientation_sign(&a[0], &a[2], &b[1], &b[0], epsilon) == Sign::Positive;
    let outer_b = orientation_sign(&a[0], &a[1], &b[2], &b[0], epsilon) == Sign::Positive;

    let contact = match (outer_a, outer_b) {
        (true, true) => TriangleContact {
            normal: unit_or((b[0] - b[2]).cross(&(a[0] - a[2])), na),
            points: [
                plane_intersection(&a[0], &a[2], &b[0], &nb, epsilon),
                plane_intersection(&b[0], &b[2], &a[0], &na, epsilon),
            ],
            case: ContactCase::EdgeEdgeOuter,
        },
        (true, false) => TriangleContact {
            normal: -nb,
            points: [
                plane_intersection(&a[0], &a[2], &b[0], &nb, epsilon),
                plane_intersection(&a[0], &a[1], &b[0], &nb, epsilon),
            ],
            case: ContactCase::VertexFace,
        },
        (false, true) => TriangleContact {
            normal: na,
            points: [
                plane_intersection(&b[0], &b[1], &a[0], &na, epsilon),
                plane_intersection(&b[0], &b[2], &a[0], &na, epsilon),
            ],
            case: ContactCase::FaceVertex,
        },
        (false, false) => TriangleContact {
            normal: unit_or((a[0] - a[1]).cross(&(b[0] - b[1])), na),
            points: [
                plane_intersection(&b[0], &b[1], &a[0], &na, epsilon),
                plane_intersection(&a[0], &a[1], &b[0], &nb, epsilon),
            ],
            case: ContactCase::EdgeEdgeInner,
        },
    };

    emit(tracer, TraceEvent::Contact(contact.case));
    Ok(Some(contact))
}

fn face_normal(vertices: &[Point3; 3]) -> Vector3 {
    (vertices[1] - vertices[0]).cross(&(vertices[2] - vertices[0]))
}

/// Normalizes `v`, or returns `fallback` if `v` has no direction.
fn unit_or(v: Vector3, fallback: Vector3) -> Vector3 {
    v.try_normalize(0.0).unwrap_or(fallback)
}

/// Where the line through `from` and `to` crosses the plane through `origin` with `normal`.
/// Returns `from` if the line runs parallel to the plane.
fn plane_intersection(
    from: &Point3,
    to: &Point3,
    origin: &Point3,
    normal: &Vector3,
    epsilon: Real,
) -> Point3 {
    let direction = to - from;
    let denominator = normal.dot(&direction);
    if denominator.abs() <= epsilon {
        return *from;
    }
    from + direction * (normal.dot(&(origin - from)) / denominator)
}

#[cfg(test)]
mod tests {
    use super::{collide, collide_traced, contact, contact_traced, plane_intersection};
    use crate::testbase::{triangle_pair, triangle_strategy};
    use crate::trace::{Operand, TraceEvent};
    use crate::tri_tri::ContactCase;
    use crate::{CollisionError, Point3, Real, Tolerances, Triangle, Vector3};
    use float_eq::assert_float_eq;
    use proptest::prelude::*;

    fn triangle(v: [[Real; 3]; 3]) -> Triangle {
        Triangle::from(v.map(|[x, y, z]| Point3::new(x, y, z)))
    }

    fn assert_vector_eq(got: &Vector3, expected: [Real; 3]) {
        for (g, e) in got.iter().zip(expected.iter()) {
            assert_float_eq!(*g, *e, abs <= 1e-5, "got {:?}, expected {:?}", got, expected);
        }
    }

    fn events_of(a: &Triangle, b: &Triangle) -> Vec<TraceEvent> {
        let mut events = Vec::new();
        contact_traced(a, b, &Tolerances::default(), &mut |e: TraceEvent| events.push(e)).unwrap();
        events
    }

    #[test]
    fn crossing_pair_collides_edge_to_edge() {
        let (a, b) = triangle_pair();
        assert_eq!(collide(&a, &b), Ok(true));

        let contact = contact(&a, &b).unwrap().unwrap();
        assert_eq!(contact.case, ContactCase::EdgeEdgeInner);
        assert_vector_eq(&contact.normal, [0.0, -0.894_427_2, 0.447_213_6]);
        assert_vector_eq(&contact.points[0].coords, [0.0, 0.5, 0.0]);
        assert_vector_eq(&contact.points[1].coords, [0.0, 0.0, 0.0]);

        // Swapping the arguments flips the normal.
        let swapped = super::contact(&b, &a).unwrap().unwrap();
        assert_eq!(swapped.case, ContactCase::EdgeEdgeInner);
        assert_vector_eq(&swapped.normal, [0.0, 0.894_427_2, -0.447_213_6]);
    }

    #[test]
    fn every_contact_case_is_reachable() {
        let cases = [
            (
                [[0.5, -1.0, 1.0], [-2.0, -1.5, 2.0], [-1.5, 0.5, -2.0]],
                [[2.0, -0.5, -2.0], [-1.5, 1.0, 1.0], [-1.5, -0.5, -1.5]],
                ContactCase::EdgeEdgeInner,
                [0.816_621_6, 0.494_922_2, -0.296_953_3],
            ),
            (
                [[0.0, 2.0, 0.5], [-1.0, 0.5, -0.5], [2.0, 2.0, 2.0]],
                [[0.5, -0.5, -0.5], [-0.5, 1.0, -0.5], [-0.5, 2.0, 1.5]],
                ContactCase::VertexFace,
                [-0.801_783_7, -0.534_522_5, 0.267_261_2],
            ),
            (
                [[1.0, -0.5, -0.5], [-2.0, 0.0, -0.5], [0.0, 2.0, -0.5]],
                [[0.5, 0.0, 2.0], [1.0, -1.0, -2.0], [0.5, 1.5, 2.0]],
                ContactCase::EdgeEdgeOuter,
                [-0.141_222_9, -0.847_337_4, 0.511_933_0],
            ),
            (
                [[0.0, -1.5, 2.0], [-2.0, 0.5, 1.5], [2.0, 2.0, -1.5]],
                [[0.0, 2.0, 1.0], [0.5, 0.0, 1.0], [0.5, -1.0, 0.5]],
                ContactCase::FaceVertex,
                [0.360_094_1, 0.548_714_8, 0.754_482_8],
            ),
        ];
        for (a, b, case, normal) in cases {
            let (a, b) = (triangle(a), triangle(b));
            let contact = contact(&a, &b).unwrap().unwrap();
            assert_eq!(contact.case, case);
            assert_vector_eq(&contact.normal, normal);
            assert_eq!(events_of(&a, &b), vec![TraceEvent::Contact(case)]);
        }
    }

    #[test]
    fn parallel_planes_are_separated() {
        let (a, _) = triangle_pair();
        let lifted = Triangle::from(a.vertices.map(|v| v + Vector3::z()));
        assert_eq!(collide(&a, &lifted), Ok(false));
        assert_eq!(
            events_of(&a, &lifted),
            vec![TraceEvent::PlaneSide { plane: Operand::B }]
        );
    }

    #[test]
    fn coplanar_pairs_report_no_collision() {
        let (a, _) = triangle_pair();
        assert_eq!(collide(&a, &a), Ok(false));
        assert_eq!(events_of(&a, &a), vec![TraceEvent::Coplanar]);

        let shifted = Triangle::from(a.vertices.map(|v| v + Vector3::new(0.25, 0.1, 0.0)));
        assert_eq!(collide(&a, &shifted), Ok(false));
    }

    #[test]
    fn vertex_touching_plane_reports_no_collision() {
        let a = triangle([[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = triangle([[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0]]);
        assert_eq!(collide(&a, &b), Ok(false));
        assert_eq!(events_of(&a, &b), vec![TraceEvent::Coplanar]);
    }

    #[test]
    fn straddling_but_apart() {
        // Each triangle crosses the other's plane, but b meets the line x = 0.25, z = 0 at
        // y > 3, beyond the end of a.
        let a = triangle([[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = triangle([[0.25, 5.0, -1.0], [0.25, 5.0, 1.0], [0.25, 3.0, 0.5]]);
        let mut events = Vec::new();
        let hit = collide_traced(&a, &b, &Tolerances::default(), &mut |e: TraceEvent| {
            events.push(e)
        });
        assert_eq!(hit, Ok(false));
        assert_eq!(events, vec![TraceEvent::StraddleRejected]);
    }

    #[test]
    fn degenerate_input_is_an_error() {
        let (a, _) = triangle_pair();
        let p = Point3::new(0.5, 0.5, 0.5);
        let point = Triangle::new(p, p, p);
        assert_eq!(
            collide(&a, &point),
            Err(CollisionError::DegenerateTriangle {
                normal_length_squared: 0.0
            })
        );
        assert!(contact(&point, &a).is_err());
    }

    #[test]
    fn plane_intersection_of_crossing_segment() {
        let hit = plane_intersection(
            &Point3::new(0.0, 0.0, -1.0),
            &Point3::new(0.0, 0.0, 3.0),
            &Point3::new(5.0, 5.0, 0.0),
            &Vector3::z(),
            1e-7,
        );
        assert_eq!(hit, Point3::origin());

        let parallel = plane_intersection(
            &Point3::new(0.0, 0.0, 1.0),
            &Point3::new(1.0, 0.0, 1.0),
            &Point3::origin(),
            &Vector3::z(),
            1e-7,
        );
        assert_eq!(parallel, Point3::new(0.0, 0.0, 1.0));
    }

    proptest! {
        // Contact normals are unit length and the contact exists exactly when the pair collides.
        #[test]
        fn test_contact_matches_collide(a in triangle_strategy(), b in triangle_strategy()) {
            prop_assume!(a.area2() > 1e-2 && b.area2() > 1e-2);
            let hit = collide(&a, &b).unwrap();
            let contact = contact(&a, &b).unwrap();
            prop_assert_eq!(hit, contact.is_some());
            if let Some(contact) = contact {
                prop_assert!((contact.normal.norm() - 1.0).abs() < 1e-4);
            }
        }

        // Reversing the winding of either triangle does not change the verdict.
        #[test]
        fn test_winding_does_not_matter(a in triangle_strategy(), b in triangle_strategy()) {
            prop_assume!(a.area2() > 1e-2 && b.area2() > 1e-2);
            let expected = collide(&a, &b).unwrap();
            prop_assert_eq!(collide(&a.flipped(), &b).unwrap(), expected);
            prop_assert_eq!(collide(&a, &b.flipped()).unwrap(), expected);
        }
    }
}
