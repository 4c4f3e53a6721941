//! Separating axis test for triangle pairs.

use crate::error::CollisionResult;
use crate::shapes::triangle::Triangle;
use crate::tolerance::Tolerances;
use crate::trace::{emit, NoTrace, Operand, SeparatingAxis, TraceEvent, Tracer};
use crate::{Real, Vector3};

/// The eleven candidate axes: both face normals, then every edge of `a` crossed with every
/// edge of `b`. None of them are normalized.
fn candidate_axes(a: &Triangle, b: &Triangle) -> [(SeparatingAxis, Vector3); 11] {
    let edges_a = a.edges();
    let edges_b = b.edges();
    let mut axes = [(SeparatingAxis::TriangleFace(Operand::A), Vector3::zeros()); 11];
    axes[0].1 = a.normal();
    axes[1] = (SeparatingAxis::TriangleFace(Operand::B), b.normal());
    for (i, edge_a) in edges_a.iter().enumerate() {
        for (j, edge_b) in edges_b.iter().enumerate() {
            axes[2 + 3 * i + j] = (
                SeparatingAxis::TriangleEdgeCross { a: i, b: j },
                edge_a.cross(edge_b),
            );
        }
    }
    axes
}

/// Returns true if the face normals of `a` and `b` are parallel, that is when the squared
/// sine of the angle between them is at most `tolerances.axis_epsilon`.
fn normals_parallel(a: &Triangle, b: &Triangle, tolerances: &Tolerances) -> bool {
    let (na, nb) = (a.normal(), b.normal());
    na.cross(&nb).norm_squared() <= tolerances.axis_epsilon * na.norm_squared() * nb.norm_squared()
}

/// The in-plane normal of every edge of both triangles, each the face normal of `a` crossed
/// with the edge.
///
/// For triangles in parallel planes all eleven candidate axes collapse onto the shared face
/// normal, so these six are needed to separate coplanar triangles that lie side by side.
fn edge_normal_axes(a: &Triangle, b: &Triangle) -> [(SeparatingAxis, Vector3); 6] {
    let normal = a.normal();
    let mut axes = [(SeparatingAxis::TriangleFace(Operand::A), Vector3::zeros()); 6];
    for (k, (triangle, operand)) in [(a, Operand::A), (b, Operand::B)].into_iter().enumerate() {
        for (edge, direction) in triangle.edges().iter().enumerate() {
            axes[3 * k + edge] = (
                SeparatingAxis::TriangleEdgeNormal {
                    triangle: operand,
                    edge,
                },
                normal.cross(direction),
            );
        }
    }
    axes
}

/// Returns the axis of least overlap if the triangles intersect, `None` if some axis
/// separates them.
///
/// The axis is unit length and points from the centroid of `a` toward the centroid of `b`.
/// Touching triangles count as intersecting. When the two planes are parallel the in-plane
/// edge normals of both triangles are tested as well, so coplanar triangles intersect only
/// if they overlap within their shared plane.
///
/// # Examples
/// ```
/// use collide3d::tri_tri::sat::contact_axis;
/// use collide3d::{Point3, Triangle, Vector3};
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
/// assert_eq!(contact_axis(&a, &b), Ok(Some(Vector3::z())));
/// assert!(contact_axis(&a, &a).unwrap().is_some());
/// ```
pub fn contact_axis(a: &Triangle, b: &Triangle) -> CollisionResult<Option<Vector3>> {
    contact_axis_traced(a, b, &Tolerances::default(), &mut NoTrace)
}

/// Same as [`contact_axis`] with explicit tolerances and a trace sink.
///
/// Cross products shorter than `tolerances.degenerate_epsilon` (squared) come from parallel
/// edges and are skipped.
pub fn contact_axis_traced<T: Tracer + ?Sized>(
    a: &Triangle,
    b: &Triangle,
    tolerances: &Tolerances,
    tracer: &mut T,
) -> CollisionResult<Option<Vector3>> {
    a.check_degenerate(tolerances)?;
    b.check_degenerate(tolerances)?;

    let in_plane = normals_parallel(a, b, tolerances).then(|| edge_normal_axes(a, b));
    let axes = candidate_axes(a, b)
        .into_iter()
        .chain(in_plane.into_iter().flatten());

    let mut best: Option<(SeparatingAxis, Vector3, Real)> = None;
    for (id, axis) in axes {
        let length_squared = axis.norm_squared();
        if length_squared <= tolerances.degenerate_epsilon {
            continue;
        }
        let axis = axis / length_squared.sqrt();

        let overlap = a.project(&axis).overlap(&b.project(&axis));
        if overlap < 0.0 {
            emit(
                tracer,
                TraceEvent::Separated {
                    axis: id,
                    gap: -overlap,
                },
            );
            return Ok(None);
        }
        if best.map_or(true, |(_, _, least)| overlap < least) {
            best = Some((id, axis, overlap));
        }
    }

    let toward_b = b.centroid() - a.centroid();
    Ok(best.map(|(id, axis, overlap)| {
        emit(tracer, TraceEvent::AxisSelected { axis: id, overlap });
        if axis.dot(&toward_b) < 0.0 {
            -axis
        } else {
            axis
        }
    }))
}

/// Returns true if no candidate axis separates the triangles.
pub fn collide(a: &Triangle, b: &Triangle) -> CollisionResult<bool> {
    Ok(contact_axis(a, b)?.is_some())
}
