//! Free function entry points for every supported shape pair.
//!
//! Each query comes in up to three forms: a plain one using [`Tolerances::default`], a `_with`
//! form taking explicit tolerances and a `_traced` form that also reports to a [`Tracer`].

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::CollisionResult;
use crate::shapes::obb::Obb;
use crate::shapes::triangle::Triangle;
use crate::tolerance::Tolerances;
use crate::trace::{NoTrace, Tracer};
use crate::transform::LocalTransform;
use crate::tri_tri::{self, TriTriMethod, TriangleContact};
use crate::{Matrix4, Vector3};

/// Builds the world to local matrix of `obb`.
///
/// The local to world matrix has the box axes as rotation columns and the center as
/// translation; this is its inverse.
pub fn build_obb_local_transform(obb: &Obb) -> Matrix4 {
    LocalTransform::from_obb(obb).to_local
}

/// Returns true if the two boxes overlap.
///
/// # Examples
/// ```
/// use collide3d::{obb_obb_collide, Obb, Point3};
///
/// let a = Obb::axis_aligned(Point3::origin(), [1.0, 1.0, 1.0]);
/// let near = Obb::axis_aligned(Point3::new(1.5, 0.0, 0.0), [1.0, 1.0, 1.0]);
/// let far = Obb::axis_aligned(Point3::new(2.5, 0.0, 0.0), [1.0, 1.0, 1.0]);
///
/// assert!(obb_obb_collide(&a, &near));
/// assert!(!obb_obb_collide(&a, &far));
/// ```
pub fn obb_obb_collide(a: &Obb, b: &Obb) -> bool {
    a.intersects_obb(b)
}

/// [`obb_obb_collide`] with explicit tolerances.
pub fn obb_obb_collide_with(a: &Obb, b: &Obb, tolerances: &Tolerances) -> bool {
    a.intersects_obb_traced(b, tolerances, &mut NoTrace)
}

/// [`obb_obb_collide`] with explicit tolerances and a trace sink.
pub fn obb_obb_collide_traced<T: Tracer + ?Sized>(
    a: &Obb,
    b: &Obb,
    tolerances: &Tolerances,
    tracer: &mut T,
) -> bool {
    a.intersects_obb_traced(b, tolerances, tracer)
}

/// Returns true if the triangle overlaps the box.
pub fn obb_triangle_collide(obb: &Obb, triangle: &Triangle) -> CollisionResult<bool> {
    obb.intersects_triangle(triangle)
}

/// [`obb_triangle_collide`] with explicit tolerances.
pub fn obb_triangle_collide_with(
    obb: &Obb,
    triangle: &Triangle,
    tolerances: &Tolerances,
) -> CollisionResult<bool> {
    obb.intersects_triangle_traced(triangle, tolerances, &mut NoTrace)
}

/// [`obb_triangle_collide`] with explicit tolerances and a trace sink.
pub fn obb_triangle_collide_traced<T: Tracer + ?Sized>(
    obb: &Obb,
    triangle: &Triangle,
    tolerances: &Tolerances,
    tracer: &mut T,
) -> CollisionResult<bool> {
    obb.intersects_triangle_traced(triangle, tolerances, tracer)
}

/// Returns true if any of `triangles` overlaps the box.
///
/// Fails if any triangle is degenerate, even when another one hits. With the `rayon` feature
/// the triangles are tested in parallel.
pub fn obb_triangles_collide(obb: &Obb, triangles: &[Triangle]) -> CollisionResult<bool> {
    obb_triangles_collide_with(obb, triangles, &Tolerances::default())
}

/// [`obb_triangles_collide`] with explicit tolerances.
pub fn obb_triangles_collide_with(
    obb: &Obb,
    triangles: &[Triangle],
    tolerances: &Tolerances,
) -> CollisionResult<bool> {
    let transform = obb.local_transform();
    let aabb = crate::aabb::Aabb::new(obb.half_extents);
    let test = |triangle: &Triangle| {
        aabb.intersects_triangle_traced(
            &transform.triangle_to_local(triangle),
            tolerances,
            &mut NoTrace,
        )
    };

    #[cfg(feature = "rayon")]
    {
        triangles
            .par_iter()
            .map(test)
            .try_reduce(|| false, |x, y| Ok(x || y))
    }

    #[cfg(not(feature = "rayon"))]
    {
        triangles
            .iter()
            .map(test)
            .try_fold(false, |x, y| y.map(|y| x || y))
    }
}

/// Returns true if the triangles intersect, using the orientation classifier.
///
/// Coplanar pairs are reported as not intersecting. Use [`triangle_triangle_contact_axis`]
/// when touching and overlapping coplanar contact must count.
pub fn triangle_triangle_collide(a: &Triangle, b: &Triangle) -> CollisionResult<bool> {
    tri_tri::orientation::collide(a, b)
}

/// [`triangle_triangle_collide`] with explicit tolerances.
pub fn triangle_triangle_collide_with(
    a: &Triangle,
    b: &Triangle,
    tolerances: &Tolerances,
) -> CollisionResult<bool> {
    tri_tri::orientation::collide_traced(a, b, tolerances, &mut NoTrace)
}

/// [`triangle_triangle_collide`] with explicit tolerances and a trace sink.
pub fn triangle_triangle_collide_traced<T: Tracer + ?Sized>(
    a: &Triangle,
    b: &Triangle,
    tolerances: &Tolerances,
    tracer: &mut T,
) -> CollisionResult<bool> {
    tri_tri::orientation::collide_traced(a, b, tolerances, tracer)
}

/// Full contact description from the orientation classifier.
pub fn triangle_triangle_contact(
    a: &Triangle,
    b: &Triangle,
) -> CollisionResult<Option<TriangleContact>> {
    tri_tri::orientation::contact(a, b)
}

/// Contact normal from the orientation classifier, or `None` if the triangles do not
/// intersect.
pub fn triangle_triangle_contact_normal(
    a: &Triangle,
    b: &Triangle,
) -> CollisionResult<Option<Vector3>> {
    triangle_triangle_contact_normal_with(TriTriMethod::Orientation, a, b, &Tolerances::default())
}

/// Contact normal from the chosen algorithm.
///
/// # Examples
/// ```
/// use collide3d::query::triangle_triangle_contact_normal_with;
/// use collide3d::tri_tri::TriTriMethod;
/// use collide3d::{Point3, Tolerances, Triangle};
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
/// for method in TriTriMethod::ALL {
///     let normal = triangle_triangle_contact_normal_with(method, &a, &b, &Tolerances::default());
///     assert!(normal.unwrap().is_some());
/// }
/// ```
pub fn triangle_triangle_contact_normal_with(
    method: TriTriMethod,
    a: &Triangle,
    b: &Triangle,
    tolerances: &Tolerances,
) -> CollisionResult<Option<Vector3>> {
    method.contact_normal(a, b, tolerances, &mut NoTrace)
}

/// [`triangle_triangle_contact_normal_with`] with a trace sink.
pub fn triangle_triangle_contact_normal_traced<T: Tracer + ?Sized>(
    method: TriTriMethod,
    a: &Triangle,
    b: &Triangle,
    tolerances: &Tolerances,
    tracer: &mut T,
) -> CollisionResult<Option<Vector3>> {
    method.contact_normal(a, b, tolerances, tracer)
}

/// Axis of least overlap from the triangle separating axis test, or `None` if the triangles
/// are separated.
pub fn triangle_triangle_contact_axis(
    a: &Triangle,
    b: &Triangle,
) -> CollisionResult<Option<Vector3>> {
    tri_tri::sat::contact_axis(a, b)
}

/// Every pair `(i, j)` such that `first[i]` and `second[j]` intersect, in ascending order,
/// using the orientation classifier.
pub fn triangles_collide(
    first: &[Triangle],
    second: &[Triangle],
) -> CollisionResult<Vec<(usize, usize)>> {
    triangles_collide_with(TriTriMethod::Orientation, first, second, &Tolerances::default())
}

/// [`triangles_collide`] with the chosen algorithm and explicit tolerances.
///
/// With the `rayon` feature the rows of `first` are tested in parallel.
pub fn triangles_collide_with(
    method: TriTriMethod,
    first: &[Triangle],
    second: &[Triangle],
    tolerances: &Tolerances,
) -> CollisionResult<Vec<(usize, usize)>> {
    let row = |(i, a): (usize, &Triangle)| -> CollisionResult<Vec<(usize, usize)>> {
        let mut hits = Vec::new();
        for (j, b) in second.iter().enumerate() {
            if method.collide(a, b, tolerances, &mut NoTrace)? {
                hits.push((i, j));
            }
        }
        Ok(hits)
    };

    #[cfg(feature = "rayon")]
    let rows: Vec<Vec<(usize, usize)>> = first
        .par_iter()
        .enumerate()
        .map(row)
        .collect::<CollisionResult<_>>()?;

    #[cfg(not(feature = "rayon"))]
    let rows: Vec<Vec<(usize, usize)>> = first
        .iter()
        .enumerate()
        .map(row)
        .collect::<CollisionResult<_>>()?;

    Ok(rows.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testbase::{obb_strategy, triangle_pair, triangle_strategy, unit_cube};
    use crate::{CollisionError, Point3, Real, EPSILON};
    use float_eq::assert_float_eq;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn unit_cubes_overlap_then_separate() {
        let a = unit_cube(Point3::origin());
        assert!(obb_obb_collide(&a, &unit_cube(Point3::new(1.5, 0.0, 0.0))));
        assert!(!obb_obb_collide(&a, &unit_cube(Point3::new(2.5, 0.0, 0.0))));
    }

    #[test]
    fn crossing_triangles_collide() {
        let (a, b) = triangle_pair();
        assert_eq!(triangle_triangle_collide(&a, &b), Ok(true));
        assert!(triangle_triangle_contact_normal(&a, &b).unwrap().is_some());
        assert_eq!(triangle_triangle_contact_axis(&a, &b), Ok(Some(Vector3::z())));
        assert_eq!(
            triangle_triangle_contact(&a, &b).unwrap().map(|c| c.case),
            Some(crate::tri_tri::ContactCase::EdgeEdgeInner)
        );
    }

    #[test]
    fn triangle_above_box_misses() {
        let obb = Obb::axis_aligned(Point3::new(0.0, 0.0, 0.0), [1.0, 1.0, 1.0]);
        let above = Triangle::new(
            Point3::new(-1.0, -1.0, 1.5),
            Point3::new(1.0, -1.0, 1.5),
            Point3::new(0.0, 1.0, 1.2),
        );
        assert_eq!(obb_triangle_collide(&obb, &above), Ok(false));
    }

    #[test]
    fn local_transform_moves_center_to_origin() {
        let obb = Obb::axis_aligned(Point3::new(3.0, -1.0, 2.0), [1.0, 1.0, 1.0]);
        let matrix = build_obb_local_transform(&obb);
        let local = matrix * obb.center.to_homogeneous();
        assert_float_eq!(local.x, 0.0, abs <= EPSILON);
        assert_float_eq!(local.y, 0.0, abs <= EPSILON);
        assert_float_eq!(local.z, 0.0, abs <= EPSILON);
        assert_eq!(local.w, 1.0);
    }

    #[test]
    fn batch_of_triangles_against_a_box() {
        let obb = unit_cube(Point3::origin());
        let miss = Triangle::new(
            Point3::new(5.0, 5.0, 5.0),
            Point3::new(6.0, 5.0, 5.0),
            Point3::new(5.0, 6.0, 5.0),
        );
        let (hit, _) = triangle_pair();
        assert_eq!(obb_triangles_collide(&obb, &[miss, miss]), Ok(false));
        assert_eq!(obb_triangles_collide(&obb, &[miss, hit, miss]), Ok(true));
        assert_eq!(obb_triangles_collide(&obb, &[]), Ok(false));

        let p = Point3::origin();
        let degenerate = Triangle::new(p, p, p);
        assert!(matches!(
            obb_triangles_collide(&obb, &[hit, degenerate]),
            Err(CollisionError::DegenerateTriangle { .. })
        ));
    }

    #[test]
    fn pairwise_triangle_hits() {
        let (a, b) = triangle_pair();
        let far = Triangle::from(a.vertices.map(|v| v + Vector3::new(0.0, 0.0, 10.0)));
        let hits = triangles_collide(&[a, far, b], &[b, a]).unwrap();
        assert_eq!(hits, vec![(0, 0), (2, 1)]);

        let by_axes =
            triangles_collide_with(TriTriMethod::SeparatingAxis, &[a, far], &[b, a], &Tolerances::default())
                .unwrap();
        // The separating axis test counts a triangle as touching itself.
        assert_eq!(by_axes, vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn seeded_sweep_matches_per_triangle_queries() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut coordinate = || rng.random_range(-3.0..3.0) as Real;
        let obb = Obb::from_rotation(
            Point3::new(0.5, -0.5, 0.25),
            [1.0, 0.5, 2.0],
            nalgebra::UnitQuaternion::from_euler_angles(0.4, 0.2, -0.7),
        );
        let triangles: Vec<Triangle> = (0..64)
            .map(|_| {
                Triangle::new(
                    Point3::new(coordinate(), coordinate(), coordinate()),
                    Point3::new(coordinate(), coordinate(), coordinate()),
                    Point3::new(coordinate(), coordinate(), coordinate()),
                )
            })
            .collect();
        let any = triangles
            .iter()
            .map(|t| obb_triangle_collide(&obb, t).unwrap())
            .any(|hit| hit);
        assert_eq!(obb_triangles_collide(&obb, &triangles), Ok(any));
    }

    proptest! {
        // The batch helper agrees with testing each triangle on its own.
        #[test]
        fn test_batch_matches_single(obb in obb_strategy(),
                                     triangles in prop::collection::vec(triangle_strategy(), 0..8)) {
            prop_assume!(triangles.iter().all(|t| t.area2() > 1e-2));
            let expected = triangles
                .iter()
                .map(|t| obb_triangle_collide(&obb, t).unwrap())
                .any(|hit| hit);
            prop_assert_eq!(obb_triangles_collide(&obb, &triangles), Ok(expected));
        }
    }
}

#[cfg(all(feature = "bench", test))]
mod bench {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use test::{black_box, Bencher};

    use super::*;
    use crate::testbase::unit_cube;
    use crate::{Point3, Real};

    /// Generate a deterministic random triangle with coordinates in `-2..2`.
    fn random_triangle(rng: &mut StdRng) -> Triangle {
        let mut point = || {
            Point3::new(
                rng.random_range(-2.0..2.0) as Real,
                rng.random_range(-2.0..2.0) as Real,
                rng.random_range(-2.0..2.0) as Real,
            )
        };
        Triangle::new(point(), point(), point())
    }

    fn random_triangles(count: usize) -> Vec<Triangle> {
        let mut rng = StdRng::seed_from_u64(0);
        black_box((0..count).map(|_| random_triangle(&mut rng)).collect())
    }

    #[bench]
    fn bench_obb_triangles_1k(b: &mut Bencher) {
        let obb = unit_cube(Point3::origin());
        let triangles = random_triangles(1000);
        b.iter(|| black_box(obb_triangles_collide(&obb, &triangles)));
    }

    fn bench_method(b: &mut Bencher, method: TriTriMethod) {
        let triangles = random_triangles(1000);
        let tolerances = Tolerances::default();
        b.iter(|| {
            for pair in triangles.chunks_exact(2) {
                black_box(method.collide(&pair[0], &pair[1], &tolerances, &mut NoTrace)).ok();
            }
        });
    }

    #[bench]
    fn bench_triangle_pairs_orientation(b: &mut Bencher) {
        bench_method(b, TriTriMethod::Orientation);
    }

    #[bench]
    fn bench_triangle_pairs_separating_axis(b: &mut Bencher) {
        bench_method(b, TriTriMethod::SeparatingAxis);
    }
}
