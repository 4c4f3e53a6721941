#![no_main]
use std::fmt::{self, Debug, Formatter};

use approx::relative_eq;
use arbitrary::Arbitrary;
use collide3d::query::obb_obb_collide_traced;
use collide3d::tri_tri::TriTriMethod;
use collide3d::{NoTrace, Obb, Point3, Tolerances, TraceEvent, Triangle, Vector3};
use libfuzzer_sys::fuzz_target;
use nalgebra::UnitQuaternion;
use ordered_float::NotNan;

type Float = f32;
const LIMIT: Float = 1_000.0;

fuzz_target!(|workload: Workload| {
    workload.fuzz();
});

#[derive(Arbitrary)]
struct ArbitraryVector {
    coordinates: [NotNan<Float>; 3],
}

impl ArbitraryVector {
    fn vector(&self) -> Vector3 {
        Vector3::from_iterator(
            self.coordinates
                .iter()
                .map(|f| f.into_inner().clamp(-LIMIT, LIMIT)),
        )
    }

    fn point(&self) -> Point3 {
        Point3::from(self.vector())
    }
}

#[derive(Arbitrary)]
struct ArbitraryObb {
    center: ArbitraryVector,
    half_extents: ArbitraryVector,
    rotation: ArbitraryVector,
}

impl Debug for ArbitraryObb {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(&self.obb(), f)
    }
}

impl ArbitraryObb {
    fn obb(&self) -> Obb {
        let extents = self.half_extents.vector().abs();
        Obb::from_rotation(
            self.center.point(),
            [extents.x, extents.y, extents.z],
            UnitQuaternion::from_scaled_axis(self.rotation.vector() / LIMIT * 4.0),
        )
    }
}

#[derive(Arbitrary)]
struct ArbitraryTriangle {
    vertices: [ArbitraryVector; 3],
}

impl Debug for ArbitraryTriangle {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(&self.triangle(), f)
    }
}

impl ArbitraryTriangle {
    fn triangle(&self) -> Triangle {
        Triangle::from(self.vertices.each_ref().map(ArbitraryVector::point))
    }
}

#[derive(Debug, Arbitrary)]
struct Workload {
    obbs: [ArbitraryObb; 2],
    triangles: [ArbitraryTriangle; 2],
}

/// Largest gap reported by a separating axis, or zero if nothing separated the shapes.
fn traced_gap(events: &[TraceEvent]) -> Float {
    events
        .iter()
        .filter_map(|event| match event {
            TraceEvent::Separated { gap, .. } => Some(*gap),
            _ => None,
        })
        .fold(0.0, Float::max)
}

impl Workload {
    fn fuzz(self) {
        let tolerances = Tolerances::default();
        let [a, b] = self.obbs.each_ref().map(ArbitraryObb::obb);

        // A box always overlaps itself.
        assert!(obb_obb_collide_traced(&a, &a, &tolerances, &mut NoTrace));

        // Argument order may only matter when the boxes are within rounding of touching.
        let mut forward = Vec::new();
        let mut backward = Vec::new();
        let ab = obb_obb_collide_traced(&a, &b, &tolerances, &mut |e: TraceEvent| forward.push(e));
        let ba = obb_obb_collide_traced(&b, &a, &tolerances, &mut |e: TraceEvent| backward.push(e));
        if ab != ba {
            let gap = traced_gap(&forward).max(traced_gap(&backward));
            assert!(gap <= LIMIT * 1e-3, "asymmetric verdict with gap {gap}");
        }

        // Check that these don't panic.
        for triangle in &self.triangles {
            let _ = a.intersects_triangle(&triangle.triangle());
        }

        let [s, t] = self.triangles.each_ref().map(ArbitraryTriangle::triangle);
        let mut verdicts = Vec::new();
        for method in TriTriMethod::ALL {
            let collided = method.collide(&s, &t, &tolerances, &mut NoTrace);
            let normal = method.contact_normal(&s, &t, &tolerances, &mut NoTrace);
            match (collided, normal) {
                (Ok(collided), Ok(normal)) => {
                    assert_eq!(collided, normal.is_some());
                    if let Some(normal) = normal {
                        assert!(
                            relative_eq!(normal.norm(), 1.0, epsilon = 1e-3),
                            "{normal:?}"
                        );
                    }
                    verdicts.push(collided);
                }
                (Err(_), Err(_)) => {}
                (collided, normal) => panic!("inconsistent results {collided:?} {normal:?}"),
            }
        }

        // Both methods reject the same degenerate inputs.
        assert!(verdicts.is_empty() || verdicts.len() == TriTriMethod::ALL.len());
    }
}
