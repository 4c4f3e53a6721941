//! Triangle-triangle collision.
//!
//! Two independent algorithms answer the same question:
//!
//! - [`orientation`] classifies the vertices of each triangle against the other's plane with
//!   orientation predicates and resolves a contact configuration from the same predicates.
//!   Coplanar pairs, including a pair of identical triangles, are reported as not colliding.
//! - [`sat`] runs an 11 axis separating axis test and returns the axis of least overlap.
//!   Triangles in parallel planes are also tested along their in-plane edge normals.
//!
//! [`TriTriMethod`] selects one of them behind a single call.

pub mod orientation;
pub mod sat;

use crate::error::CollisionResult;
use crate::shapes::triangle::Triangle;
use crate::tolerance::Tolerances;
use crate::trace::Tracer;
use crate::{Point3, Vector3};

/// How two intersecting triangles meet, as resolved by the orientation classifier.
///
/// The names describe the triangles after the classifier has rotated each one so that its
/// vertex 0 is the one alone on its side of the other triangle's plane.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContactCase {
    /// The far edges of both triangles cross. The normal is the cross product of those edges.
    EdgeEdgeOuter,
    /// The first triangle pokes into the face of the second. The normal is the second
    /// triangle's face normal, reversed.
    VertexFace,
    /// The second triangle pokes into the face of the first. The normal is the first
    /// triangle's face normal.
    FaceVertex,
    /// The near edges of both triangles cross. The normal is the cross product of those edges.
    EdgeEdgeInner,
}

/// Contact between two intersecting triangles.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangleContact {
    /// Unit contact normal. A heuristic choice, stable across small motions, not the unique
    /// minimum translation direction.
    pub normal: Vector3,
    /// Where the two edges named by `case` pierce the other triangle's plane.
    pub points: [Point3; 2],
    /// Which configuration produced `normal`.
    pub case: ContactCase,
}

/// Selects the triangle-triangle algorithm.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriTriMethod {
    /// Orientation predicate classifier. Reports coplanar pairs as not colliding.
    #[default]
    Orientation,
    /// Separating axis test over both face normals and the nine edge cross products.
    SeparatingAxis,
}

impl TriTriMethod {
    /// Both methods, in declaration order.
    pub const ALL: [TriTriMethod; 2] = [TriTriMethod::Orientation, TriTriMethod::SeparatingAxis];

    /// Returns true if the triangles collide according to this method.
    pub fn collide<T: Tracer + ?Sized>(
        self,
        a: &Triangle,
        b: &Triangle,
        tolerances: &Tolerances,
        tracer: &mut T,
    ) -> CollisionResult<bool> {
        match self {
            TriTriMethod::Orientation => orientation::collide_traced(a, b, tolerances, tracer),
            TriTriMethod::SeparatingAxis => {
                sat::contact_axis_traced(a, b, tolerances, tracer).map(|axis| axis.is_some())
            }
        }
    }

    /// Returns a contact normal if the triangles collide according to this method.
    ///
    /// The two methods pick different normals for the same pair; they only agree on whether
    /// there is one.
    pub fn contact_normal<T: Tracer + ?Sized>(
        self,
        a: &Triangle,
        b: &Triangle,
        tolerances: &Tolerances,
        tracer: &mut T,
    ) -> CollisionResult<Option<Vector3>> {
        match self {
            TriTriMethod::Orientation => orientation::contact_traced(a, b, tolerances, tracer)
                .map(|contact| contact.map(|c| c.normal)),
            TriTriMethod::SeparatingAxis => sat::contact_axis_traced(a, b, tolerances, tracer),
        }
    }
}
