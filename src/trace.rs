//! Explicit trace sink for the collision predicates.
//!
//! Every predicate has a `_traced` form that reports why it reached its verdict to a
//! caller-supplied [`Tracer`]. The plain forms pass [`NoTrace`]. Each event is also forwarded
//! to the `tracing` crate at `TRACE` level, so an installed subscriber sees the same stream.

use crate::axis::Axis;
use crate::tri_tri::ContactCase;
use crate::Real;

/// One of the two operands of a pairwise predicate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The first argument.
    A,
    /// The second argument.
    B,
}

/// Identifies a candidate separating axis of one of the separating axis tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SeparatingAxis {
    /// Box-box: a face axis of the first box.
    ObbFaceA(Axis),
    /// Box-box: a face axis of the second box.
    ObbFaceB(Axis),
    /// Box-box: the cross product of an axis of each box.
    ObbEdgeCross {
        /// Axis of the first box.
        a: Axis,
        /// Axis of the second box.
        b: Axis,
    },
    /// Box-triangle: the triangle's face normal.
    TriangleNormal,
    /// Box-triangle: a face axis of the box, in its local frame.
    AabbFace(Axis),
    /// Box-triangle: a box axis crossed with a triangle edge.
    AabbEdgeCross {
        /// Box axis.
        axis: Axis,
        /// Index of the triangle edge `v[edge] -> v[(edge + 1) % 3]`.
        edge: usize,
    },
    /// Triangle-triangle: the face normal of one triangle.
    TriangleFace(Operand),
    /// Triangle-triangle: an edge of the first triangle crossed with an edge of the second.
    TriangleEdgeCross {
        /// Edge index in the first triangle.
        a: usize,
        /// Edge index in the second triangle.
        b: usize,
    },
    /// Triangle-triangle, parallel planes only: the in-plane normal of one triangle's edge.
    TriangleEdgeNormal {
        /// The triangle the edge belongs to.
        triangle: Operand,
        /// Edge index in that triangle.
        edge: usize,
    },
}

/// What a predicate observed while deciding.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TraceEvent {
    /// A separating axis test rejected the pair. `gap` is how far apart the projections are
    /// along the (possibly unnormalized) axis.
    Separated {
        /// The axis that separates the shapes.
        axis: SeparatingAxis,
        /// Positive distance between the projected intervals.
        gap: Real,
    },
    /// All vertices of one triangle lie strictly on one side of the plane of `plane`.
    PlaneSide {
        /// The triangle whose supporting plane separates the pair.
        plane: Operand,
    },
    /// A vertex lies on the other triangle's plane. The classifier reports no collision.
    Coplanar,
    /// Both triangles straddle each other's plane but their intervals on the line where the
    /// planes meet are disjoint.
    StraddleRejected,
    /// The classifier found a collision and resolved its contact configuration.
    Contact(ContactCase),
    /// The triangle separating axis test finished with this axis of least overlap.
    AxisSelected {
        /// Axis with the smallest overlap.
        axis: SeparatingAxis,
        /// Overlap along the normalized axis.
        overlap: Real,
    },
}

/// Receives [`TraceEvent`]s from the `_traced` predicates.
///
/// Closures taking a [`TraceEvent`] implement this trait, so collecting events is a one-liner:
///
/// ```
/// use collide3d::query::obb_obb_collide_traced;
/// use collide3d::{Obb, Point3, TraceEvent, Tolerances};
///
/// let a = Obb::axis_aligned(Point3::origin(), [1.0, 1.0, 1.0]);
/// let b = Obb::axis_aligned(Point3::new(2.5, 0.0, 0.0), [1.0, 1.0, 1.0]);
///
/// let mut events = Vec::new();
/// let hit = obb_obb_collide_traced(&a, &b, &Tolerances::default(), &mut |e: TraceEvent| events.push(e));
/// assert!(!hit);
/// assert_eq!(events.len(), 1);
/// ```
pub trait Tracer {
    /// Records one event.
    fn record(&mut self, event: TraceEvent);
}

/// A [`Tracer`] that discards everything.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NoTrace;

impl Tracer for NoTrace {
    #[inline(always)]
    fn record(&mut self, _event: TraceEvent) {}
}

impl<F: FnMut(TraceEvent)> Tracer for F {
    fn record(&mut self, event: TraceEvent) {
        self(event)
    }
}

/// Forwards `event` to `tracing` and to the caller's sink.
#[inline]
pub(crate) fn emit<T: Tracer + ?Sized>(tracer: &mut T, event: TraceEvent) {
    tracing::trace!(?event, "collision predicate");
    tracer.record(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_collect_events() {
        let mut events = Vec::new();
        {
            let mut sink = |event: TraceEvent| events.push(event);
            emit(&mut sink, TraceEvent::Coplanar);
            emit(&mut sink, TraceEvent::StraddleRejected);
        }
        assert_eq!(events, vec![TraceEvent::Coplanar, TraceEvent::StraddleRejected]);
    }

    #[test]
    fn no_trace_accepts_everything() {
        let mut tracer = NoTrace;
        emit(
            &mut tracer,
            TraceEvent::Separated {
                axis: SeparatingAxis::ObbFaceA(Axis::X),
                gap: 1.0,
            },
        );
        assert_eq!(tracer, NoTrace);
    }

    #[test]
    fn dyn_tracer_is_usable() {
        let mut count = 0;
        {
            let mut sink = |_: TraceEvent| count += 1;
            let tracer: &mut dyn Tracer = &mut sink;
            emit(tracer, TraceEvent::PlaneSide { plane: Operand::B });
        }
        assert_eq!(count, 1);
    }
}
