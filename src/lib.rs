#![cfg_attr(all(feature = "bench", test), feature(test))]
//! Narrow-phase collision predicates for oriented bounding boxes and triangles.
//!
//! ## About
//!
//! This crate decides whether two rigid shapes overlap. It covers the pairs that show up
//! once a broad phase has already paired things up: box against box, box against triangle
//! and triangle against triangle. All predicates are pure functions of their inputs, so they
//! can be called from any thread, as often as needed, without coordination.
//!
//! - [`obb_obb_collide`] runs the 15 axis separating axis test for two [`Obb`]s.
//! - [`obb_triangle_collide`] moves the [`Triangle`] into the box's local frame and runs the
//!   13 axis box/triangle test from [`aabb`].
//! - [`triangle_triangle_collide`] classifies the vertices of both triangles with orientation
//!   predicates and resolves a contact normal from the same classification.
//! - [`triangle_triangle_contact_axis`] is an independent 11 axis separating axis test which
//!   reports the axis of least overlap.
//!
//! ## Example
//!
//! ```
//! use collide3d::{obb_obb_collide, obb_triangle_collide, Obb, Point3, Triangle};
//!
//! let a = Obb::axis_aligned(Point3::new(0.0, 0.0, 0.0), [1.0, 1.0, 1.0]);
//! let b = Obb::axis_aligned(Point3::new(1.5, 0.0, 0.0), [1.0, 1.0, 1.0]);
//! assert!(obb_obb_collide(&a, &b));
//!
//! let above = Triangle::new(
//!     Point3::new(-1.0, -1.0, 3.0),
//!     Point3::new(1.0, -1.0, 3.0),
//!     Point3::new(0.0, 1.0, 3.5),
//! );
//! assert!(!obb_triangle_collide(&a, &above).unwrap());
//! ```
//!
//! ## Features
//!
//! - `rayon` (default **enabled**) - checks triangle batches against a box in parallel
//! - `serde` (default **disabled**) - adds `Serialize` and `Deserialize` implementations for
//!   the shapes and [`Tolerances`]
//! - `f64` (default **disabled**) - switches [`Real`] from `f32` to `f64`
//!

#[cfg(all(feature = "bench", test))]
extern crate test;

#[cfg(feature = "f64")]
/// Float type used by this crate
pub type Real = f64;

#[cfg(not(feature = "f64"))]
/// Float type used by this crate
pub type Real = f32;

/// Point math type used by this crate. Type alias for [`nalgebra::Point3`].
pub type Point3 = nalgebra::Point3<Real>;

/// Vector math type used by this crate. Type alias for [`nalgebra::Vector3`].
pub type Vector3 = nalgebra::Vector3<Real>;

/// Homogeneous matrix type used by this crate. Type alias for [`nalgebra::Matrix4`].
pub type Matrix4 = nalgebra::Matrix4<Real>;

/// Absolute tolerance used when comparing transformed coordinates.
pub const EPSILON: Real = 0.00001;

pub mod aabb;
pub mod axis;
pub mod error;
pub mod predicates;
pub mod query;
pub mod replay;
pub mod shapes;
pub mod tolerance;
pub mod trace;
pub mod transform;
pub mod tri_tri;
mod utils;

#[cfg(test)]
mod testbase;

pub use crate::error::{CollisionError, CollisionResult};
pub use crate::query::{
    build_obb_local_transform, obb_obb_collide, obb_triangle_collide, obb_triangles_collide,
    triangle_triangle_collide, triangle_triangle_contact_axis, triangle_triangle_contact_normal,
    triangles_collide,
};
pub use crate::replay::{ReplayError, ReplayFrame};
pub use crate::shapes::{obb::Obb, triangle::Triangle, Shape};
pub use crate::tolerance::Tolerances;
pub use crate::trace::{NoTrace, TraceEvent, Tracer};
pub use crate::utils::Interval;

#[cfg(test)]
doc_comment::doctest!("../README.md");
