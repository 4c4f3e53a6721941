//! Axis aligned boxes centered on the origin of their own frame.
//!
//! An [`Obb`](crate::Obb) seen from its local frame is an [`Aabb`]. The box-triangle test runs
//! here once the triangle has been moved into that frame.

mod aabb_impl;
mod intersection;

pub use aabb_impl::*;
pub use intersection::*;
