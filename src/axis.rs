//! Axis enum for indexing three-dimensional structures.

use crate::{Point3, Real, Vector3};
use std::fmt::{Display, Formatter, Result};
use std::ops::{Index, IndexMut};

/// An `Axis` in a three-dimensional coordinate system.
/// Used to access half-extents, box axes and correlation matrices by index.
///
/// # Examples
/// ```
/// use collide3d::axis::Axis;
/// use collide3d::Real;
///
/// let mut half_extents: [Real; 3] = [1.0, 0.5, 42.0];
/// half_extents[Axis::Y] *= 4.0;
///
/// assert_eq!(half_extents[Axis::Y], 2.0);
/// ```
///
/// The axes of an [`Obb`] are indexable the same way.
///
/// ```
/// use collide3d::axis::Axis;
/// use collide3d::{Obb, Point3, Vector3};
///
/// let obb = Obb::axis_aligned(Point3::origin(), [1.0, 2.0, 3.0]);
/// assert_eq!(obb.axes[Axis::Z], Vector3::z());
/// ```
///
/// [`Obb`]: ../shapes/obb/struct.Obb.html
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Index of the X axis.
    X = 0,

    /// Index of the Y axis.
    Y = 1,

    /// Index of the Z axis.
    Z = 2,
}

impl Axis {
    /// All three axes, in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the unit vector pointing along this axis.
    pub fn unit(self) -> Vector3 {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    /// Returns the two remaining axes in cyclic order.
    ///
    /// `X` yields `(Y, Z)`, `Y` yields `(Z, X)` and `Z` yields `(X, Y)`, so that
    /// `self × first = second` for a right-handed frame.
    pub fn others(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::Z, Axis::X),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// Returns the component of `vector` along this axis.
    pub fn component(self, vector: &Vector3) -> Real {
        vector[self as usize]
    }
}

/// Display implementation for `Axis`.
impl Display for Axis {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}",
            match *self {
                Axis::X => "x",
                Axis::Y => "y",
                Axis::Z => "z",
            }
        )
    }
}

/// Make slices indexable by `Axis`.
impl Index<Axis> for [Real] {
    type Output = Real;

    fn index(&self, axis: Axis) -> &Real {
        &self[axis as usize]
    }
}

/// Make slices mutably accessible by `Axis`.
impl IndexMut<Axis> for [Real] {
    fn index_mut(&mut self, axis: Axis) -> &mut Real {
        &mut self[axis as usize]
    }
}

/// Make rows of a 3x3 table indexable by `Axis`.
impl Index<Axis> for [[Real; 3]] {
    type Output = [Real; 3];

    fn index(&self, axis: Axis) -> &[Real; 3] {
        &self[axis as usize]
    }
}

/// Make slices of `Vector3` (box axes, triangle edges) indexable by `Axis`.
impl Index<Axis> for [Vector3] {
    type Output = Vector3;

    fn index(&self, axis: Axis) -> &Vector3 {
        &self[axis as usize]
    }
}

/// Make slices of `Point3` indexable by `Axis`.
impl Index<Axis> for [Point3] {
    type Output = Point3;

    fn index(&self, axis: Axis) -> &Point3 {
        &self[axis as usize]
    }
}
