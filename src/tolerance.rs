//! Tunable tolerances shared by the collision predicates.
//!
//! The right values depend on the units callers work in, so none of them are baked into the
//! predicates. Every entry point has a form that takes a [`Tolerances`] explicitly; the plain
//! forms use [`Tolerances::default`].

use crate::Real;

/// Default value added to every entry of the box-box axis correlation matrix.
pub const AXIS_EPSILON: Real = 1e-6;

/// Default half-width of the band in which an orientation value counts as zero.
pub const SIGN_EPSILON: Real = f32::EPSILON as Real;

/// Default squared length under which a normal or cross product counts as zero.
pub const DEGENERATE_EPSILON: Real = 1e-12;

/// Numeric tolerances for the collision predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    /// Added to each entry `dot(a.axes[i], b.axes[j])` of the box-box correlation matrix.
    /// Keeps the cross-axis bounds from collapsing when two axes are nearly parallel.
    /// The triangle separating axis test also uses it as the squared sine under which two
    /// triangle planes count as parallel. Default: `1e-6`.
    pub axis_epsilon: Real,
    /// Orientation values within `[-sign_epsilon, sign_epsilon]` classify as "on the plane".
    /// Default: `f32::EPSILON`.
    pub sign_epsilon: Real,
    /// Squared length below which a triangle normal, or a candidate separating axis built
    /// from a cross product, is treated as zero. Default: `1e-12`.
    pub degenerate_epsilon: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            axis_epsilon: AXIS_EPSILON,
            sign_epsilon: SIGN_EPSILON,
            degenerate_epsilon: DEGENERATE_EPSILON,
        }
    }
}

impl Tolerances {
    /// Returns a copy with a different box-box correlation epsilon.
    pub fn with_axis_epsilon(mut self, axis_epsilon: Real) -> Self {
        self.axis_epsilon = axis_epsilon;
        self
    }

    /// Returns a copy with a different orientation sign band.
    pub fn with_sign_epsilon(mut self, sign_epsilon: Real) -> Self {
        self.sign_epsilon = sign_epsilon;
        self
    }

    /// Returns a copy with a different degeneracy threshold.
    pub fn with_degenerate_epsilon(mut self, degenerate_epsilon: Real) -> Self {
        self.degenerate_epsilon = degenerate_epsilon;
        self
    }
}
