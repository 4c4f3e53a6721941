//! Error types for the collision predicates.
//!
//! The predicates have no recoverable failure modes. The one input they reject is a triangle
//! whose face normal cannot be normalized; everything else is either a defined geometric
//! answer or a caller contract (orthonormal box axes) that is not checked.

use thiserror::Error;

use crate::Real;

/// Errors raised by the collision predicates.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CollisionError {
    /// The triangle has (near) zero area, so it has no face normal.
    #[error("degenerate triangle: squared normal length {normal_length_squared:e} is below tolerance")]
    DegenerateTriangle {
        /// Squared length of the unnormalized face normal `(v1 - v0) × (v2 - v0)`.
        normal_length_squared: Real,
    },
}

/// Convenience alias for `Result<T, CollisionError>`.
pub type CollisionResult<T> = Result<T, CollisionError>;

#[cfg(test)]
mod tests {
    use super::CollisionError;

    #[test]
    fn test_degenerate_triangle_message() {
        let error = CollisionError::DegenerateTriangle {
            normal_length_squared: 0.0,
        };
        assert_eq!(
            error.to_string(),
            "degenerate triangle: squared normal length 0e0 is below tolerance"
        );
    }
}
