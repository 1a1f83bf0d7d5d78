//! Error types for pipe generation.

use thiserror::Error;

/// Result type for pipe generation.
pub type PipeResult<T> = Result<T, PipeError>;

/// Errors that can occur while generating pipe meshes.
///
/// Every error is raised before any geometry is emitted, so a failed
/// rebuild never yields a partial mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipeError {
    /// A pipe has too few waypoints.
    #[error("pipe {pipe} needs at least {min} points, got {actual}")]
    TooFewPoints {
        /// Index of the offending pipe in the collection.
        pipe: usize,
        /// Minimum required points.
        min: usize,
        /// Actual point count.
        actual: usize,
    },

    /// Two consecutive waypoints coincide, leaving the tangent undefined.
    #[error("pipe {pipe} has a degenerate segment between points {index} and {}", .index + 1)]
    DegenerateSegment {
        /// Index of the offending pipe in the collection.
        pipe: usize,
        /// Index of the first point of the zero-length segment.
        index: usize,
    },

    /// A waypoint has a NaN or infinite coordinate.
    #[error("pipe {pipe} has a non-finite point at index {index}")]
    NonFinitePoint {
        /// Index of the offending pipe in the collection.
        pipe: usize,
        /// Index of the offending point.
        index: usize,
    },

    /// Tube radius is zero, negative or not finite.
    #[error("invalid radius: {0}")]
    InvalidRadius(f64),

    /// Edge count is too low to form a cross-section.
    #[error("edge count must be at least {min}, got {actual}")]
    TooFewEdges {
        /// Minimum required edges.
        min: usize,
        /// Actual edge count.
        actual: usize,
    },

    /// Curved segment count is too low to sample a corner.
    #[error("curved segment count must be at least {min}, got {actual}")]
    TooFewCurvedSegments {
        /// Minimum required segments.
        min: usize,
        /// Actual segment count.
        actual: usize,
    },

    /// A length parameter is out of range or not finite.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Name of the configuration field.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

impl PipeError {
    /// Create an invalid parameter error.
    #[must_use]
    pub const fn invalid_parameter(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipeError::TooFewPoints {
            pipe: 2,
            min: 2,
            actual: 1,
        };
        assert!(format!("{err}").contains("pipe 2"));

        let err = PipeError::DegenerateSegment { pipe: 0, index: 3 };
        assert!(format!("{err}").contains("points 3 and 4"));

        let err = PipeError::NonFinitePoint { pipe: 1, index: 5 };
        assert!(format!("{err}").contains("index 5"));

        let err = PipeError::invalid_parameter("curvature", -1.0);
        assert!(format!("{err}").contains("curvature"));
    }
}
