//! Pipe generation parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PipeError, PipeResult};

/// Geometric configuration shared by every pipe in a collection.
///
/// Collar radii are measured from the tube surface, so a cap is
/// `radius + cap_radius` wide.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PipeConfig {
    /// Tube cross-section radius.
    pub radius: f64,

    /// Number of vertices around each ring (seam duplicate excluded).
    pub edge_count: usize,

    /// Number of sampling steps through each rounded corner.
    pub curved_segment_count: usize,

    /// Distance a corner's control points are pulled back along the
    /// adjoining segments.
    pub curvature: f64,

    /// Length of an interior reinforcing ring along the path.
    pub ring_thickness: f64,

    /// Extra radius of an interior reinforcing ring.
    pub ring_radius: f64,

    /// Length of an end cap collar along the path.
    pub cap_thickness: f64,

    /// Extra radius of an end cap collar.
    pub cap_radius: f64,

    /// Emit reinforcing rings at both ends of every rounded corner.
    pub has_rings: bool,

    /// Emit collars closing both pipe ends.
    pub has_caps: bool,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            edge_count: 10,
            curved_segment_count: 10,
            curvature: 0.5,
            ring_thickness: 1.0,
            ring_radius: 1.3,
            cap_thickness: 1.0,
            cap_radius: 1.3,
            has_rings: false,
            has_caps: false,
        }
    }
}

impl PipeConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bare tube: no caps, no rings.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Tube with end caps and corner rings.
    #[must_use]
    pub fn industrial() -> Self {
        Self {
            has_rings: true,
            has_caps: true,
            ..Self::default()
        }
    }

    /// Set the tube radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the number of vertices around each ring.
    #[must_use]
    pub const fn with_edge_count(mut self, edge_count: usize) -> Self {
        self.edge_count = edge_count;
        self
    }

    /// Set the number of sampling steps per rounded corner.
    #[must_use]
    pub const fn with_curved_segment_count(mut self, count: usize) -> Self {
        self.curved_segment_count = count;
        self
    }

    /// Set the corner pull-back distance.
    #[must_use]
    pub const fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }

    /// Set ring collar thickness and extra radius.
    #[must_use]
    pub const fn with_rings(mut self, thickness: f64, radius: f64) -> Self {
        self.ring_thickness = thickness;
        self.ring_radius = radius;
        self
    }

    /// Set cap collar thickness and extra radius.
    #[must_use]
    pub const fn with_caps(mut self, thickness: f64, radius: f64) -> Self {
        self.cap_thickness = thickness;
        self.cap_radius = radius;
        self
    }

    /// Toggle corner ring generation.
    #[must_use]
    pub const fn with_has_rings(mut self, enabled: bool) -> Self {
        self.has_rings = enabled;
        self
    }

    /// Toggle end cap generation.
    #[must_use]
    pub const fn with_has_caps(mut self, enabled: bool) -> Self {
        self.has_caps = enabled;
        self
    }

    /// Check whether the configured curvature stays within `limit`.
    ///
    /// Editors pass the `max_curvature` diagnostic of the last build.
    #[must_use]
    pub fn curvature_within(&self, limit: f64) -> bool {
        self.curvature <= limit
    }

    /// Vertices in one ring, seam duplicate included.
    #[inline]
    #[must_use]
    pub const fn ring_stride(&self) -> usize {
        self.edge_count + 1
    }

    /// Validate the configuration.
    ///
    /// Invalid values are rejected, never clamped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `radius` is not positive and finite
    /// - `edge_count` is below 3
    /// - `curved_segment_count` is below 1
    /// - `curvature` is not positive and finite
    /// - any thickness or collar radius is negative or not finite
    pub fn validate(&self) -> PipeResult<()> {
        if self.radius <= 0.0 || !self.radius.is_finite() {
            return Err(PipeError::InvalidRadius(self.radius));
        }

        if self.edge_count < 3 {
            return Err(PipeError::TooFewEdges {
                min: 3,
                actual: self.edge_count,
            });
        }

        if self.curved_segment_count < 1 {
            return Err(PipeError::TooFewCurvedSegments {
                min: 1,
                actual: self.curved_segment_count,
            });
        }

        if self.curvature <= 0.0 || !self.curvature.is_finite() {
            return Err(PipeError::invalid_parameter("curvature", self.curvature));
        }

        let lengths = [
            ("ring_thickness", self.ring_thickness),
            ("ring_radius", self.ring_radius),
            ("cap_thickness", self.cap_thickness),
            ("cap_radius", self.cap_radius),
        ];
        for (name, value) in lengths {
            if value < 0.0 || !value.is_finite() {
                return Err(PipeError::invalid_parameter(name, value));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = PipeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.edge_count, 10);
        assert!(!config.has_caps);
        assert!(!config.has_rings);
    }

    #[test]
    fn industrial_enables_collars() {
        let config = PipeConfig::industrial();
        assert!(config.has_caps);
        assert!(config.has_rings);
    }

    #[test]
    fn builders() {
        let config = PipeConfig::new()
            .with_radius(2.0)
            .with_edge_count(16)
            .with_curved_segment_count(4)
            .with_curvature(1.5)
            .with_rings(0.5, 0.2)
            .with_caps(0.8, 0.4)
            .with_has_rings(true);

        assert!((config.radius - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.edge_count, 16);
        assert_eq!(config.ring_stride(), 17);
        assert_eq!(config.curved_segment_count, 4);
        assert!((config.ring_thickness - 0.5).abs() < f64::EPSILON);
        assert!((config.cap_radius - 0.4).abs() < f64::EPSILON);
        assert!(config.has_rings);
        assert!(!config.has_caps);
    }

    #[test]
    fn rejects_bad_radius() {
        let err = PipeConfig::new().with_radius(0.0).validate();
        assert_eq!(err, Err(PipeError::InvalidRadius(0.0)));

        let err = PipeConfig::new().with_radius(f64::NAN).validate();
        assert!(matches!(err, Err(PipeError::InvalidRadius(_))));
    }

    #[test]
    fn rejects_too_few_edges() {
        let err = PipeConfig::new().with_edge_count(2).validate();
        assert_eq!(err, Err(PipeError::TooFewEdges { min: 3, actual: 2 }));
    }

    #[test]
    fn rejects_zero_curved_segments() {
        let err = PipeConfig::new().with_curved_segment_count(0).validate();
        assert!(matches!(err, Err(PipeError::TooFewCurvedSegments { .. })));
    }

    #[test]
    fn rejects_negative_lengths() {
        let err = PipeConfig::new().with_caps(-1.0, 1.0).validate();
        assert_eq!(
            err,
            Err(PipeError::InvalidParameter {
                name: "cap_thickness",
                value: -1.0
            })
        );
    }

    #[test]
    fn rejects_zero_curvature() {
        for curvature in [0.0, -0.5, f64::INFINITY] {
            let err = PipeConfig::new().with_curvature(curvature).validate();
            assert!(
                matches!(err, Err(PipeError::InvalidParameter { name: "curvature", .. })),
                "{curvature}: {err:?}"
            );
        }
        assert!(PipeConfig::new().with_curvature(0.01).validate().is_ok());
    }

    #[test]
    fn curvature_limit() {
        let config = PipeConfig::new().with_curvature(2.0);
        assert!(config.curvature_within(2.5));
        assert!(!config.curvature_within(1.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let config: PipeConfig =
            serde_json::from_str(r#"{ "radius": 0.25, "has_caps": true }"#).unwrap_or_default();
        assert!((config.radius - 0.25).abs() < f64::EPSILON);
        assert!(config.has_caps);
        assert_eq!(config.edge_count, 10);
    }
}
