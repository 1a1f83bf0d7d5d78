//! Single-pipe mesh builder.

use mesh_types::IndexedMesh;
use nalgebra::Point3;
use tracing::debug;

use crate::config::PipeConfig;
use crate::disc::{DiscKind, append_disc, disc_face_count, disc_vertex_count};
use crate::error::{PipeError, PipeResult};
use crate::sampler::{FrameSampler, FrameSequence};
use crate::tube::append_tube;

/// Consecutive waypoints closer than this are rejected.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// Minimum waypoints per pipe.
pub const MIN_POINTS: usize = 2;

/// Check that a waypoint list can be swept.
///
/// `pipe` is the index reported in errors.
///
/// # Errors
///
/// Returns [`PipeError::TooFewPoints`] for fewer than two points,
/// [`PipeError::NonFinitePoint`] for NaN or infinite coordinates and
/// [`PipeError::DegenerateSegment`] for coincident consecutive points.
pub fn validate_points(pipe: usize, points: &[Point3<f64>]) -> PipeResult<()> {
    if points.len() < MIN_POINTS {
        return Err(PipeError::TooFewPoints {
            pipe,
            min: MIN_POINTS,
            actual: points.len(),
        });
    }

    if let Some(index) = points
        .iter()
        .position(|p| !p.iter().all(|c| c.is_finite()))
    {
        return Err(PipeError::NonFinitePoint { pipe, index });
    }

    if let Some(index) = points
        .windows(2)
        .position(|w| nalgebra::distance(&w[0], &w[1]) < MIN_SEGMENT_LENGTH)
    {
        return Err(PipeError::DegenerateSegment { pipe, index });
    }

    Ok(())
}

/// Builds the tube, caps and rings of one pipe into a fresh mesh.
///
/// The builder owns its output; nothing is shared between pipes or
/// between rebuilds.
#[derive(Debug)]
pub struct PipeMeshBuilder<'a> {
    config: &'a PipeConfig,
    mesh: IndexedMesh,
}

impl<'a> PipeMeshBuilder<'a> {
    /// Create an empty builder for `config`.
    #[must_use]
    pub fn new(config: &'a PipeConfig) -> Self {
        Self {
            config,
            mesh: IndexedMesh::new(),
        }
    }

    /// Sweep `points` and return the finished mesh.
    ///
    /// Inputs are assumed validated.
    #[must_use]
    pub fn build(mut self, points: &[Point3<f64>]) -> IndexedMesh {
        let frames = FrameSampler::from_config(self.config).sample(points);
        self.reserve(&frames);

        append_tube(&mut self.mesh, &frames.frames, self.config);

        if self.config.has_caps {
            if let Some(first) = frames.first() {
                append_disc(&mut self.mesh, first, DiscKind::StartCap, self.config);
            }
            if let Some(last) = frames.last() {
                append_disc(&mut self.mesh, last, DiscKind::EndCap, self.config);
            }
        }

        if self.config.has_rings {
            for frame in frames.corner_frames() {
                append_disc(&mut self.mesh, frame, DiscKind::Ring, self.config);
            }
        }

        debug!(
            points = points.len(),
            frames = frames.len(),
            corner_markers = frames.corner_markers.len(),
            vertices = self.mesh.vertices.len(),
            faces = self.mesh.faces.len(),
            "Built pipe"
        );

        self.mesh
    }

    fn reserve(&mut self, frames: &FrameSequence) {
        let edge_count = self.config.edge_count;
        let mut discs = 0;
        if self.config.has_caps {
            discs += 2;
        }
        if self.config.has_rings {
            discs += frames.corner_markers.len();
        }

        self.mesh.reserve(
            frames.len() * self.config.ring_stride() + discs * disc_vertex_count(edge_count),
            frames.len().saturating_sub(1) * 2 * edge_count + discs * disc_face_count(edge_count),
        );
    }
}

/// Validate and build a single pipe.
///
/// # Errors
///
/// Returns an error if the configuration or the waypoints are invalid.
///
/// # Example
///
/// ```
/// use mesh_pipe::{build_pipe, PipeConfig};
/// use mesh_types::MeshTopology;
/// use nalgebra::Point3;
///
/// let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 10.0)];
/// let mesh = build_pipe(&points, &PipeConfig::default().with_edge_count(8)).unwrap();
///
/// assert_eq!(mesh.vertex_count(), 18);
/// assert_eq!(mesh.face_count(), 16);
/// ```
pub fn build_pipe(points: &[Point3<f64>], config: &PipeConfig) -> PipeResult<IndexedMesh> {
    config.validate()?;
    validate_points(0, points)?;
    Ok(PipeMeshBuilder::new(config).build(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::MeshTopology;

    fn bend() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(10.0, 0.0, 10.0),
        ]
    }

    #[test]
    fn rejects_single_point() {
        let err = validate_points(4, &[Point3::origin()]);
        assert_eq!(
            err,
            Err(PipeError::TooFewPoints {
                pipe: 4,
                min: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            validate_points(0, &[]),
            Err(PipeError::TooFewPoints { actual: 0, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_points() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        assert_eq!(
            validate_points(1, &points),
            Err(PipeError::DegenerateSegment { pipe: 1, index: 1 })
        );
    }

    #[test]
    fn rejects_non_finite_points() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let points = [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 5.0),
                Point3::new(bad, 0.0, 5.0),
            ];
            assert_eq!(
                validate_points(2, &points),
                Err(PipeError::NonFinitePoint { pipe: 2, index: 2 })
            );
        }
    }

    #[test]
    fn build_pipe_rejects_nan_waypoint() {
        let points = [Point3::new(0.0, f64::NAN, 0.0), Point3::new(0.0, 0.0, 5.0)];
        assert!(matches!(
            build_pipe(&points, &PipeConfig::default()),
            Err(PipeError::NonFinitePoint { index: 0, .. })
        ));
    }

    #[test]
    fn build_pipe_validates_config() {
        let config = PipeConfig::default().with_edge_count(2);
        assert!(matches!(
            build_pipe(&bend(), &config),
            Err(PipeError::TooFewEdges { .. })
        ));
    }

    #[test]
    fn bend_counts() {
        let config = PipeConfig::default()
            .with_edge_count(6)
            .with_curved_segment_count(4);
        let mesh = PipeMeshBuilder::new(&config).build(&bend());

        // start + 5 corner samples + end
        assert_eq!(mesh.vertex_count(), 7 * 7);
        assert_eq!(mesh.face_count(), 6 * 2 * 6);
    }

    #[test]
    fn caps_and_rings_add_discs() {
        let base = PipeConfig::default()
            .with_edge_count(6)
            .with_curved_segment_count(4);
        let plain = PipeMeshBuilder::new(&base).build(&bend());

        let capped = base.clone().with_has_caps(true);
        let capped = PipeMeshBuilder::new(&capped).build(&bend());
        assert_eq!(capped.vertex_count(), plain.vertex_count() + 2 * disc_vertex_count(6));
        assert_eq!(capped.face_count(), plain.face_count() + 2 * disc_face_count(6));

        let ringed = base.with_has_rings(true);
        let ringed = PipeMeshBuilder::new(&ringed).build(&bend());
        assert_eq!(ringed.face_count(), plain.face_count() + 2 * disc_face_count(6));
    }

    #[test]
    fn every_vertex_is_shaded() {
        let config = PipeConfig::industrial().with_edge_count(5);
        let mesh = build_pipe(&bend(), &config).unwrap_or_default();
        assert!(!mesh.is_empty());
        assert!(mesh.is_fully_shaded());
    }
}
