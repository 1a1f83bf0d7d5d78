//! Combining every pipe of a collection into one mesh.

use mesh_types::{IndexedMesh, SubMesh};
use nalgebra::Point3;
use tracing::info;

use crate::builder::{PipeMeshBuilder, validate_points};
use crate::config::PipeConfig;
use crate::error::PipeResult;

/// Combined mesh for a pipe collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeMesh {
    /// All pipes, appended in input order.
    pub mesh: IndexedMesh,
    /// One entry per pipe; `material` is the pipe index.
    pub submeshes: Vec<SubMesh>,
    /// Half the longest distance between consecutive waypoints of any
    /// pipe. Callers compare a configured curvature against it.
    pub max_curvature: f64,
}

impl PipeMesh {
    /// Number of pipes in the mesh.
    #[inline]
    #[must_use]
    pub fn pipe_count(&self) -> usize {
        self.submeshes.len()
    }

    /// Sub-mesh of pipe `index`.
    #[must_use]
    pub fn pipe(&self, index: usize) -> Option<&SubMesh> {
        self.submeshes.get(index)
    }
}

/// Half the longest consecutive waypoint distance over all pipes.
#[must_use]
pub fn max_curvature<P: AsRef<[Point3<f64>]>>(pipes: &[P]) -> f64 {
    let max_squared = pipes
        .iter()
        .flat_map(|pipe| pipe.as_ref().windows(2))
        .map(|w| nalgebra::distance_squared(&w[0], &w[1]))
        .fold(0.0, f64::max);

    max_squared.sqrt() / 2.0
}

/// Generate one combined mesh for every pipe in `pipes`.
///
/// Configuration and every pipe are validated before any geometry is
/// built. An empty collection yields an empty mesh.
///
/// # Errors
///
/// Returns the first configuration or waypoint error found.
///
/// # Example
///
/// ```
/// use mesh_pipe::{generate_all, PipeConfig};
/// use nalgebra::Point3;
///
/// let pipes = vec![
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 4.0)],
///     vec![Point3::new(5.0, 0.0, 0.0), Point3::new(5.0, 0.0, 2.0)],
/// ];
/// let result = generate_all(&pipes, &PipeConfig::default()).unwrap();
///
/// assert_eq!(result.pipe_count(), 2);
/// assert!((result.max_curvature - 2.0).abs() < 1e-12);
/// ```
pub fn generate_all<P: AsRef<[Point3<f64>]>>(
    pipes: &[P],
    config: &PipeConfig,
) -> PipeResult<PipeMesh> {
    config.validate()?;
    for (index, pipe) in pipes.iter().enumerate() {
        validate_points(index, pipe.as_ref())?;
    }

    let mut result = PipeMesh {
        mesh: IndexedMesh::new(),
        submeshes: Vec::with_capacity(pipes.len()),
        max_curvature: max_curvature(pipes),
    };

    for (index, pipe) in pipes.iter().enumerate() {
        let part = PipeMeshBuilder::new(config).build(pipe.as_ref());
        result.submeshes.push(result.mesh.merge(&part, index));
    }

    info!(
        pipes = pipes.len(),
        vertices = result.mesh.vertices.len(),
        faces = result.mesh.faces.len(),
        max_curvature = result.max_curvature,
        "Generated pipe mesh"
    );

    Ok(result)
}
