//! Stateful pipe collection with rebuild and publish.
//!
//! [`PipeGenerator`] is what an editor or scene layer holds on to: it
//! owns the waypoint lists, the configuration and a material handle,
//! regenerates everything on [`rebuild`](PipeGenerator::rebuild), and hands
//! the last good mesh to any number of [`MeshSink`]s.

use nalgebra::Point3;
use tracing::warn;

use crate::combine::{PipeMesh, generate_all};
use crate::config::PipeConfig;
use crate::error::PipeResult;

/// Consumer of a finished pipe mesh, such as a renderer or a collision
/// shape.
pub trait MeshSink<M> {
    /// Receive the combined mesh and one material per pipe.
    fn accept(&mut self, mesh: &PipeMesh, materials: &[M]);
}

/// Pipe collection plus its most recent successful mesh.
#[derive(Debug, Clone)]
pub struct PipeGenerator<M> {
    config: PipeConfig,
    material: M,
    pipes: Vec<Vec<Point3<f64>>>,
    mesh: PipeMesh,
}

impl<M: Clone> PipeGenerator<M> {
    /// Create an empty generator.
    #[must_use]
    pub fn new(config: PipeConfig, material: M) -> Self {
        Self {
            config,
            material,
            pipes: Vec::new(),
            mesh: PipeMesh::default(),
        }
    }

    /// Add a pipe and return its index.
    pub fn add_pipe(&mut self, points: Vec<Point3<f64>>) -> usize {
        self.pipes.push(points);
        self.pipes.len() - 1
    }

    /// Waypoint lists, in pipe order.
    #[must_use]
    pub fn pipes(&self) -> &[Vec<Point3<f64>>] {
        &self.pipes
    }

    /// Mutable access to the waypoint lists. Changes take effect on the
    /// next rebuild.
    pub fn pipes_mut(&mut self) -> &mut Vec<Vec<Point3<f64>>> {
        &mut self.pipes
    }

    /// Remove every pipe. The current mesh is kept until the next rebuild.
    pub fn clear_pipes(&mut self) {
        self.pipes.clear();
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &PipeConfig {
        &self.config
    }

    /// Mutable configuration.
    pub fn config_mut(&mut self) -> &mut PipeConfig {
        &mut self.config
    }

    /// Shared material handle.
    #[must_use]
    pub const fn material(&self) -> &M {
        &self.material
    }

    /// Replace the material handle.
    pub fn set_material(&mut self, material: M) {
        self.material = material;
    }

    /// Regenerate the combined mesh from the current pipes and config.
    ///
    /// # Errors
    ///
    /// Returns the generation error. The previous mesh stays current.
    pub fn rebuild(&mut self) -> PipeResult<&PipeMesh> {
        match generate_all(&self.pipes, &self.config) {
            Ok(mesh) => {
                self.mesh = mesh;
                Ok(&self.mesh)
            }
            Err(err) => {
                warn!(error = %err, "Pipe rebuild failed, keeping previous mesh");
                Err(err)
            }
        }
    }

    /// Last successfully generated mesh.
    #[must_use]
    pub const fn mesh(&self) -> &PipeMesh {
        &self.mesh
    }

    /// Max curvature diagnostic of the last successful rebuild.
    #[must_use]
    pub const fn max_curvature(&self) -> f64 {
        self.mesh.max_curvature
    }

    /// One material per pipe of the current mesh, all the shared handle.
    #[must_use]
    pub fn materials(&self) -> Vec<M> {
        vec![self.material.clone(); self.mesh.pipe_count()]
    }

    /// Hand the current mesh to every sink.
    pub fn publish(&self, sinks: &mut [&mut dyn MeshSink<M>]) {
        let materials = self.materials();
        for sink in sinks.iter_mut() {
            sink.accept(&self.mesh, &materials);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipeError;

    #[derive(Default)]
    struct Recorder {
        vertices: usize,
        materials: Vec<&'static str>,
        calls: usize,
    }

    impl MeshSink<&'static str> for Recorder {
        fn accept(&mut self, mesh: &PipeMesh, materials: &[&'static str]) {
            self.vertices = mesh.mesh.vertices.len();
            self.materials = materials.to_vec();
            self.calls += 1;
        }
    }

    fn generator() -> PipeGenerator<&'static str> {
        let mut generator = PipeGenerator::new(PipeConfig::default().with_edge_count(4), "steel");
        generator.add_pipe(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 6.0)]);
        generator.add_pipe(vec![Point3::new(2.0, 0.0, 0.0), Point3::new(2.0, 0.0, 6.0)]);
        generator
    }

    #[test]
    fn add_pipe_returns_index() {
        let mut generator = generator();
        let index = generator.add_pipe(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
        assert_eq!(index, 2);
        assert_eq!(generator.pipes().len(), 3);
    }

    #[test]
    fn rebuild_stores_mesh() {
        let mut generator = generator();
        assert!(generator.rebuild().is_ok());
        assert_eq!(generator.mesh().pipe_count(), 2);
        assert!((generator.max_curvature() - 3.0).abs() < 1e-12);
        assert_eq!(generator.materials(), vec!["steel", "steel"]);
    }

    #[test]
    fn failed_rebuild_keeps_previous_mesh() {
        let mut generator = generator();
        assert!(generator.rebuild().is_ok());
        let before = generator.mesh().clone();

        generator.pipes_mut()[1].truncate(1);
        let err = generator.rebuild();
        assert!(matches!(err, Err(PipeError::TooFewPoints { pipe: 1, .. })));
        assert_eq!(generator.mesh(), &before);

        generator.config_mut().edge_count = 1;
        assert!(generator.rebuild().is_err());
        assert_eq!(generator.mesh(), &before);
    }

    #[test]
    fn clear_then_rebuild_is_empty() {
        let mut generator = generator();
        assert!(generator.rebuild().is_ok());
        generator.clear_pipes();
        assert_eq!(generator.mesh().pipe_count(), 2);

        assert!(generator.rebuild().is_ok());
        assert_eq!(generator.mesh().pipe_count(), 0);
        assert!(generator.materials().is_empty());
    }

    #[test]
    fn publish_reaches_every_sink() {
        let mut generator = generator();
        assert!(generator.rebuild().is_ok());
        generator.set_material("copper");

        let mut renderer = Recorder::default();
        let mut collider = Recorder::default();
        let mut sinks: [&mut dyn MeshSink<&'static str>; 2] = [&mut renderer, &mut collider];
        generator.publish(&mut sinks);

        for sink in [&renderer, &collider] {
            assert_eq!(sink.calls, 1);
            assert_eq!(sink.vertices, 20);
            assert_eq!(sink.materials, vec!["copper", "copper"]);
        }
        assert_eq!(generator.material(), &"copper");
    }
}
