//! Procedural pipe meshes swept along waypoint polylines.
//!
//! Every pipe is a list of 3D waypoints. Interior waypoints are rounded
//! into quadratic Bezier corners, oriented frames are sampled along the
//! path with a roll correction that keeps ring vertex 0 from flipping,
//! and a ring of vertices is swept through every frame. Optional collars
//! close the pipe ends (caps) and reinforce each corner (rings).
//!
//! # Features
//!
//! - **Rounded corners**: configurable pull-back distance and sample count
//! - **Continuous twist**: no 180° flips of the cross-section between frames
//! - **Arc-length UVs**: textures tile at the same rate on every pipe
//! - **Caps and rings**: flat-faced collars with their own normals
//! - **Combined output**: one mesh with a sub-mesh per pipe
//!
//! # Quick Start
//!
//! ```
//! use mesh_pipe::{generate_all, PipeConfig};
//! use nalgebra::Point3;
//!
//! let pipes = vec![vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(0.0, 0.0, 10.0),
//!     Point3::new(10.0, 0.0, 10.0),
//! ]];
//!
//! let config = PipeConfig::industrial()
//!     .with_radius(0.5)
//!     .with_edge_count(12);
//!
//! let result = generate_all(&pipes, &config).unwrap();
//! assert_eq!(result.submeshes.len(), 1);
//! assert!(result.mesh.is_fully_shaded());
//! ```
//!
//! # Keeping a Collection
//!
//! [`PipeGenerator`] owns pipes and configuration between rebuilds and
//! keeps the last good mesh when a rebuild fails:
//!
//! ```
//! use mesh_pipe::{PipeConfig, PipeGenerator};
//! use nalgebra::Point3;
//!
//! let mut generator = PipeGenerator::new(PipeConfig::default(), "steel");
//! generator.add_pipe(vec![Point3::origin(), Point3::new(4.0, 0.0, 0.0)]);
//! generator.rebuild().unwrap();
//!
//! generator.pipes_mut()[0].truncate(1);
//! assert!(generator.rebuild().is_err());
//! assert_eq!(generator.mesh().pipe_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod builder;
mod combine;
mod config;
mod disc;
mod error;
mod frame;
mod generator;
mod sampler;
mod tube;
mod uv;

pub use builder::{MIN_POINTS, MIN_SEGMENT_LENGTH, PipeMeshBuilder, build_pipe, validate_points};
pub use combine::{PipeMesh, generate_all, max_curvature};
pub use config::PipeConfig;
pub use disc::{DiscKind, append_disc, disc_face_count, disc_vertex_count};
pub use error::{PipeError, PipeResult};
pub use frame::{OrientedFrame, WORLD_UP, look_rotation};
pub use generator::{MeshSink, PipeGenerator};
pub use sampler::{FrameSampler, FrameSequence};
pub use tube::{append_tube, ring_direction};
pub use uv::{arc_lengths, planar_uv, ring_uv};
