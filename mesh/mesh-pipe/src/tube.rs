//! Ring mesher: the tube body around a frame sequence.
//!
//! Every frame contributes one ring of `edge_count` vertices plus a seam
//! duplicate of vertex 0, so a sequence of `n` frames produces
//! `n * (edge_count + 1)` vertices and `2 * edge_count * (n - 1)` faces.

use mesh_types::{IndexedMesh, Vertex};
use nalgebra::Vector3;

use crate::config::PipeConfig;
use crate::frame::OrientedFrame;
use crate::uv::{arc_lengths, ring_uv};

/// Unit direction of ring slot `slot` in frame-local space.
///
/// Slot 0 is local +Y; slots advance toward local +X. The seam slot
/// (`slot == edge_count`) coincides with slot 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ring_direction(slot: usize, edge_count: usize) -> Vector3<f64> {
    let angle = std::f64::consts::TAU * (slot % edge_count) as f64 / edge_count as f64;
    Vector3::new(angle.sin(), angle.cos(), 0.0)
}

/// Append one ring of `edge_count + 1` vertices around `frame`.
///
/// Normals are the ring directions rotated into world space. `uv` maps a
/// slot index to its texture coordinate.
pub(crate) fn push_ring(
    mesh: &mut IndexedMesh,
    frame: &OrientedFrame,
    radius: f64,
    edge_count: usize,
    uv: impl Fn(usize) -> (f32, f32),
) {
    for slot in 0..=edge_count {
        let direction = ring_direction(slot, edge_count);
        let position = frame.local_to_world_point(&(direction * radius));
        let normal = frame.local_to_world_vector(&direction);
        mesh.vertices.push(Vertex::shaded(position, normal, uv(slot)));
    }
}

/// Stitch two rings into a band of quads, two triangles each.
///
/// `from` and `to` are the first vertex indices of the rings. The winding
/// is outward-facing when `to` lies further along the path than `from`,
/// i.e. against the frames' forward axis.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn stitch_rings(mesh: &mut IndexedMesh, from: usize, to: usize, edge_count: usize) {
    for slot in 0..edge_count {
        let current_a = (from + slot) as u32;
        let current_b = current_a + 1;
        let next_a = (to + slot) as u32;
        let next_b = next_a + 1;

        mesh.faces.push([next_b, next_a, current_a]);
        mesh.faces.push([current_b, next_b, current_a]);
    }
}

/// Append the tube body for `frames` to `mesh`.
///
/// # Example
///
/// ```
/// use mesh_pipe::{append_tube, FrameSampler, PipeConfig};
/// use mesh_types::{IndexedMesh, MeshTopology};
/// use nalgebra::Point3;
///
/// let config = PipeConfig::default().with_edge_count(8);
/// let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 10.0)];
/// let frames = FrameSampler::from_config(&config).sample(&points);
///
/// let mut mesh = IndexedMesh::new();
/// append_tube(&mut mesh, &frames.frames, &config);
/// assert_eq!(mesh.vertex_count(), 18);
/// assert_eq!(mesh.face_count(), 16);
/// ```
pub fn append_tube(mesh: &mut IndexedMesh, frames: &[OrientedFrame], config: &PipeConfig) {
    let edge_count = config.edge_count;
    let stride = config.ring_stride();
    let base = mesh.vertices.len();

    mesh.reserve(
        frames.len() * stride,
        frames.len().saturating_sub(1) * edge_count * 2,
    );

    let lengths = arc_lengths(frames);
    for (frame, &v) in frames.iter().zip(&lengths) {
        push_ring(mesh, frame, config.radius, edge_count, |slot| {
            ring_uv(slot, edge_count, v)
        });
    }

    for ring in 1..frames.len() {
        let from = base + (ring - 1) * stride;
        stitch_rings(mesh, from, from + stride, edge_count);
    }
}
