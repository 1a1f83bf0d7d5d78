//! Cap and ring collars.
//!
//! A collar is a short cylinder wider than the tube: two rings of
//! `edge_count + 1` vertices joined by a side wall, each closed by a flat
//! fan-triangulated disc. End caps sit inside the pipe at its first and
//! last frame; interior rings are centred on a corner marker.

use mesh_types::{IndexedMesh, Vertex};

use crate::config::PipeConfig;
use crate::frame::OrientedFrame;
use crate::tube::{push_ring, ring_direction, stitch_rings};
use crate::uv::{planar_uv, ring_uv};

/// Which kind of collar to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscKind {
    /// Cap at the first frame of a pipe.
    StartCap,
    /// Cap at the last frame of a pipe.
    EndCap,
    /// Reinforcing ring at an interior corner marker.
    Ring,
}

impl DiscKind {
    /// Check whether this is one of the two end caps.
    #[must_use]
    pub const fn is_cap(self) -> bool {
        matches!(self, Self::StartCap | Self::EndCap)
    }

    /// Collar outer radius.
    #[must_use]
    pub fn radius(self, config: &PipeConfig) -> f64 {
        if self.is_cap() {
            config.cap_radius + config.radius
        } else {
            config.ring_radius + config.radius
        }
    }

    /// Collar length along the frame's forward axis.
    #[must_use]
    pub fn thickness(self, config: &PipeConfig) -> f64 {
        if self.is_cap() {
            config.cap_thickness
        } else {
            config.ring_thickness
        }
    }

    /// Distance the near face sits behind the frame along forward.
    ///
    /// Forward points toward the pipe start, so a start cap is pushed into
    /// the pipe while an end cap starts on its frame and extends inward.
    #[must_use]
    pub fn lead(self, config: &PipeConfig) -> f64 {
        match self {
            Self::StartCap => config.cap_thickness,
            Self::EndCap => 0.0,
            Self::Ring => config.ring_thickness / 2.0,
        }
    }
}

/// Vertices added by one collar.
#[must_use]
pub const fn disc_vertex_count(edge_count: usize) -> usize {
    4 * (edge_count + 1)
}

/// Faces added by one collar: side wall plus two fans.
#[must_use]
pub const fn disc_face_count(edge_count: usize) -> usize {
    2 * edge_count + 2 * (edge_count - 2)
}

/// Append a collar around `frame` to `mesh`.
///
/// The frame is read only; the two faces are built from offset copies.
///
/// # Example
///
/// ```
/// use mesh_pipe::{append_disc, disc_face_count, DiscKind, OrientedFrame, PipeConfig};
/// use mesh_types::{IndexedMesh, MeshTopology};
/// use nalgebra::{Point3, Vector3};
///
/// let config = PipeConfig::default().with_edge_count(8);
/// let frame = OrientedFrame::looking(Point3::origin(), &-Vector3::z(), &Vector3::y());
///
/// let mut mesh = IndexedMesh::new();
/// append_disc(&mut mesh, &frame, DiscKind::Ring, &config);
/// assert_eq!(mesh.face_count(), disc_face_count(8));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn append_disc(mesh: &mut IndexedMesh, frame: &OrientedFrame, kind: DiscKind, config: &PipeConfig) {
    let edge_count = config.edge_count;
    let stride = config.ring_stride();
    let radius = kind.radius(config);

    mesh.reserve(disc_vertex_count(edge_count), disc_face_count(edge_count));

    let near = frame.offset_along_forward(-kind.lead(config));
    let far = near.offset_along_forward(kind.thickness(config));

    // Collar side wall. Far lies along forward, against the path, so the
    // band is stitched far-to-near to keep the tube's winding.
    let wall = mesh.vertices.len();
    push_ring(mesh, &near, radius, edge_count, |slot| ring_uv(slot, edge_count, 0.0));
    push_ring(mesh, &far, radius, edge_count, |slot| ring_uv(slot, edge_count, 2.0));
    stitch_rings(mesh, wall + stride, wall, edge_count);

    // Flat faces reuse the wall positions with axial normals.
    let flat = mesh.vertices.len();
    let back = -frame.forward();
    let front = frame.forward();
    for face in 0..2 {
        let normal = if face == 0 { back } else { front };
        for slot in 0..=edge_count {
            let position = mesh.vertices[wall + face * stride + slot].position;
            let direction = ring_direction(slot, edge_count);
            let uv = planar_uv(direction.x, direction.y);
            mesh.vertices.push(Vertex::shaded(position, normal, uv));
        }
    }

    let near_hub = flat as u32;
    let far_hub = (flat + stride) as u32;
    for slot in 1..edge_count as u32 - 1 {
        mesh.faces.push([near_hub, near_hub + slot, near_hub + slot + 1]);
        mesh.faces.push([far_hub + slot + 1, far_hub + slot, far_hub]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::MeshTopology;
    use nalgebra::{Point3, Vector3};

    use crate::frame::WORLD_UP;

    fn frame_at(z: f64) -> OrientedFrame {
        OrientedFrame::looking(Point3::new(0.0, 0.0, z), &-Vector3::z(), &WORLD_UP)
    }

    fn build(kind: DiscKind, z: f64) -> IndexedMesh {
        let config = PipeConfig::default()
            .with_edge_count(8)
            .with_radius(1.0)
            .with_caps(0.5, 0.25)
            .with_rings(1.0, 0.5);
        let mut mesh = IndexedMesh::new();
        append_disc(&mut mesh, &frame_at(z), kind, &config);
        mesh
    }

    fn z_range(mesh: &IndexedMesh) -> (f64, f64) {
        mesh.vertices.iter().fold((f64::MAX, f64::MIN), |(lo, hi), v| {
            (lo.min(v.position.z), hi.max(v.position.z))
        })
    }

    #[test]
    fn counts_match_formula() {
        let mesh = build(DiscKind::Ring, 5.0);
        assert_eq!(mesh.vertex_count(), disc_vertex_count(8));
        assert_eq!(mesh.face_count(), disc_face_count(8));
        assert_eq!(disc_face_count(8), 28);
    }

    #[test]
    fn ring_is_centred_on_frame() {
        let mesh = build(DiscKind::Ring, 5.0);
        let (lo, hi) = z_range(&mesh);
        assert_relative_eq!(lo, 4.5, epsilon = 1e-12);
        assert_relative_eq!(hi, 5.5, epsilon = 1e-12);
    }

    #[test]
    fn start_cap_extends_into_pipe() {
        // Pipe runs toward +Z from the start frame at z = 0.
        let mesh = build(DiscKind::StartCap, 0.0);
        let (lo, hi) = z_range(&mesh);
        assert_relative_eq!(lo, 0.0, epsilon = 1e-12);
        assert_relative_eq!(hi, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn end_cap_extends_into_pipe() {
        let mesh = build(DiscKind::EndCap, 10.0);
        let (lo, hi) = z_range(&mesh);
        assert_relative_eq!(lo, 9.5, epsilon = 1e-12);
        assert_relative_eq!(hi, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn collar_radius_includes_tube() {
        let cap = build(DiscKind::EndCap, 0.0);
        let ring = build(DiscKind::Ring, 0.0);
        let r = |v: &Vertex| Vector3::new(v.position.x, v.position.y, 0.0).norm();

        assert_relative_eq!(r(&cap.vertices[0]), 1.25, epsilon = 1e-12);
        assert_relative_eq!(r(&ring.vertices[0]), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn all_faces_wind_outward() {
        let mesh = build(DiscKind::Ring, 5.0);
        let centre = Point3::new(0.0, 0.0, 5.0);

        for tri in mesh.triangles() {
            let Some(normal) = tri.normal() else {
                continue;
            };
            let outward = tri.centroid() - centre;
            assert!(normal.dot(&outward) > 0.0, "inward face at {:?}", tri.centroid());
        }
    }

    #[test]
    fn flat_faces_have_axial_normals() {
        let mesh = build(DiscKind::Ring, 5.0);
        let flat = 2 * 9;
        let near = mesh.vertices[flat].normal().unwrap_or_else(Vector3::zeros);
        let far = mesh.vertices[flat + 9].normal().unwrap_or_else(Vector3::zeros);

        // Frame forward is -Z: the near face (higher z) looks back along +Z.
        assert_relative_eq!(near, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(far, -Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn frame_is_not_mutated() {
        let frame = frame_at(3.0);
        let copy = frame;
        let mut mesh = IndexedMesh::new();
        append_disc(&mut mesh, &frame, DiscKind::StartCap, &PipeConfig::default());
        assert_eq!(frame, copy);
    }
}
