//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, MeshTopology, SubMesh, Triangle, Vertex};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing
/// vertices by index.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Vertex>` - Vertex positions and attributes
/// - `faces`: `Vec<[u32; 3]>` - Triangle faces as vertex indices
///
/// Renderers that expect parallel arrays use [`positions`](Self::positions),
/// [`normals`](Self::normals), [`uvs`](Self::uvs) and
/// [`indices`](Self::indices).
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex, MeshTopology};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.indices(), vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Reserve capacity for additional vertices and faces.
    pub fn reserve(&mut self, additional_vertices: usize, additional_faces: usize) {
        self.vertices.reserve(additional_vertices);
        self.faces.reserve(additional_faces);
    }

    /// Merge another mesh into this one.
    ///
    /// The other mesh's vertices and faces are appended, with face
    /// indices adjusted appropriately. Returns the ranges the appended
    /// geometry occupies, tagged with `material`.
    ///
    /// # Note
    ///
    /// This function uses u32 vertex indices, which supports up to ~4 billion vertices.
    /// Meshes exceeding this limit are not supported.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, so vertex counts > 4B are unsupported by design
    pub fn merge(&mut self, other: &Self, material: usize) -> SubMesh {
        let vertex_offset = self.vertices.len() as u32;
        let face_offset = self.faces.len();

        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| face.map(|index| index + vertex_offset)),
        );

        SubMesh {
            vertices: vertex_offset..self.vertices.len() as u32,
            faces: face_offset..self.faces.len(),
            material,
        }
    }

    /// Vertex positions as a flat `[x, y, z]` array, one entry per vertex.
    #[must_use]
    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.vertices
            .iter()
            .map(|v| [v.position.x, v.position.y, v.position.z])
            .collect()
    }

    /// Vertex normals, one entry per vertex.
    ///
    /// Vertices without a normal yield a zero vector so the array stays
    /// parallel to [`positions`](Self::positions).
    #[must_use]
    pub fn normals(&self) -> Vec<[f64; 3]> {
        self.vertices
            .iter()
            .map(|v| {
                let n = v.normal().unwrap_or_else(Vector3::zeros);
                [n.x, n.y, n.z]
            })
            .collect()
    }

    /// Texture coordinates, one entry per vertex (`[0, 0]` if unset).
    #[must_use]
    pub fn uvs(&self) -> Vec<[f32; 2]> {
        self.vertices
            .iter()
            .map(|v| {
                let (u, w) = v.uv().unwrap_or((0.0, 0.0));
                [u, w]
            })
            .collect()
    }

    /// Triangle list indices, three per face.
    #[must_use]
    pub fn indices(&self) -> Vec<u32> {
        self.faces.iter().flatten().copied().collect()
    }

    /// Check that every vertex carries both a normal and a UV.
    #[must_use]
    pub fn is_fully_shaded(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.normal().is_some() && v.uv().is_some())
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        self.faces.get(face_index).map(|&[i0, i1, i2]| Triangle {
            v0: self.vertices[i0 as usize].position,
            v1: self.vertices[i1 as usize].position,
            v2: self.vertices[i2 as usize].position,
        })
    }

    fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    fn faces(&self) -> impl Iterator<Item = [u32; 3]> {
        self.faces.iter().copied()
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.faces.iter().map(|&[i0, i1, i2]| Triangle {
            v0: self.vertices[i0 as usize].position,
            v1: self.vertices[i1 as usize].position,
            v2: self.vertices[i2 as usize].position,
        })
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        if self.vertices.is_empty() {
            return Aabb::empty();
        }

        let positions = self.vertices.iter().map(|v| &v.position);
        Aabb::from_points(positions)
    }
}
