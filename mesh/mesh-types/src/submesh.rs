//! Sub-mesh ranges for multi-material meshes.

use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A contiguous part of an [`IndexedMesh`](crate::IndexedMesh) rendered
/// with one material slot.
///
/// Produced by [`IndexedMesh::merge`](crate::IndexedMesh::merge). Faces in
/// `faces` only reference vertices in `vertices`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubMesh {
    /// Range of vertex indices owned by this sub-mesh.
    pub vertices: Range<u32>,
    /// Range of face indices owned by this sub-mesh.
    pub faces: Range<usize>,
    /// Material slot index.
    pub material: usize,
}

impl SubMesh {
    /// Number of vertices in the sub-mesh.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces in the sub-mesh.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check whether a face only references vertices of this sub-mesh.
    #[must_use]
    pub fn owns_face(&self, face: [u32; 3]) -> bool {
        face.iter().all(|index| self.vertices.contains(index))
    }
}
