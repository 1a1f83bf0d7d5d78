//! Mesh export for generated pipe geometry.
//!
//! This crate writes (and reads back) triangle meshes with per-vertex
//! normals and texture coordinates:
//!
//! - **OBJ** (Wavefront) - ASCII, one group and material per sub-mesh
//! - **PLY** (Polygon File Format) - Binary little-endian and ASCII
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{save_mesh, load_mesh};
//! use mesh_types::IndexedMesh;
//!
//! let mesh = IndexedMesh::new();
//!
//! // Format detected from extension
//! save_mesh(&mesh, &[], "pipes.obj").unwrap();
//! let copy = load_mesh("pipes.obj").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;
mod ply;

pub use error::{IoError, IoResult};
pub use obj::{load_obj, read_obj, save_obj, write_obj};
pub use ply::{load_ply, save_ply};

use std::path::Path;

use mesh_types::{IndexedMesh, SubMesh};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// OBJ (Wavefront) format.
    Obj,
    /// PLY (Polygon File Format).
    Ply,
}

impl MeshFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "obj" => Some(Self::Obj),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Ply => "ply",
        }
    }

    /// Detect the format of `path` or report its extension as unknown.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownFormat`] for unrecognized extensions.
    pub fn detect(path: &Path) -> IoResult<Self> {
        Self::from_path(path).ok_or_else(|| IoError::UnknownFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string(),
        })
    }
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be read
/// - The file content is invalid for the detected format
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    match MeshFormat::detect(path)? {
        MeshFormat::Obj => load_obj(path),
        MeshFormat::Ply => load_ply(path),
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// `groups` become OBJ groups; PLY has no grouping and ignores them.
/// PLY is written as binary.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be written
pub fn save_mesh<P: AsRef<Path>>(mesh: &IndexedMesh, groups: &[SubMesh], path: P) -> IoResult<()> {
    let path = path.as_ref();
    match MeshFormat::detect(path)? {
        MeshFormat::Obj => save_obj(mesh, groups, path),
        MeshFormat::Ply => save_ply(mesh, path, true),
    }
}
