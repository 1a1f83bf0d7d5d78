//! Wavefront OBJ support.
//!
//! Positions, texture coordinates and normals are written one-to-one with
//! the mesh vertices, so every face corner is `i/i/i`. Each sub-mesh
//! becomes a `g pipe_N` group with a `usemtl material_M` line.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_obj, save_obj};
//!
//! let mesh = load_obj("pipes.obj").unwrap();
//! save_obj(&mesh, &[], "copy.obj").unwrap();
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use mesh_types::{IndexedMesh, SubMesh, Vertex};
use nalgebra::{Point3, Vector3};

use crate::error::{IoError, IoResult};

/// Save a mesh as OBJ.
///
/// `groups` may be empty, in which case faces are written ungrouped.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_obj<P: AsRef<Path>>(mesh: &IndexedMesh, groups: &[SubMesh], path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, groups, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as OBJ to any writer.
///
/// Normals and UVs are emitted only when every vertex carries both.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_obj<W: Write>(mesh: &IndexedMesh, groups: &[SubMesh], writer: &mut W) -> IoResult<()> {
    let shaded = mesh.is_fully_shaded();

    writeln!(writer, "# Generated by mesh-io")?;
    writeln!(writer, "# {} vertices, {} faces", mesh.vertices.len(), mesh.faces.len())?;

    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
    }

    if shaded {
        for [u, v] in mesh.uvs() {
            writeln!(writer, "vt {u} {v}")?;
        }
        for [x, y, z] in mesh.normals() {
            writeln!(writer, "vn {x} {y} {z}")?;
        }
    }

    if groups.is_empty() {
        write_faces(writer, &mesh.faces, shaded)?;
    } else {
        for (index, group) in groups.iter().enumerate() {
            writeln!(writer, "g pipe_{index}")?;
            writeln!(writer, "usemtl material_{}", group.material)?;
            let faces = mesh.faces.get(group.faces.clone()).ok_or_else(|| {
                IoError::invalid_content(format!("group {index} exceeds face count"))
            })?;
            write_faces(writer, faces, shaded)?;
        }
    }

    Ok(())
}

fn write_faces<W: Write>(writer: &mut W, faces: &[[u32; 3]], shaded: bool) -> IoResult<()> {
    for face in faces {
        let [a, b, c] = face.map(|i| u64::from(i) + 1);
        if shaded {
            writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        } else {
            writeln!(writer, "f {a} {b} {c}")?;
        }
    }
    Ok(())
}

/// Load a mesh from an OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::open(path, e))?;
    read_obj(BufReader::new(file))
}

/// Read an OBJ mesh from any buffered reader.
///
/// Polygons are fan-triangulated. A vertex takes the texture coordinate
/// and normal of the first face corner that references it.
///
/// # Errors
///
/// Returns an error on unparsable numbers or out-of-range indices.
pub fn read_obj<R: BufRead>(reader: R) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut uvs: Vec<(f32, f32)> = Vec::new();
    let mut normals: Vec<Vector3<f64>> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let [x, y, z] = parse_floats::<3>(&mut parts, "v")?;
                mesh.vertices.push(Vertex::new(Point3::new(x, y, z)));
            }
            Some("vt") => {
                let [u, v] = parse_floats::<2>(&mut parts, "vt")?;
                #[allow(clippy::cast_possible_truncation)]
                uvs.push((u as f32, v as f32));
            }
            Some("vn") => {
                let [x, y, z] = parse_floats::<3>(&mut parts, "vn")?;
                normals.push(Vector3::new(x, y, z));
            }
            Some("f") => {
                let corners = parts
                    .map(|corner| parse_corner(corner, mesh.vertices.len()))
                    .collect::<IoResult<Vec<_>>>()?;
                if corners.len() < 3 {
                    return Err(IoError::invalid_content("face with fewer than 3 corners"));
                }

                for &(vertex, uv, normal) in &corners {
                    let attributes = &mut mesh.vertices[vertex].attributes;
                    if attributes.uv.is_none() {
                        attributes.uv = lookup(&uvs, uv, "vt")?;
                    }
                    if attributes.normal.is_none() {
                        attributes.normal = lookup(&normals, normal, "vn")?;
                    }
                }

                #[allow(clippy::cast_possible_truncation)]
                for i in 1..corners.len() - 1 {
                    mesh.faces.push([
                        corners[0].0 as u32,
                        corners[i].0 as u32,
                        corners[i + 1].0 as u32,
                    ]);
                }
            }
            _ => {}
        }
    }

    Ok(mesh)
}

fn parse_floats<const N: usize>(
    parts: &mut std::str::SplitWhitespace<'_>,
    keyword: &str,
) -> IoResult<[f64; N]> {
    let mut out = [0.0; N];
    for slot in &mut out {
        let token = parts
            .next()
            .ok_or_else(|| IoError::invalid_content(format!("'{keyword}' line is too short")))?;
        *slot = token.parse()?;
    }
    Ok(out)
}

/// Parse `v`, `v/vt`, `v//vn` or `v/vt/vn` into zero-based indices.
fn parse_corner(corner: &str, vertex_count: usize) -> IoResult<(usize, Option<usize>, Option<usize>)> {
    let mut fields = corner.split('/');
    let vertex = fields
        .next()
        .ok_or_else(|| IoError::invalid_content("empty face corner"))?
        .parse::<usize>()?;
    if vertex == 0 || vertex > vertex_count {
        return Err(IoError::invalid_content(format!(
            "face references vertex {vertex} of {vertex_count}"
        )));
    }

    let mut optional = || -> IoResult<Option<usize>> {
        match fields.next() {
            None | Some("") => Ok(None),
            Some(index) => Ok(Some(index.parse::<usize>()?)),
        }
    };
    let uv = optional()?;
    let normal = optional()?;

    Ok((vertex - 1, uv, normal))
}

fn lookup<T: Copy>(items: &[T], index: Option<usize>, keyword: &str) -> IoResult<Option<T>> {
    match index {
        None => Ok(None),
        Some(i) => items
            .get(i.wrapping_sub(1))
            .copied()
            .map(Some)
            .ok_or_else(|| IoError::invalid_content(format!("face references missing {keyword} {i}"))),
    }
}
