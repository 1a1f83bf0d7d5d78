//! PLY (Polygon File Format) support.
//!
//! # Supported Properties
//!
//! - Vertex positions (x, y, z) - required
//! - Vertex normals (nx, ny, nz) - written for shaded meshes
//! - Texture coordinates (s, t) - written for shaded meshes; `u`/`v` also read
//! - Face vertex indices (`vertex_indices` or `vertex_index`) - required for meshes
//!
//! # Format Variants
//!
//! - **ASCII** - Human-readable, larger files
//! - **Binary Little Endian** - Compact, fast to read/write
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_ply, save_ply};
//!
//! let mesh = load_ply("pipes.ply").unwrap();
//! save_ply(&mesh, "output.ply", true).unwrap(); // Binary
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use mesh_types::{IndexedMesh, Vertex, VertexAttributes};
use nalgebra::{Point3, Vector3};
use ply_rs::parser::Parser;
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;

use crate::error::{IoError, IoResult};

const COMMENT: &str = "Generated by mesh-io";

/// Load a mesh from a PLY file.
///
/// Normals and texture coordinates are attached when present.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file is not valid PLY format
/// - A vertex lacks one of x, y, z
pub fn load_ply<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::open(path, e))?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();

    let header = parser
        .read_header(&mut reader)
        .map_err(|e| IoError::invalid_content(format!("failed to parse PLY header: {e}")))?;

    let payload = parser
        .read_payload(&mut reader, &header)
        .map_err(|e| IoError::invalid_content(format!("failed to read PLY payload: {e}")))?;

    let mut mesh = IndexedMesh::new();

    if let Some(vertex_elements) = payload.get("vertex") {
        mesh.vertices.reserve(vertex_elements.len());
        for element in vertex_elements {
            mesh.vertices.push(read_vertex(element)?);
        }
    }

    if let Some(face_elements) = payload.get("face") {
        mesh.faces.reserve(face_elements.len());
        for element in face_elements {
            let indices = get_index_list(element);
            if indices.iter().any(|&i| i >= mesh.vertices.len()) {
                return Err(IoError::invalid_content("face index out of range"));
            }
            if indices.len() >= 3 {
                #[allow(clippy::cast_possible_truncation)]
                for i in 1..indices.len() - 1 {
                    mesh.faces
                        .push([indices[0] as u32, indices[i] as u32, indices[i + 1] as u32]);
                }
            }
        }
    }

    Ok(mesh)
}

fn read_vertex(element: &DefaultElement) -> IoResult<Vertex> {
    let required = |property: &'static str| {
        get_float_property(element, property).ok_or(IoError::MissingAttribute {
            element: "vertex",
            property,
        })
    };
    let position = Point3::new(required("x")?, required("y")?, required("z")?);

    let normal = match (
        get_float_property(element, "nx"),
        get_float_property(element, "ny"),
        get_float_property(element, "nz"),
    ) {
        (Some(x), Some(y), Some(z)) => Some(Vector3::new(x, y, z)),
        _ => None,
    };

    let uv = ["s", "u"]
        .iter()
        .zip(["t", "v"])
        .find_map(|(u, v)| Some((get_float_property(element, u)?, get_float_property(element, v)?)));
    #[allow(clippy::cast_possible_truncation)]
    let uv = uv.map(|(u, v)| (u as f32, v as f32));

    Ok(Vertex {
        position,
        attributes: VertexAttributes { normal, uv },
    })
}

/// Extract a float property from a PLY element.
fn get_float_property(element: &DefaultElement, key: &str) -> Option<f64> {
    match element.get(key)? {
        Property::Float(v) => Some(f64::from(*v)),
        Property::Double(v) => Some(*v),
        _ => None,
    }
}

/// Extract vertex index list from a face element.
fn get_index_list(element: &DefaultElement) -> Vec<usize> {
    for key in &["vertex_indices", "vertex_index"] {
        if let Some(prop) = element.get(*key) {
            return match prop {
                Property::ListInt(v) =>
                {
                    #[allow(clippy::cast_sign_loss)]
                    v.iter().map(|&i| i as usize).collect()
                }
                Property::ListUInt(v) => v.iter().map(|&i| i as usize).collect(),
                Property::ListUChar(v) => v.iter().map(|&i| i as usize).collect(),
                Property::ListUShort(v) => v.iter().map(|&i| i as usize).collect(),
                _ => continue,
            };
        }
    }
    Vec::new()
}

/// Save a mesh to a PLY file.
///
/// Shaded meshes also carry normals and texture coordinates.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `binary` - If true, save as binary little-endian; if false, save as ASCII
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_ply<P: AsRef<Path>>(mesh: &IndexedMesh, path: P, binary: bool) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    if binary {
        write_ply_binary(mesh, &mut writer)?;
    } else {
        write_ply_ascii(mesh, &mut writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Vertex property names written for a mesh.
fn vertex_properties(shaded: bool) -> &'static [&'static str] {
    if shaded {
        &["x", "y", "z", "nx", "ny", "nz", "s", "t"]
    } else {
        &["x", "y", "z"]
    }
}

/// Float values of one vertex, in [`vertex_properties`] order.
#[allow(clippy::cast_possible_truncation)]
fn vertex_values(v: &Vertex, shaded: bool) -> Vec<f32> {
    let p = v.position;
    let mut values = vec![p.x as f32, p.y as f32, p.z as f32];
    if shaded {
        let n = v.normal().unwrap_or_else(Vector3::zeros);
        let (s, t) = v.uv().unwrap_or_default();
        values.extend([n.x as f32, n.y as f32, n.z as f32, s, t]);
    }
    values
}

/// Write mesh as binary PLY (little-endian).
///
/// Written by hand: the ply-rs binary writer emits the element count
/// instead of the list length for list properties.
fn write_ply_binary<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    let shaded = mesh.is_fully_shaded();

    writeln!(writer, "ply")?;
    writeln!(writer, "format binary_little_endian 1.0")?;
    writeln!(writer, "comment {COMMENT}")?;
    writeln!(writer, "element vertex {}", mesh.vertices.len())?;
    for name in vertex_properties(shaded) {
        writeln!(writer, "property float {name}")?;
    }
    writeln!(writer, "element face {}", mesh.faces.len())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for v in &mesh.vertices {
        for value in vertex_values(v, shaded) {
            writer.write_all(&value.to_le_bytes())?;
        }
    }

    for face in &mesh.faces {
        writer.write_all(&[3u8])?;
        for &index in face {
            #[allow(clippy::cast_possible_wrap)]
            writer.write_all(&(index as i32).to_le_bytes())?;
        }
    }

    Ok(())
}

/// Write mesh as ASCII PLY using ply-rs.
fn write_ply_ascii<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    let shaded = mesh.is_fully_shaded();
    let names = vertex_properties(shaded);

    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;
    ply.header.comments.push(COMMENT.to_string());

    let mut vertex_def = ElementDef::new("vertex".to_string());
    for name in names {
        vertex_def.properties.add(PropertyDef::new(
            (*name).to_string(),
            PropertyType::Scalar(ScalarType::Float),
        ));
    }
    vertex_def.count = mesh.vertices.len();
    ply.header.elements.add(vertex_def);

    let mut face_def = ElementDef::new("face".to_string());
    face_def.properties.add(PropertyDef::new(
        "vertex_indices".to_string(),
        PropertyType::List(ScalarType::UChar, ScalarType::Int),
    ));
    face_def.count = mesh.faces.len();
    ply.header.elements.add(face_def);

    let vertex_elements = mesh
        .vertices
        .iter()
        .map(|v| {
            let mut element = DefaultElement::new();
            for (name, value) in names.iter().zip(vertex_values(v, shaded)) {
                element.insert((*name).to_string(), Property::Float(value));
            }
            element
        })
        .collect();
    ply.payload.insert("vertex".to_string(), vertex_elements);

    let face_elements = mesh
        .faces
        .iter()
        .map(|face| {
            let mut element = DefaultElement::new();
            #[allow(clippy::cast_possible_wrap)]
            let indices = face.iter().map(|&i| i as i32).collect();
            element.insert("vertex_indices".to_string(), Property::ListInt(indices));
            element
        })
        .collect();
    ply.payload.insert("face".to_string(), face_elements);

    Writer::new()
        .write_ply(writer, &mut ply)
        .map_err(|e| IoError::invalid_content(format!("failed to write PLY: {e}")))?;

    Ok(())
}
