//! Export of generated pipe meshes.
//!
//! To run: cargo test -p mesh-io --test pipe_export

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mesh_io::{MeshFormat, load_mesh, save_mesh};
use mesh_pipe::{PipeConfig, PipeMesh, generate_all};
use mesh_types::MeshTopology;
use nalgebra::Point3;
use tempfile::tempdir;

fn pipes() -> PipeMesh {
    let pipes = vec![
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(10.0, 0.0, 10.0),
            Point3::new(10.0, 8.0, 10.0),
        ],
        vec![Point3::new(-4.0, 0.0, 0.0), Point3::new(-4.0, 6.0, 0.0)],
    ];
    let config = PipeConfig::industrial()
        .with_radius(0.4)
        .with_edge_count(8)
        .with_curved_segment_count(5);
    generate_all(&pipes, &config).expect("valid pipes")
}

#[test]
fn every_format_roundtrips() {
    let generated = pipes();
    let dir = tempdir().expect("tempdir");

    for format in [MeshFormat::Obj, MeshFormat::Ply] {
        let path = dir.path().join(format!("pipes.{}", format.extension()));
        save_mesh(&generated.mesh, &generated.submeshes, &path).expect("save");
        let loaded = load_mesh(&path).expect("load");

        assert_eq!(loaded.vertex_count(), generated.mesh.vertex_count(), "{format:?}");
        assert_eq!(loaded.faces, generated.mesh.faces, "{format:?}");
        // OBJ attributes travel with face corners; unreferenced seam
        // vertices of the flat collar faces come back bare.
        for face in &loaded.faces {
            for &i in face {
                let v = &loaded.vertices[i as usize];
                assert!(v.normal().is_some() && v.uv().is_some(), "{format:?}");
            }
        }
        if format == MeshFormat::Ply {
            assert!(loaded.is_fully_shaded());
        }

        for (a, b) in generated.mesh.vertices.iter().zip(&loaded.vertices) {
            assert!((a.position - b.position).norm() < 1e-4, "{format:?}");
        }
    }
}

#[test]
fn obj_groups_match_pipes() {
    let generated = pipes();
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("groups.obj");
    save_mesh(&generated.mesh, &generated.submeshes, &path).expect("save");

    let text = std::fs::read_to_string(&path).expect("read");
    assert_eq!(text.lines().filter(|l| l.starts_with("g pipe_")).count(), 2);
    assert!(text.contains("usemtl material_1"));
}
