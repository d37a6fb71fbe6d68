use nalgebra::{Matrix4, Point3, Vector3};

use crate::terrain::{
    coords::TileCoords,
    generator::{cube_mesh, MeshBatcher, INDICES_PER_CUBE, VERTICES_PER_CUBE},
    mesh::Mesh,
};
use test_case::test_case;

fn cubes(n: usize) -> Vec<Mesh> {
    (0..n).map(|i| cube_mesh(i as f32, (i % 3) as f32, 0.0)).collect()
}

#[test_case(1)]
#[test_case(9)]
#[test_case(40)]
fn test_combined_buffer_sizes(n: usize) {
    let batcher = MeshBatcher::default();
    let combined = batcher.combine(TileCoords::new(0, 0), &cubes(n)).expect("fits");

    assert_eq!(combined.len(), 1, "Batching always yields a single mesh");
    let mesh = &combined[0];
    assert_eq!(mesh.vertex_count(), n * VERTICES_PER_CUBE);
    assert_eq!(mesh.normals.len(), n * VERTICES_PER_CUBE);
    assert_eq!(mesh.uvs.len(), n * VERTICES_PER_CUBE);
    assert_eq!(mesh.colors.len(), n * VERTICES_PER_CUBE);
    assert_eq!(mesh.indices.len(), n * INDICES_PER_CUBE);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < n * VERTICES_PER_CUBE));
}

#[test]
fn test_each_cube_keeps_its_own_block() {
    let batcher = MeshBatcher::default();
    let combined = batcher.combine(TileCoords::new(0, 0), &cubes(5)).expect("fits");
    let mesh = &combined[0];

    for (cube, indices) in mesh.indices.chunks(INDICES_PER_CUBE).enumerate() {
        let start = (cube * VERTICES_PER_CUBE) as u32;
        // bottom face of every cube stays unreferenced
        assert!(indices.iter().all(|&i| i >= start + 4 && i < start + VERTICES_PER_CUBE as u32));
    }
}

#[test]
fn test_identity_transform_keeps_positions() {
    let batcher = MeshBatcher::default();
    let input = cubes(3);
    let combined = batcher.combine(TileCoords::new(0, 0), &input).expect("fits");
    let merged: Vec<Point3<f32>> = input.iter().flat_map(|m| m.vertices.clone()).collect();
    assert_eq!(combined[0].vertices, merged);
}

#[test]
fn test_shared_transform_applies_to_all() {
    let batcher = MeshBatcher::new(Matrix4::new_translation(&Vector3::new(100.0, 0.0, 0.0)));
    let combined = batcher.combine(TileCoords::new(0, 0), &cubes(2)).expect("fits");
    let bounds = combined[0].bounds.expect("non-empty");
    assert_eq!(bounds.min.x, 99.5);
    assert_eq!(bounds.max.x, 101.5);
}

#[test]
fn test_empty_input() {
    let combined = MeshBatcher::default()
        .combine(TileCoords::new(0, 0), &[])
        .expect("empty is fine");
    assert_eq!(combined.len(), 1);
    assert!(combined[0].is_empty());
    assert!(combined[0].bounds.is_none());
}
