use nalgebra::Matrix4;

use crate::terrain::{
    coords::TileCoords,
    error::{Result, TerrainError},
    mesh::Mesh,
};

/// Merges many small meshes into combined meshes under one shared transform.
///
/// Produces one or more meshes; the current strategy never splits, so the
/// result always holds exactly one.
pub struct MeshBatcher {
    transform: Matrix4<f32>,
}

impl Default for MeshBatcher {
    fn default() -> Self {
        Self::new(Matrix4::identity())
    }
}

impl MeshBatcher {
    pub fn new(transform: Matrix4<f32>) -> Self {
        Self { transform }
    }

    pub fn combine(&self, tile: TileCoords, meshes: &[Mesh]) -> Result<Vec<Mesh>> {
        let (vertex_total, index_total) = meshes.iter().fold((0usize, 0usize), |(v, i), m| {
            (v.saturating_add(m.vertex_count()), i.saturating_add(m.indices.len()))
        });

        // combined indices must stay addressable as u32
        let limit = u32::MAX as usize;
        if vertex_total > limit {
            return Err(TerrainError::ResourceLimitExceeded {
                tile,
                requested: vertex_total,
                limit,
            });
        }

        let mut combined = Mesh::with_capacity(vertex_total, index_total);
        for mesh in meshes {
            combined.append_transformed(mesh, &self.transform);
        }
        combined.recalculate_bounds();

        Ok(vec![combined])
    }
}
