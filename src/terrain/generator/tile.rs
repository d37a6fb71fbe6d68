use log::{debug, info, warn};
use nalgebra::Vector3;

use crate::terrain::{
    config::TerrainConfig,
    coords::{ColumnCoords, TileCoords},
    error::{Result, TerrainError},
    generator::{
        batch::MeshBatcher,
        cube::cube_mesh,
        gaps::GapFiller,
        heightmap::{HeightField, Heightmap},
    },
    mesh::Mesh,
};

/// A finished tile: its height grid plus the batched geometry, placed at
/// `world_offset`.
#[derive(Clone, Debug)]
pub struct Tile {
    pub coords: TileCoords,
    pub name: String,
    pub world_offset: Vector3<f32>,
    pub heights: Heightmap,
    pub meshes: Vec<Mesh>,
}

impl Tile {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    pub fn index_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len()).sum()
    }
}

/// Builds one tile at a time. Holds no per-tile state, so one builder can
/// serve many threads.
pub struct TileBuilder<'a> {
    field: &'a HeightField,
    batcher: &'a MeshBatcher,
    fill_gaps: bool,
    max_cubes: usize,
}

impl<'a> TileBuilder<'a> {
    pub fn new(field: &'a HeightField, batcher: &'a MeshBatcher, config: &TerrainConfig) -> Self {
        Self {
            field,
            batcher,
            fill_gaps: config.fill_gaps,
            max_cubes: config.max_cubes_per_tile,
        }
    }

    pub fn build(&self, coords: TileCoords) -> Result<Tile> {
        let size = self.field.size();
        // every column gets a top cube, so refuse before the grid is allocated
        self.check_limit(coords, size.saturating_mul(size))?;
        let heights = self.field.fill(coords);
        let cubes = self.build_cubes(coords, &heights)?;
        let meshes = self.batcher.combine(coords, &cubes)?;

        let tile = Tile {
            coords,
            name: coords.to_string(),
            world_offset: coords.world_offset(size),
            heights,
            meshes,
        };

        info!(
            "Built tile {}: {} cubes, {} vertices, {} indices",
            tile.name,
            cubes.len(),
            tile.vertex_count(),
            tile.index_count()
        );

        Ok(tile)
    }

    /// One top cube per column, plus skirt cubes when gap filling is on.
    pub fn build_cubes(&self, coords: TileCoords, heights: &Heightmap) -> Result<Vec<Mesh>> {
        let columns = heights.size() * heights.size();
        self.check_limit(coords, columns)?;

        let gaps = GapFiller::new(self.field);
        let mut cubes = Vec::with_capacity(columns);

        for (x, z, h) in heights.columns() {
            cubes.push(cube_mesh(x as f32, h, z as f32));

            if !self.fill_gaps {
                continue;
            }

            let skirt = gaps.skirt(coords, ColumnCoords::new(x as i32, z as i32), h);
            if skirt.is_empty() {
                continue;
            }

            self.check_limit(coords, cubes.len().saturating_add(skirt.count()))?;
            debug!(
                "Tile {} column ({}, {}) at {:.2}: {} skirt cubes",
                coords,
                x,
                z,
                h,
                skirt.count()
            );
            cubes.extend(skirt.heights().map(|y| cube_mesh(x as f32, y, z as f32)));
        }

        if cubes.len() > self.max_cubes / 10 * 9 {
            warn!(
                "Tile {} used {} of {} allowed cubes",
                coords,
                cubes.len(),
                self.max_cubes
            );
        }

        Ok(cubes)
    }

    fn check_limit(&self, tile: TileCoords, requested: usize) -> Result<()> {
        if requested > self.max_cubes {
            return Err(TerrainError::ResourceLimitExceeded {
                tile,
                requested,
                limit: self.max_cubes,
            });
        }
        Ok(())
    }
}
