mod batch;
mod cube;
mod gaps;
mod heightmap;
mod tile;

use std::sync::Arc;

use log::info;
use rayon::prelude::*;

pub use batch::MeshBatcher;
pub use cube::{cube_mesh, CubeFace, INDICES_PER_CUBE, SIDE_COLOR, TOP_COLOR, VERTICES_PER_CUBE};
pub use gaps::{GapFiller, Skirt};
pub use heightmap::{HeightField, Heightmap, POSITION_SCALE};
pub use tile::{Tile, TileBuilder};

use crate::terrain::{
    config::TerrainConfig,
    coords::TileCoords,
    error::Result,
    noise::{NoiseSource, PerlinNoise},
    sink::TileSink,
};

/// One generation run: a validated config and the two noise layers, built
/// once and shared by every tile.
pub struct TerrainGenerator {
    config: TerrainConfig,
    field: HeightField,
    batcher: MeshBatcher,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig) -> Result<Self> {
        let ground = Arc::new(PerlinNoise::new(config.ground_seed));
        let mountain = Arc::new(PerlinNoise::new(config.mountain_seed));
        info!(
            "Seeding noise layers: ground {} mountain {}",
            ground.seed(),
            mountain.seed()
        );
        Self::with_noise(config, ground, mountain)
    }

    pub fn with_noise(
        config: TerrainConfig,
        ground: Arc<dyn NoiseSource>,
        mountain: Arc<dyn NoiseSource>,
    ) -> Result<Self> {
        config.validate()?;
        let field = HeightField::new(
            ground,
            mountain,
            config.ground_frequency,
            config.mountain_frequency,
            config.amplitude,
            config.heightmap_size,
        );
        Ok(Self {
            config,
            field,
            batcher: MeshBatcher::default(),
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    pub fn tile_builder(&self) -> TileBuilder<'_> {
        TileBuilder::new(&self.field, &self.batcher, &self.config)
    }

    pub fn build_tile(&self, coords: TileCoords) -> Result<Tile> {
        self.tile_builder().build(coords)
    }

    /// `(tx, tz)` for every tile, x-major.
    pub fn tile_coords(&self) -> Vec<TileCoords> {
        let tiles_x = self.config.tiles_x as i32;
        let tiles_z = self.config.tiles_z as i32;
        (0..tiles_x)
            .flat_map(|tx| (0..tiles_z).map(move |tz| TileCoords::new(tx, tz)))
            .collect()
    }

    /// Builds every tile. Output order matches `tile_coords` either way.
    pub fn generate(&self) -> Result<Vec<Tile>> {
        let coords = self.tile_coords();
        info!(
            "Generating {} tiles of {}x{} columns (gap filling {})",
            coords.len(),
            self.config.heightmap_size,
            self.config.heightmap_size,
            if self.config.fill_gaps { "on" } else { "off" }
        );

        let builder = self.tile_builder();
        if self.config.parallel {
            coords.par_iter().map(|&c| builder.build(c)).collect()
        } else {
            coords.iter().map(|&c| builder.build(c)).collect()
        }
    }

    /// Tiles built together before any of them reaches a sink.
    pub fn batch_size(&self) -> usize {
        if self.config.parallel {
            rayon::current_num_threads().max(1)
        } else {
            1
        }
    }

    /// Builds tiles batch by batch and hands each to `sink` in `tile_coords`
    /// order. A batch is submitted before the next one is built, so at most
    /// `batch_size` finished tiles are held at once.
    pub fn generate_into<S: TileSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let coords = self.tile_coords();
        let batch_size = self.batch_size();
        info!(
            "Streaming {} tiles in batches of {}",
            coords.len(),
            batch_size
        );

        let builder = self.tile_builder();
        let mut count = 0;
        for batch in coords.chunks(batch_size) {
            let tiles: Vec<Tile> = if batch.len() > 1 {
                batch.par_iter().map(|&c| builder.build(c)).collect::<Result<_>>()?
            } else {
                batch.iter().map(|&c| builder.build(c)).collect::<Result<_>>()?
            };
            for tile in tiles {
                sink.submit(tile)?;
                count += 1;
            }
        }
        sink.finish()?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests;
