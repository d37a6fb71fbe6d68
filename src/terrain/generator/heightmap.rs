use std::sync::Arc;

use crate::terrain::{
    coords::{ColumnCoords, TileCoords},
    noise::NoiseSource,
};

/// Scale from world columns to noise space, independent of layer frequency.
pub const POSITION_SCALE: f32 = 0.02;

const MOUNTAIN_OCTAVES: u32 = 6;
const MOUNTAIN_PERSISTENCE: f32 = 0.8;
const GROUND_OCTAVES: u32 = 4;
const GROUND_PERSISTENCE: f32 = 0.1;
const GROUND_BIAS: f32 = 0.1;

/// Elevation of any world column, from a ground layer plus a mountain layer
/// that can only raise the terrain.
#[derive(Clone)]
pub struct HeightField {
    ground: Arc<dyn NoiseSource>,
    mountain: Arc<dyn NoiseSource>,
    ground_frequency: f32,
    mountain_frequency: f32,
    amplitude: f32,
    size: usize,
}

impl HeightField {
    pub fn new(
        ground: Arc<dyn NoiseSource>,
        mountain: Arc<dyn NoiseSource>,
        ground_frequency: f32,
        mountain_frequency: f32,
        amplitude: f32,
        size: usize,
    ) -> Self {
        Self {
            ground,
            mountain,
            ground_frequency,
            mountain_frequency,
            amplitude,
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Pure function of world position. `column` may lie outside the tile.
    pub fn elevation(&self, tile: TileCoords, column: ColumnCoords) -> f32 {
        let (world_x, world_z) = tile.to_world_column(self.size, column);
        let wx = world_x as f32 * POSITION_SCALE;
        let wz = world_z as f32 * POSITION_SCALE;

        let ground = self.ground_layer(wx, wz);
        let mountain = self.mountain_layer(wx, wz);

        (ground + mountain) * self.amplitude
    }

    /// Never negative.
    pub fn mountain_layer(&self, wx: f32, wz: f32) -> f32 {
        self.mountain
            .fractal_noise_2d(wx, wz, MOUNTAIN_OCTAVES, self.mountain_frequency, MOUNTAIN_PERSISTENCE)
            .max(0.0)
    }

    pub fn ground_layer(&self, wx: f32, wz: f32) -> f32 {
        self.ground
            .fractal_noise_2d(wx, wz, GROUND_OCTAVES, self.ground_frequency, GROUND_PERSISTENCE)
            + GROUND_BIAS
    }

    /// Fills an `S x S` grid, row-major by z then x.
    pub fn fill(&self, tile: TileCoords) -> Heightmap {
        let size = self.size;
        let mut heights = Vec::with_capacity(size * size);

        for z in 0..size as i32 {
            for x in 0..size as i32 {
                heights.push(self.elevation(tile, ColumnCoords::new(x, z)));
            }
        }

        Heightmap { heights, size }
    }
}

/// One tile's filled height grid. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    heights: Vec<f32>,
    size: usize,
}

impl Heightmap {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.heights[z * self.size + x]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.heights
    }

    /// `(x, z, height)` in row-major order.
    pub fn columns(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.heights
            .iter()
            .enumerate()
            .map(move |(i, &h)| (i % self.size, i / self.size, h))
    }
}
